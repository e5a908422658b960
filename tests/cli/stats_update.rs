use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const STORE: &str = "transkit-store.json";

/// proj.res: source language en, a fr translation, a de team and a stale
/// it record.
fn store_fixture() -> Value {
    json!({
        "languages": [
            {"code": "en", "name": "English"},
            {"code": "fr", "name": "French"},
            {"code": "de", "name": "German"}
        ],
        "resources": [
            {"id": 1, "project": "proj", "slug": "res", "name": "Res", "sourceLanguage": "en"}
        ],
        "sourceEntities": [
            {"id": 1, "resource": 1, "string": "Hello world"},
            {"id": 2, "resource": 1, "string": "Bye"}
        ],
        "translations": [
            {"id": 1, "sourceEntity": 1, "language": "fr", "string": "Bonjour le monde"}
        ],
        "teams": [
            {"id": 1, "project": "proj", "language": "de"}
        ],
        "stats": [
            {"id": 7, "resource": 1, "language": "it"}
        ]
    })
}

fn stats_languages(store: &Value) -> Vec<String> {
    let mut languages: Vec<String> = store["stats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["language"].as_str().unwrap().to_string())
        .collect();
    languages.sort();
    languages
}

fn stats_for<'a>(store: &'a Value, language: &str) -> &'a Value {
    store["stats"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["language"] == language)
        .unwrap()
}

#[test]
fn test_stats_update_all_resources() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(STORE, &store_fixture())?;

    let output = test.stats_update_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "A total of 1 resources are listed for updating.\n\
         Updating resource proj.res (1 of 1)\n\
         Calculating statistics for language French (fr)\n\
         Calculating statistics for team language German (de)\n\
         ✓ Updated 1 resource: 3 statistics refreshed, 3 created, 1 removed\n"
    );

    let store = test.read_json(STORE)?;
    assert_eq!(stats_languages(&store), vec!["de", "en", "fr"]);

    let fr = stats_for(&store, "fr");
    assert_eq!(fr["total"], 2);
    assert_eq!(fr["translated"], 1);
    assert_eq!(fr["translatedPerc"], 50);
    assert_eq!(fr["translatedWordcount"], 2);
    assert!(fr["lastUpdate"].is_string());

    assert_eq!(store["resources"][0]["totalEntities"], 2);
    assert_eq!(store["resources"][0]["wordcount"], 3);

    Ok(())
}

#[test]
fn test_stats_update_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(STORE, &store_fixture())?;

    test.stats_update_command().output()?;
    let first = test.read_json(STORE)?;
    let output = test.stats_update_command().arg("proj.res").output()?;
    let second = test.read_json(STORE)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("3 statistics refreshed, 0 created, 0 removed"));

    let ids = |store: &Value| -> Vec<u64> {
        let mut ids: Vec<u64> = store["stats"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_u64().unwrap())
            .collect();
        ids.sort();
        ids
    };
    assert_eq!(ids(&first), ids(&second));

    Ok(())
}

#[test]
fn test_stats_update_no_resources() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.stats_update_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        stderr(&output),
        "No resources suitable for updating found. Exiting...\n"
    );
    assert!(!test.root().join(STORE).exists());

    Ok(())
}

#[test]
fn test_stats_update_selector_without_match() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(STORE, &store_fixture())?;

    let output = test.stats_update_command().arg("proj.missing").output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("no resource matches proj.missing"), "{}", err);
    assert!(err.ends_with("No resources suitable for updating found. Exiting...\n"));

    Ok(())
}

#[test]
fn test_stats_update_malformed_selector() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(STORE, &store_fixture())?;

    let output = test
        .stats_update_command()
        .args(["proj.res", "badformat"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        stderr(&output),
        "Error: malformed resource selector 'badformat', expected <project>.<resource>\n"
    );
    // nothing touched
    assert_eq!(test.read_json(STORE)?, store_fixture());

    Ok(())
}

#[test]
fn test_stats_update_store_from_config_and_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".transkitrc.json", r#"{ "storePath": "data/stats.json" }"#)?;
    test.write_json("data/stats.json", &store_fixture())?;
    test.write_json("other.json", &store_fixture())?;

    let output = test.stats_update_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stats_languages(&test.read_json("data/stats.json")?).len(), 3);

    let output = test
        .stats_update_command()
        .args(["--store", "other.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stats_languages(&test.read_json("other.json")?).len(), 3);

    Ok(())
}

/// broken.res has a team whose language is unknown; proj.res is healthy.
fn failing_store_fixture() -> Value {
    json!({
        "languages": [{"code": "en", "name": "English"}],
        "resources": [
            {"id": 1, "project": "broken", "slug": "res", "sourceLanguage": "en"},
            {"id": 2, "project": "proj", "slug": "res", "sourceLanguage": "en"}
        ],
        "teams": [{"id": 1, "project": "broken", "language": "xx"}]
    })
}

#[test]
fn test_stats_update_isolates_failures() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(STORE, &failing_store_fixture())?;

    let output = test.stats_update_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "A total of 2 resources are listed for updating.\n\
         Updating resource broken.res (1 of 2)\n\
         Updating resource proj.res (2 of 2)\n\
         ✓ Updated 1 resource: 1 statistics refreshed, 1 created, 0 removed\n\
         ✘ 1 resource failed:\n\
         \x20 broken.res  unknown language 'xx'\n"
    );
    assert!(stderr(&output).contains("error: failed to update resource broken.res"));

    let store = test.read_json(STORE)?;
    assert_eq!(store["stats"].as_array().unwrap().len(), 1);
    assert_eq!(store["stats"][0]["resource"], 2);

    Ok(())
}

#[test]
fn test_stats_update_fail_fast() -> Result<()> {
    let test = CliTest::new()?;
    test.write_json(STORE, &failing_store_fixture())?;

    let output = test.stats_update_command().arg("--fail-fast").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output)
            .contains("Error: failed to update resource broken.res: unknown language 'xx'")
    );
    assert!(!stdout(&output).contains("proj.res"));

    let store = test.read_json(STORE)?;
    assert!(store["stats"].as_array().unwrap().is_empty());

    Ok(())
}
