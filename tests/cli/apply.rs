use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;
use transkit::catalog::parse_catalog;

use crate::{CliTest, stderr, stdout};

const CATALOG: &str = r#"msgid "Hello"
msgstr ""

msgid "Bye"
msgstr "Au revoir"
"#;

fn setup() -> Result<CliTest> {
    let test = CliTest::with_file("fr.po", CATALOG)?;
    test.write_json(
        "post.json",
        &json!({
            "msgid_field_1": "Hello",
            "fuzzy_field_1": "on",
            "msgstr_field_1": "Bonjour",
            "changed_field_1": "True",
            "msgid_field_2": "Bye",
            "msgstr_field_2": "ignored",
            "changed_field_2": "False"
        }),
    )?;
    Ok(test)
}

#[test]
fn test_apply_dry_run() -> Result<()> {
    let test = setup()?;

    let output = test.apply_command().args(["fr.po", "post.json"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ 1 entry updated, 1 unchanged\nDry run, use --write to save the catalog\n"
    );
    assert_eq!(test.read_file("fr.po")?, CATALOG);

    Ok(())
}

#[test]
fn test_apply_write() -> Result<()> {
    let test = setup()?;

    let output = test
        .apply_command()
        .args(["fr.po", "post.json", "--write"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("Wrote fr.po\n"));

    let written = parse_catalog(&test.read_file("fr.po")?)?;
    let entries = written.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].msgstr, "Bonjour");
    assert!(entries[0].is_fuzzy());
    assert_eq!(entries[1].msgstr, "Au revoir");
    assert!(!entries[1].is_fuzzy());

    Ok(())
}

#[test]
fn test_apply_conflict() -> Result<()> {
    let test = CliTest::with_file("fr.po", CATALOG)?;
    test.write_json(
        "post.json",
        &json!({
            "msgid_field_1": "Hello!",
            "msgstr_field_1": "Bonjour",
            "changed_field_1": "on"
        }),
    )?;

    let output = test
        .apply_command()
        .args(["fr.po", "post.json", "--write"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "✓ 0 entries updated, 1 unchanged\n\
         ✘ 1 conflict (source text changed since the form was built):\n\
         \x20 #1  \"Hello\" submitted as \"Hello!\"\n"
    );
    assert_eq!(test.read_file("fr.po")?, CATALOG);

    Ok(())
}

#[test]
fn test_apply_invalid_submission() -> Result<()> {
    let test = CliTest::with_file("fr.po", CATALOG)?;
    test.write_file("post.json", r#"["not", "an", "object"]"#)?;

    let output = test.apply_command().args(["fr.po", "post.json"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Invalid submission post.json"));

    Ok(())
}

#[test]
fn test_apply_plural_and_byte_order_mark() -> Result<()> {
    let test = CliTest::with_file(
        "de.po",
        "\u{feff}msgid \"One file\"\nmsgid_plural \"%d files\"\nmsgstr[0] \"\"\nmsgstr[1] \"\"\n",
    )?;
    test.write_json(
        "post.json",
        &json!({
            "msgid_field_1": "One file",
            "msgstr_field_1": "10:Eine Datei10:%d Dateien",
            "changed_field_1": "on"
        }),
    )?;

    let output = test
        .apply_command()
        .args(["de.po", "post.json", "--write"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let written = parse_catalog(&test.read_file("de.po")?)?;
    let forms = &written.entries()[0].msgstr_plural;
    assert_eq!(forms[&0], "Eine Datei");
    assert_eq!(forms[&1], "%d Dateien");

    Ok(())
}

#[test]
fn test_apply_malformed_plural_value() -> Result<()> {
    let test = CliTest::with_file(
        "de.po",
        "msgid \"One file\"\nmsgid_plural \"%d files\"\nmsgstr[0] \"\"\nmsgstr[1] \"\"\n",
    )?;
    test.write_json(
        "post.json",
        &json!({
            "msgid_field_1": "One file",
            "msgstr_field_1": "Eine Datei",
            "changed_field_1": "on"
        }),
    )?;

    let output = test
        .apply_command()
        .args(["de.po", "post.json", "--write"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Invalid submission post.json"));

    Ok(())
}
