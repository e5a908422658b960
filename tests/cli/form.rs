use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const FR_CATALOG: &str = r#"msgid ""
msgstr ""
"Language: fr\n"

#: app.py:3
msgid "Hello"
msgstr "Bonjour"
"#;

#[test]
fn test_form_html_from_directory() -> Result<()> {
    let test = CliTest::with_file("locale/fr.po", FR_CATALOG)?;
    test.write_file("locale/README.txt", "not a catalog")?;

    let output = test.form_command().arg("locale").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        concat!(
            "<form method=\"post\" data-catalog=\"locale/fr.po\">\n",
            "<div class=\"field\"><input type=\"hidden\" name=\"msgid_field_1\" id=\"id_msgid_field_1\" value=\"Hello\"></div>\n",
            "<div class=\"field\"><input type=\"checkbox\" name=\"fuzzy_field_1\" id=\"id_fuzzy_field_1\"></div>\n",
            "<div class=\"field\"><label for=\"id_msgstr_field_1\"><span class=\"msgid\">Hello</span></label>",
            "<textarea name=\"msgstr_field_1\" id=\"id_msgstr_field_1\" class=\"translated msgstr_field_1\" title=\"\" rows=\"1\">Bonjour</textarea>",
            "<span class=\"helptext\"><small>app.py (line 3)</small></span></div>\n",
            "<div class=\"field\"><input type=\"hidden\" name=\"changed_field_1\" id=\"id_changed_field_1\" value=\"False\"></div>\n",
            "</form>\n",
        )
    );

    Ok(())
}

#[test]
fn test_form_json_with_plural_and_obsolete() -> Result<()> {
    let test = CliTest::with_file(
        "de.po",
        r#"#, fuzzy
msgid "One file"
msgid_plural "%d files"
msgstr[0] "Eine Datei"
msgstr[1] "%d Dateien"

#~ msgid "Gone"
#~ msgstr "Weg"
"#,
    )?;

    let output = test
        .form_command()
        .args(["de.po", "--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_str(&stdout(&output))?;
    let form = &json["de.po"];
    assert_eq!(form.as_object().unwrap().len(), 4);
    assert_eq!(form["fuzzy_field_1"]["initial"], true);
    assert_eq!(form["msgstr_field_1"]["kind"], "plural");
    assert_eq!(
        form["msgstr_field_1"]["initial"],
        serde_json::json!(["Eine Datei", "%d Dateien"])
    );
    assert_eq!(
        form["msgstr_field_1"]["attrs"]["class"],
        "fuzzy msgstr_field_1"
    );

    Ok(())
}

#[test]
fn test_form_chars_per_row() -> Result<()> {
    let test = CliTest::with_file(
        "fr.po",
        &format!("msgid \"{}\"\nmsgstr \"\"\n", "a".repeat(30)),
    )?;

    let output = test
        .form_command()
        .args(["fr.po", "--format", "json", "--chars-per-row", "10"])
        .output()?;
    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["fr.po"]["msgstr_field_1"]["attrs"]["rows"], "4");

    test.write_file(".transkitrc.json", r#"{ "charsPerRow": 15 }"#)?;
    let output = test
        .form_command()
        .args(["fr.po", "--format", "json"])
        .output()?;
    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["fr.po"]["msgstr_field_1"]["attrs"]["rows"], "3");

    Ok(())
}

#[test]
fn test_form_reports_broken_catalog() -> Result<()> {
    let test = CliTest::with_file("locale/a.po", FR_CATALOG)?;
    test.write_file("locale/b.po", "msgid \"a\"\nmsgstr \"b\"\nnot a po line\n")?;

    let output = test.form_command().arg("locale").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("data-catalog=\"locale/a.po\""));
    let err = stderr(&output);
    assert!(err.starts_with("error: locale/b.po: "), "{}", err);

    Ok(())
}

#[test]
fn test_form_without_catalogs() -> Result<()> {
    let test = CliTest::with_file("locale/notes.txt", "")?;

    let output = test.form_command().arg("locale").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: No .po files found\n");

    let output = test.form_command().arg("missing.po").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output), "Error: Path does not exist: missing.po\n");

    Ok(())
}
