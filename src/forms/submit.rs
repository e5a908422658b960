//! Applying a posted translation form back onto catalog entries.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::escape::{escape, unescape};
use super::field::PluralMessageField;
use super::plural::PluralFramingError;
use crate::catalog::{CatalogEntry, FUZZY_FLAG};

/// Flat field name to value map, as an HTML form posts it.
pub type Submission = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// Form indices (1-based) of the entries that were edited.
    pub updated: Vec<usize>,
    pub conflicts: Vec<SubmissionConflict>,
    /// Entries whose `changed` flag was not set.
    pub unchanged: usize,
}

impl SubmissionReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// The source text changed between rendering the form and posting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionConflict {
    pub index: usize,
    pub msgid: String,
    pub submitted_msgid: String,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("malformed plural value in msgstr_field_{index}")]
    PluralFraming {
        index: usize,
        #[source]
        source: PluralFramingError,
    },
    #[error("msgstr_field_{index} carries {found} plural forms, the entry has {expected}")]
    PluralCount {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Write the submitted translations into `entries`.
///
/// Entries are numbered exactly as the form builder numbers them, and only
/// those with a truthy `changed_field_<k>` are touched. A plural entry takes
/// its forms from the framed `msgstr_field_<k>` value when one is posted,
/// otherwise from the `msgstr_field_<k>_<i>` sub-fields.
pub fn apply_submission(
    entries: &mut [CatalogEntry],
    submission: &Submission,
) -> Result<SubmissionReport, SubmissionError> {
    let mut report = SubmissionReport::default();

    for (idx, entry) in entries.iter_mut().filter(|e| !e.obsolete).enumerate() {
        let k = idx + 1;
        if !is_truthy(submission.get(&format!("changed_field_{}", k))) {
            report.unchanged += 1;
            continue;
        }

        let expected = escape(&entry.msgid);
        let submitted = submission
            .get(&format!("msgid_field_{}", k))
            .cloned()
            .unwrap_or_default();
        if submitted != expected {
            report.conflicts.push(SubmissionConflict {
                index: k,
                msgid: entry.msgid.clone(),
                submitted_msgid: unescape(&submitted),
            });
            continue;
        }

        let msgstr_name = format!("msgstr_field_{}", k);
        if entry.has_plural() {
            let keys = entry.sorted_plural_keys();
            let forms = posted_plural_forms(submission, &msgstr_name, k, keys.len())?;
            for (key, value) in keys.into_iter().zip(forms) {
                if let Some(value) = value {
                    entry.msgstr_plural.insert(key, unescape(&value));
                }
            }
        } else if let Some(value) = submission.get(&msgstr_name) {
            entry.msgstr = unescape(value);
        }

        entry.set_flag(
            FUZZY_FLAG,
            is_truthy(submission.get(&format!("fuzzy_field_{}", k))),
        );
        report.updated.push(k);
    }

    Ok(report)
}

/// One posted value per plural form, `None` where a sub-field is missing.
fn posted_plural_forms(
    submission: &Submission,
    name: &str,
    index: usize,
    expected: usize,
) -> Result<Vec<Option<String>>, SubmissionError> {
    let Some(composite) = submission.get(name) else {
        return Ok((0..expected)
            .map(|i| {
                submission
                    .get(&PluralMessageField::sub_field_name(name, i))
                    .cloned()
            })
            .collect());
    };

    let forms = PluralMessageField::decompress(Some(composite))
        .map_err(|source| SubmissionError::PluralFraming { index, source })?;
    if forms.len() != expected {
        return Err(SubmissionError::PluralCount {
            index,
            expected,
            found: forms.len(),
        });
    }
    Ok(forms.into_iter().map(Some).collect())
}

/// Read a submission from a JSON object of strings, booleans or numbers.
/// `null` values are dropped.
pub fn parse_submission(json: &str) -> Result<Submission> {
    let raw: IndexMap<String, Value> =
        serde_json::from_str(json).context("Submission must be a JSON object")?;

    let mut submission = Submission::new();
    for (name, value) in raw {
        let value = match value {
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                bail!("Submission field '{}' must be a string, boolean or number", name)
            }
        };
        submission.insert(name, value);
    }
    Ok(submission)
}

fn is_truthy(value: Option<&String>) -> bool {
    matches!(
        value.map(|v| v.trim()),
        Some("on" | "true" | "True" | "1")
    )
}
