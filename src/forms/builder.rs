//! Translation form construction.
//!
//! Every live catalog entry `k` (1-based, obsolete entries are skipped and do
//! not consume a number) contributes four fields, in this order:
//!
//! - `msgid_field_<k>`: hidden, the escaped source text at load time
//! - `fuzzy_field_<k>`: checkbox
//! - `msgstr_field_<k>`: textarea, or one textarea per plural form
//! - `changed_field_<k>`: hidden boolean flipped client side

use indexmap::IndexMap;
use serde::Serialize;

use super::escape::escape;
use super::field::{
    BooleanField, Field, HiddenField, MessageField, PluralMessageField, RenderField, html_escape,
};
use super::rows::{DEFAULT_CHARS_PER_ROW, calculate_rows_with};
use super::status::{EntryStatus, guess_entry_status};
use crate::catalog::CatalogEntry;

/// Knobs for [`TranslationForm::build_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    pub chars_per_row: usize,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            chars_per_row: DEFAULT_CHARS_PER_ROW,
        }
    }
}

/// Ordered field name to field mapping for one catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TranslationForm {
    fields: IndexMap<String, Field>,
}

impl TranslationForm {
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        Self::build_with(entries, FormOptions::default())
    }

    pub fn build_with<'a, I>(entries: I, options: FormOptions) -> Self
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        let mut fields = IndexMap::new();

        for (idx, entry) in entries.into_iter().filter(|e| !e.obsolete).enumerate() {
            let k = idx + 1;
            let status = guess_entry_status(entry).unwrap_or(EntryStatus::Untranslated);
            let fuzzy = status == EntryStatus::Fuzzy;

            let mut attrs = IndexMap::new();
            attrs.insert("class".to_string(), format!("{} msgstr_field_{}", status, k));
            attrs.insert("title".to_string(), escape(&entry.comment));
            attrs.insert(
                "rows".to_string(),
                calculate_rows_with(entry, options.chars_per_row).to_string(),
            );

            let msgstr_field = if entry.has_plural() {
                let initial = entry
                    .sorted_plural_keys()
                    .iter()
                    .map(|key| escape(&entry.msgstr_plural[key]))
                    .collect();
                Field::from(PluralMessageField {
                    label: msgid_label(&[escape(&entry.msgid), escape(&entry.msgid_plural)]),
                    help_text: help_text(entry),
                    sub_label: escape(&entry.msgid_plural),
                    initial,
                    attrs,
                })
            } else {
                Field::from(MessageField {
                    label: msgid_label(&[escape(&entry.msgid)]),
                    help_text: help_text(entry),
                    initial: escape(&entry.msgstr),
                    attrs,
                })
            };

            fields.insert(
                format!("msgid_field_{}", k),
                Field::from(HiddenField {
                    initial: escape(&entry.msgid),
                }),
            );
            fields.insert(
                format!("fuzzy_field_{}", k),
                Field::from(BooleanField {
                    initial: fuzzy,
                    hidden: false,
                }),
            );
            fields.insert(format!("msgstr_field_{}", k), msgstr_field);
            fields.insert(
                format!("changed_field_{}", k),
                Field::from(BooleanField {
                    initial: false,
                    hidden: true,
                }),
            );
        }

        Self { fields }
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of catalog entries on the form.
    pub fn entry_count(&self) -> usize {
        self.fields.len() / 4
    }

    /// Render every field, one `<div>` each, in form order.
    pub fn render_html(&self) -> String {
        self.fields
            .iter()
            .map(|(name, field)| format!(r#"<div class="field">{}</div>"#, field.render(name)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `<small>file (line N), ...</small>` from the entry's source references.
pub fn help_text(entry: &CatalogEntry) -> String {
    let occurrences: Vec<String> = entry
        .occurrences
        .iter()
        .map(|(file, line)| format!("{} (line {})", html_escape(file), html_escape(line)))
        .collect();
    format!("<small>{}</small>", occurrences.join(", "))
}

/// Label markup for a list of (already catalog-escaped) source strings.
pub fn msgid_label(msgids: &[String]) -> String {
    msgids
        .iter()
        .map(|msgid| format!(r#"<span class="msgid">{}</span>"#, html_escape(msgid)))
        .collect::<Vec<_>>()
        .join("<br />")
}
