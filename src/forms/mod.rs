//! Translation forms built from catalog entries.
//!
//! - `escape`: gettext-style escaping of form values
//! - `rows`: textarea height estimate
//! - `status`: translated / fuzzy / untranslated classification
//! - `field`: field model and HTML rendering
//! - `builder`: catalog entries to an ordered [`TranslationForm`]
//! - `plural`: single-value framing of plural forms
//! - `submit`: posted values back onto catalog entries

mod builder;
mod escape;
mod field;
pub mod plural;
mod rows;
mod status;
mod submit;

pub use builder::{FormOptions, TranslationForm, help_text, msgid_label};
pub use escape::{escape, unescape};
pub use field::{
    BooleanField, Field, HiddenField, MessageField, PluralMessageField, RenderField,
};
pub use plural::PluralFramingError;
pub use rows::{DEFAULT_CHARS_PER_ROW, RowText, calculate_rows, calculate_rows_with};
pub use status::{EntryStatus, StatusSource, guess_entry_status};
pub use submit::{
    Submission, SubmissionConflict, SubmissionError, SubmissionReport, apply_submission,
    parse_submission,
};
