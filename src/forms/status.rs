use std::fmt;

use serde::Serialize;

use crate::catalog::{CatalogEntry, FUZZY_FLAG};

/// Translation state of a catalog entry, as shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Translated,
    Fuzzy,
    Untranslated,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Translated => write!(f, "translated"),
            EntryStatus::Fuzzy => write!(f, "fuzzy"),
            EntryStatus::Untranslated => write!(f, "untranslated"),
        }
    }
}

/// What the classifier needs to know about an entry.
pub trait StatusSource {
    fn is_translated(&self) -> bool;
    fn is_obsolete(&self) -> bool;
    fn has_flag(&self, flag: &str) -> bool;
}

impl StatusSource for CatalogEntry {
    fn is_translated(&self) -> bool {
        CatalogEntry::is_translated(self)
    }

    fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    fn has_flag(&self, flag: &str) -> bool {
        CatalogEntry::has_flag(self, flag)
    }
}

/// Classify an entry. Obsolete entries that are not fuzzy get no status.
///
/// Order matters: a translated entry stays `Translated` even when flagged fuzzy.
pub fn guess_entry_status<E: StatusSource + ?Sized>(entry: &E) -> Option<EntryStatus> {
    if entry.is_translated() && !entry.is_obsolete() {
        Some(EntryStatus::Translated)
    } else if entry.has_flag(FUZZY_FLAG) {
        Some(EntryStatus::Fuzzy)
    } else if !entry.is_translated() && !entry.is_obsolete() {
        Some(EntryStatus::Untranslated)
    } else {
        None
    }
}
