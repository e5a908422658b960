//! `.po` files read and written through `rspolib`.
//!
//! The parsed document is kept whole, so writing a catalog back only touches
//! what a form can change: translations and flags. Comments, references,
//! header and obsolete entries come out the way `rspolib` read them.

use std::{fmt, fs, path::Path};

use indexmap::IndexMap;
use rspolib::{FileOptions, POEntry, POFile, pofile};
use thiserror::Error;

use super::entry::CatalogEntry;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Syntax(String),
    #[error("failed to read catalog {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A parsed `.po` file.
pub struct Catalog {
    metadata: IndexMap<String, String>,
    entries: Vec<CatalogEntry>,
    /// Index into `document.entries` of each item of `entries`.
    positions: Vec<usize>,
    document: POFile,
}

impl Catalog {
    fn from_document(document: POFile) -> Self {
        let mut metadata: Vec<(String, String)> = document
            .metadata
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        metadata.sort();

        let (positions, entries): (Vec<usize>, Vec<CatalogEntry>) = document
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !is_header(entry))
            .map(|(position, entry)| (position, to_catalog_entry(entry)))
            .unzip();

        Self {
            metadata: metadata.into_iter().collect(),
            entries,
            positions,
            document,
        }
    }

    /// Header `Key: Value` pairs, sorted by key.
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries may be edited in place; the set of entries is fixed.
    pub fn entries_mut(&mut self) -> &mut [CatalogEntry] {
        &mut self.entries
    }

    /// Entries that are still live in the catalog.
    pub fn active_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| !e.obsolete)
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("metadata", &self.metadata)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Parse a `.po` file from disk. The file must be UTF-8.
pub fn parse_file(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&content)
}

/// Parse `.po` text into a [`Catalog`]. A leading byte order mark is ignored.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    let document = pofile(FileOptions::from(content.as_bytes().to_vec()))
        .map_err(|e| CatalogError::Syntax(e.to_string()))?;
    Ok(Catalog::from_document(document))
}

/// Serialize `catalog` with the translations and flags of its entries
/// written into the parsed document.
pub fn write_catalog(catalog: &mut Catalog) -> String {
    for (&position, entry) in catalog.positions.iter().zip(&catalog.entries) {
        store_translation(&mut catalog.document.entries[position], entry);
    }
    catalog.document.to_string()
}

/// The header entry carries the metadata and is not a message.
fn is_header(entry: &POEntry) -> bool {
    entry.msgid.is_empty() && entry.msgctxt.is_none() && !entry.obsolete
}

fn to_catalog_entry(entry: &POEntry) -> CatalogEntry {
    CatalogEntry {
        msgctxt: entry.msgctxt.clone(),
        msgid: entry.msgid.clone(),
        msgid_plural: entry.msgid_plural.clone().unwrap_or_default(),
        msgstr: entry.msgstr.clone().unwrap_or_default(),
        msgstr_plural: entry.msgstr_plural.iter().cloned().enumerate().collect(),
        flags: entry.flags.clone(),
        obsolete: entry.obsolete,
        occurrences: entry.occurrences.clone(),
        comment: entry.comment.clone().unwrap_or_default(),
        tcomment: entry.tcomment.clone().unwrap_or_default(),
        previous_msgid: entry.previous_msgid.clone(),
    }
}

fn store_translation(target: &mut POEntry, entry: &CatalogEntry) {
    if entry.has_plural() {
        target.msgstr_plural = entry
            .sorted_plural_keys()
            .iter()
            .map(|key| entry.msgstr_plural[key].clone())
            .collect();
    } else {
        target.msgstr = Some(entry.msgstr.clone());
    }
    target.flags = entry.flags.clone();
}
