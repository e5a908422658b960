use indexmap::IndexMap;
use serde::Serialize;

/// Flag gettext tools use to mark low-confidence translations.
pub const FUZZY_FLAG: &str = "fuzzy";

/// One message of a catalog.
///
/// `msgstr_plural` maps plural index to text. Entries built by hand may list
/// the forms in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: String,
    pub msgstr: String,
    pub msgstr_plural: IndexMap<usize, String>,
    pub flags: Vec<String>,
    pub obsolete: bool,
    /// `(file, line)` pairs from `#:` comments. `line` is empty when the
    /// reference carries no line number.
    pub occurrences: Vec<(String, String)>,
    /// Extracted comments (`#.`).
    pub comment: String,
    /// Translator comments (`# `).
    pub tcomment: String,
    pub previous_msgid: Option<String>,
}

impl CatalogEntry {
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        Self {
            msgid: msgid.into(),
            msgstr: msgstr.into(),
            ..Self::default()
        }
    }

    pub fn plural(
        msgid: impl Into<String>,
        msgid_plural: impl Into<String>,
        forms: impl IntoIterator<Item = (usize, String)>,
    ) -> Self {
        Self {
            msgid: msgid.into(),
            msgid_plural: msgid_plural.into(),
            msgstr_plural: forms.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn has_plural(&self) -> bool {
        !self.msgid_plural.is_empty()
    }

    pub fn is_fuzzy(&self) -> bool {
        self.has_flag(FUZZY_FLAG)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Gettext's notion of "translated": obsolete and fuzzy entries never are,
    /// plural entries need every form filled in.
    pub fn is_translated(&self) -> bool {
        if self.obsolete || self.is_fuzzy() {
            return false;
        }
        if !self.msgstr.is_empty() {
            return true;
        }
        !self.msgstr_plural.is_empty() && self.msgstr_plural.values().all(|v| !v.is_empty())
    }

    /// Add or remove `flag`, keeping the position of existing flags.
    pub fn set_flag(&mut self, flag: &str, enabled: bool) {
        let present = self.has_flag(flag);
        if enabled && !present {
            self.flags.push(flag.to_string());
        } else if !enabled && present {
            self.flags.retain(|f| f != flag);
        }
    }

    /// Plural form indices in ascending order.
    pub fn sorted_plural_keys(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.msgstr_plural.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}
