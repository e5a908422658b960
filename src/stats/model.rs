//! Entities the statistics refresher works on.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ResourceId = u64;
pub type SourceEntityId = u64;
pub type StatsId = u64;

/// Locale identifier, e.g. `pt_BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: LanguageCode,
    pub name: String,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    /// Slug of the owning project.
    pub project: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    pub source_language: LanguageCode,
    #[serde(default)]
    pub total_entities: usize,
    #[serde(default)]
    pub wordcount: usize,
}

impl Resource {
    /// `<project>.<slug>`, the form selectors use.
    pub fn full_slug(&self) -> String {
        format!("{}.{}", self.project, self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEntity {
    pub id: SourceEntityId,
    pub resource: ResourceId,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: u64,
    pub source_entity: SourceEntityId,
    pub language: LanguageCode,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub project: String,
    pub language: LanguageCode,
}

/// Cached completion figures for one (resource, language) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub id: StatsId,
    pub resource: ResourceId,
    pub language: LanguageCode,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub translated: usize,
    #[serde(default)]
    pub untranslated: usize,
    #[serde(default)]
    pub translated_perc: u32,
    #[serde(default)]
    pub untranslated_perc: u32,
    #[serde(default)]
    pub translated_wordcount: usize,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

impl StatsRecord {
    pub fn new(id: StatsId, resource: ResourceId, language: LanguageCode) -> Self {
        Self {
            id,
            resource,
            language,
            total: 0,
            translated: 0,
            untranslated: 0,
            translated_perc: 0,
            untranslated_perc: 0,
            translated_wordcount: 0,
            last_update: None,
        }
    }
}

/// Whitespace separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `part * 100 / total`, rounded down; 0 for an empty total.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (part * 100 / total) as u32
    }
}
