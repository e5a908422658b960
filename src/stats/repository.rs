//! Data-store seams of the refresher, one trait per entity type.

use std::path::PathBuf;

use thiserror::Error;

use super::model::{Language, LanguageCode, Resource, ResourceId, StatsId, StatsRecord, Team};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown resource id {0}")]
    UnknownResource(ResourceId),
    #[error("unknown language '{0}'")]
    UnknownLanguage(LanguageCode),
    #[error("unknown statistics record id {0}")]
    UnknownStats(StatsId),
    #[error("failed to access store file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid store file {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait ResourceRepository {
    fn all(&self) -> StoreResult<Vec<Resource>>;

    /// Resources of `project` with the given slug; usually zero or one.
    fn filter(&self, project: &str, slug: &str) -> StoreResult<Vec<Resource>>;

    /// Recompute and persist `total_entities` and `wordcount`.
    fn update_aggregates(&self, id: ResourceId) -> StoreResult<Resource>;
}

pub trait TranslationRepository {
    /// Distinct languages with a translation of one of the resource's
    /// source entities, ordered by code.
    fn languages_for_resource(&self, resource: ResourceId) -> StoreResult<Vec<LanguageCode>>;
}

pub trait LanguageRepository {
    fn get(&self, code: &LanguageCode) -> StoreResult<Language>;
}

pub trait TeamRepository {
    fn for_project(&self, project: &str) -> StoreResult<Vec<Team>>;
}

pub trait StatsRepository {
    /// The record for (resource, language), created if missing. The flag
    /// tells whether it was created.
    fn get_or_create(
        &self,
        resource: ResourceId,
        language: &LanguageCode,
    ) -> StoreResult<(StatsRecord, bool)>;

    /// Recompute a record's figures.
    fn update(&self, id: StatsId) -> StoreResult<StatsRecord>;

    fn for_resource(&self, resource: ResourceId) -> StoreResult<Vec<StatsRecord>>;

    fn delete(&self, id: StatsId) -> StoreResult<()>;

    /// Swap every record of `resource` for `records`.
    fn replace_for_resource(
        &self,
        resource: ResourceId,
        records: Vec<StatsRecord>,
    ) -> StoreResult<()>;
}

/// Everything the refresher needs from a store.
pub trait Repositories:
    ResourceRepository + TranslationRepository + LanguageRepository + TeamRepository + StatsRepository
{
}

impl<T> Repositories for T where
    T: ResourceRepository
        + TranslationRepository
        + LanguageRepository
        + TeamRepository
        + StatsRepository
{
}
