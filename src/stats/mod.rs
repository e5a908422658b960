//! Translation statistics maintenance.
//!
//! - `model`: resources, languages, teams and statistics records
//! - `repository`: the store seams, one trait per entity
//! - `memory`: in-memory store persisted as a JSON snapshot
//! - `selector`: `<project>.<resource>` selectors
//! - `locks`: per-resource refresh locks
//! - `refresher`: the batch reconciliation itself

pub mod locks;
pub mod memory;
pub mod model;
pub mod refresher;
pub mod repository;
pub mod selector;

pub use locks::ResourceLocks;
pub use memory::{LastIds, MemoryStore, StoreData};
pub use model::{
    Language, LanguageCode, Resource, ResourceId, SourceEntity, StatsRecord, Team, Translation,
};
pub use refresher::{
    FailedResource, FailurePolicy, NoProgress, Progress, RefreshError, RefreshEvent,
    RefreshReport, StatsRefresher,
};
pub use repository::{
    LanguageRepository, Repositories, ResourceRepository, StatsRepository, StoreError,
    StoreResult, TeamRepository, TranslationRepository,
};
pub use selector::{MalformedSelector, ResourceSelector, parse_selectors};
