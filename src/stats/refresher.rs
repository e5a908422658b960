//! Batch reconciliation of per-language statistics records.
//!
//! For every selected resource the refresher makes sure a [`StatsRecord`]
//! exists and is recomputed for each relevant language (translated
//! languages, project team languages and the source language), then deletes
//! the records of every other language.
//!
//! [`StatsRecord`]: super::model::StatsRecord

use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, PoisonError},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::locks::ResourceLocks;
use super::model::{Language, LanguageCode, Resource, ResourceId};
use super::repository::{Repositories, StoreError, StoreResult};
use super::selector::{MalformedSelector, parse_selectors};

/// What to do when one resource of a batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Log it, record it in the report and carry on.
    #[default]
    Isolate,
    /// Abort the batch.
    FailFast,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    MalformedSelector(#[from] MalformedSelector),
    #[error("No resources suitable for updating found")]
    NoResourcesFound,
    #[error("failed to update resource {resource}")]
    Resource {
        resource: String,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub enum RefreshEvent<'a> {
    Started {
        total: usize,
    },
    Resource {
        resource: &'a Resource,
        index: usize,
        total: usize,
    },
    Language(&'a Language),
    TeamLanguage(&'a Language),
    Removed(&'a LanguageCode),
    Failed {
        resource: &'a Resource,
        error: &'a StoreError,
    },
}

impl fmt::Display for RefreshEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { total } => {
                write!(f, "A total of {} resources are listed for updating.", total)
            }
            Self::Resource {
                resource,
                index,
                total,
            } => write!(
                f,
                "Updating resource {}.{} ({} of {})",
                resource.project, resource.slug, index, total
            ),
            Self::Language(language) => {
                write!(f, "Calculating statistics for language {}", language)
            }
            Self::TeamLanguage(language) => {
                write!(f, "Calculating statistics for team language {}", language)
            }
            Self::Removed(code) => write!(f, "Removing statistics for language {}", code),
            Self::Failed { resource, error } => {
                write!(f, "Failed to update resource {}: {}", resource.full_slug(), error)
            }
        }
    }
}

/// Receives refresh events as they happen.
pub trait Progress {
    fn report(&self, event: &RefreshEvent<'_>);
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&self, _event: &RefreshEvent<'_>) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedResource {
    pub resource: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    /// `<project>.<slug>` of every resource refreshed without error.
    pub resources: Vec<String>,
    /// Records recomputed, counting each recomputation.
    pub refreshed: usize,
    pub created: usize,
    pub removed: usize,
    pub failed: Vec<FailedResource>,
}

impl RefreshReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct StatsRefresher<'a, S: ?Sized> {
    store: &'a S,
    policy: FailurePolicy,
    progress: &'a dyn Progress,
    locks: Arc<ResourceLocks>,
}

impl<'a, S> StatsRefresher<'a, S>
where
    S: Repositories + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            policy: FailurePolicy::default(),
            progress: &NoProgress,
            locks: Arc::default(),
        }
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Share per-resource locks with other refreshers.
    pub fn locks(mut self, locks: Arc<ResourceLocks>) -> Self {
        self.locks = locks;
        self
    }

    /// Refresh the resources named by `selectors`, or every resource when
    /// there are none.
    pub fn refresh<T: AsRef<str>>(&self, selectors: &[T]) -> Result<RefreshReport, RefreshError> {
        let resources = self.resolve(selectors)?;
        if resources.is_empty() {
            return Err(RefreshError::NoResourcesFound);
        }

        let total = resources.len();
        self.progress.report(&RefreshEvent::Started { total });

        let mut report = RefreshReport::default();
        for (idx, resource) in resources.iter().enumerate() {
            self.progress.report(&RefreshEvent::Resource {
                resource,
                index: idx + 1,
                total,
            });

            match self.refresh_resource(resource) {
                Ok(tally) => {
                    report.refreshed += tally.refreshed;
                    report.created += tally.created;
                    report.removed += tally.removed;
                    report.resources.push(resource.full_slug());
                }
                Err(error) => {
                    log::error!(
                        "failed to update resource {}: {}",
                        resource.full_slug(),
                        error
                    );
                    self.progress.report(&RefreshEvent::Failed {
                        resource,
                        error: &error,
                    });
                    match self.policy {
                        FailurePolicy::FailFast => {
                            return Err(RefreshError::Resource {
                                resource: resource.full_slug(),
                                source: error,
                            });
                        }
                        FailurePolicy::Isolate => report.failed.push(FailedResource {
                            resource: resource.full_slug(),
                            error: error.to_string(),
                        }),
                    }
                }
            }
        }

        Ok(report)
    }

    /// Every selector is validated before any lookup happens.
    fn resolve<T: AsRef<str>>(&self, selectors: &[T]) -> Result<Vec<Resource>, RefreshError> {
        if selectors.is_empty() {
            return Ok(self.store.all()?);
        }

        let selectors = parse_selectors(selectors)?;
        let mut resources = Vec::new();
        for selector in selectors {
            let matched = self.store.filter(&selector.project, &selector.slug)?;
            if matched.is_empty() {
                log::warn!("no resource matches {}", selector);
            }
            resources.extend(matched);
        }
        Ok(resources)
    }

    /// Reconcile one resource under its lock. On failure the resource's
    /// records are put back the way they were.
    fn refresh_resource(&self, resource: &Resource) -> StoreResult<RefreshReport> {
        let lock = self.locks.lock_for(resource.id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let before = self.store.for_resource(resource.id)?;
        let mut tally = RefreshReport::default();
        match self.reconcile(resource, &mut tally) {
            Ok(()) => Ok(tally),
            Err(error) => {
                if let Err(restore) = self.store.replace_for_resource(resource.id, before) {
                    log::error!(
                        "failed to restore statistics of {}: {}",
                        resource.full_slug(),
                        restore
                    );
                }
                Err(error)
            }
        }
    }

    fn reconcile(&self, resource: &Resource, report: &mut RefreshReport) -> StoreResult<()> {
        let resource = self.store.update_aggregates(resource.id)?;
        log::debug!(
            "{}: {} entities, {} words",
            resource.full_slug(),
            resource.total_entities,
            resource.wordcount
        );

        let mut relevant: HashSet<LanguageCode> = HashSet::new();

        for code in self.store.languages_for_resource(resource.id)? {
            let language = self.store.get(&code)?;
            self.progress.report(&RefreshEvent::Language(&language));
            self.recompute(resource.id, &code, report)?;
            relevant.insert(code);
        }

        for team in self.store.for_project(&resource.project)? {
            let language = self.store.get(&team.language)?;
            self.progress.report(&RefreshEvent::TeamLanguage(&language));
            self.recompute(resource.id, &team.language, report)?;
            relevant.insert(team.language);
        }

        // the source language keeps a record even without translations
        if relevant.insert(resource.source_language.clone()) {
            self.recompute(resource.id, &resource.source_language, report)?;
        }

        for record in self.store.for_resource(resource.id)? {
            if !relevant.contains(&record.language) {
                self.store.delete(record.id)?;
                log::debug!("removed statistics of {} for {}", record.language, resource.full_slug());
                self.progress.report(&RefreshEvent::Removed(&record.language));
                report.removed += 1;
            }
        }

        Ok(())
    }

    fn recompute(
        &self,
        resource: ResourceId,
        language: &LanguageCode,
        report: &mut RefreshReport,
    ) -> StoreResult<()> {
        let (record, created) = self.store.get_or_create(resource, language)?;
        self.store.update(record.id)?;
        report.refreshed += 1;
        if created {
            report.created += 1;
        }
        Ok(())
    }
}
