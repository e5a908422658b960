//! In-memory store backed by a JSON snapshot file.

use std::{
    collections::{BTreeSet, HashSet},
    fs,
    path::Path,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::model::{
    Language, LanguageCode, Resource, ResourceId, SourceEntity, SourceEntityId, StatsId,
    StatsRecord, Team, Translation, percentage, word_count,
};
use super::repository::{
    LanguageRepository, ResourceRepository, StatsRepository, StoreError, StoreResult,
    TeamRepository, TranslationRepository,
};

/// Serialized shape of the store file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub languages: Vec<Language>,
    pub resources: Vec<Resource>,
    pub source_entities: Vec<SourceEntity>,
    pub translations: Vec<Translation>,
    pub teams: Vec<Team>,
    pub stats: Vec<StatsRecord>,
    pub last_ids: LastIds,
}

/// Highest id ever handed out per table. Ids of deleted rows are never
/// reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LastIds {
    pub resources: u64,
    pub source_entities: u64,
    pub translations: u64,
    pub teams: u64,
    pub stats: u64,
}

impl StoreData {
    fn resource_mut(&mut self, id: ResourceId) -> StoreResult<&mut Resource> {
        self.resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::UnknownResource(id))
    }

    fn entities_of(&self, resource: ResourceId) -> impl Iterator<Item = &SourceEntity> {
        self.source_entities
            .iter()
            .filter(move |e| e.resource == resource)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StoreData) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Load a store file. A missing file is an empty store.
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            log::debug!("store file {:?} not found, starting empty", path);
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_data(data))
    }

    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&*self.read()).map_err(|source| {
            StoreError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json + "\n").map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn snapshot(&self) -> StoreData {
        self.read().clone()
    }

    pub fn add_language(&self, code: &str, name: &str) -> Language {
        let language = Language {
            code: code.into(),
            name: name.to_string(),
        };
        self.write().languages.push(language.clone());
        language
    }

    pub fn add_resource(&self, project: &str, slug: &str, source_language: &str) -> Resource {
        let mut guard = self.write();
        let data = &mut *guard;
        let resource = Resource {
            id: next_id(&mut data.last_ids.resources, data.resources.iter().map(|r| r.id)),
            project: project.to_string(),
            slug: slug.to_string(),
            name: slug.to_string(),
            source_language: source_language.into(),
            total_entities: 0,
            wordcount: 0,
        };
        data.resources.push(resource.clone());
        resource
    }

    pub fn add_source_entity(&self, resource: ResourceId, string: &str) -> SourceEntity {
        let mut guard = self.write();
        let data = &mut *guard;
        let entity = SourceEntity {
            id: next_id(
                &mut data.last_ids.source_entities,
                data.source_entities.iter().map(|e| e.id),
            ),
            resource,
            string: string.to_string(),
        };
        data.source_entities.push(entity.clone());
        entity
    }

    pub fn add_translation(
        &self,
        source_entity: SourceEntityId,
        language: &str,
        string: &str,
    ) -> Translation {
        let mut guard = self.write();
        let data = &mut *guard;
        let translation = Translation {
            id: next_id(
                &mut data.last_ids.translations,
                data.translations.iter().map(|t| t.id),
            ),
            source_entity,
            language: language.into(),
            string: string.to_string(),
        };
        data.translations.push(translation.clone());
        translation
    }

    pub fn add_team(&self, project: &str, language: &str) -> Team {
        let mut guard = self.write();
        let data = &mut *guard;
        let team = Team {
            id: next_id(&mut data.last_ids.teams, data.teams.iter().map(|t| t.id)),
            project: project.to_string(),
            language: language.into(),
        };
        data.teams.push(team.clone());
        team
    }

    pub fn remove_translation(&self, id: u64) -> bool {
        let mut data = self.write();
        let before = data.translations.len();
        data.translations.retain(|t| t.id != id);
        data.translations.len() != before
    }

    pub fn remove_team(&self, id: u64) -> bool {
        let mut data = self.write();
        let before = data.teams.len();
        data.teams.retain(|t| t.id != id);
        data.teams.len() != before
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Files written before `lastIds` existed only have the rows to go by.
fn next_id(last: &mut u64, existing: impl Iterator<Item = u64>) -> u64 {
    let next = existing.fold(*last, u64::max) + 1;
    *last = next;
    next
}

impl ResourceRepository for MemoryStore {
    fn all(&self) -> StoreResult<Vec<Resource>> {
        Ok(self.read().resources.clone())
    }

    fn filter(&self, project: &str, slug: &str) -> StoreResult<Vec<Resource>> {
        Ok(self
            .read()
            .resources
            .iter()
            .filter(|r| r.project == project && r.slug == slug)
            .cloned()
            .collect())
    }

    fn update_aggregates(&self, id: ResourceId) -> StoreResult<Resource> {
        let mut data = self.write();
        let (total, words) = data
            .entities_of(id)
            .fold((0, 0), |(n, w), e| (n + 1, w + word_count(&e.string)));

        let resource = data.resource_mut(id)?;
        resource.total_entities = total;
        resource.wordcount = words;
        Ok(resource.clone())
    }
}

impl TranslationRepository for MemoryStore {
    fn languages_for_resource(&self, resource: ResourceId) -> StoreResult<Vec<LanguageCode>> {
        let data = self.read();
        let entities: HashSet<SourceEntityId> = data.entities_of(resource).map(|e| e.id).collect();
        let languages: BTreeSet<LanguageCode> = data
            .translations
            .iter()
            .filter(|t| entities.contains(&t.source_entity))
            .map(|t| t.language.clone())
            .collect();
        Ok(languages.into_iter().collect())
    }
}

impl LanguageRepository for MemoryStore {
    fn get(&self, code: &LanguageCode) -> StoreResult<Language> {
        self.read()
            .languages
            .iter()
            .find(|l| &l.code == code)
            .cloned()
            .ok_or_else(|| StoreError::UnknownLanguage(code.clone()))
    }
}

impl TeamRepository for MemoryStore {
    fn for_project(&self, project: &str) -> StoreResult<Vec<Team>> {
        Ok(self
            .read()
            .teams
            .iter()
            .filter(|t| t.project == project)
            .cloned()
            .collect())
    }
}

impl StatsRepository for MemoryStore {
    fn get_or_create(
        &self,
        resource: ResourceId,
        language: &LanguageCode,
    ) -> StoreResult<(StatsRecord, bool)> {
        let mut guard = self.write();
        let data = &mut *guard;
        if !data.resources.iter().any(|r| r.id == resource) {
            return Err(StoreError::UnknownResource(resource));
        }
        if let Some(existing) = data
            .stats
            .iter()
            .find(|s| s.resource == resource && &s.language == language)
        {
            return Ok((existing.clone(), false));
        }

        let id = next_id(&mut data.last_ids.stats, data.stats.iter().map(|s| s.id));
        let record = StatsRecord::new(id, resource, language.clone());
        data.stats.push(record.clone());
        Ok((record, true))
    }

    fn update(&self, id: StatsId) -> StoreResult<StatsRecord> {
        let mut data = self.write();
        let position = data
            .stats
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::UnknownStats(id))?;
        let (resource, language) = {
            let record = &data.stats[position];
            (record.resource, record.language.clone())
        };

        let translated_entities: HashSet<SourceEntityId> = data
            .translations
            .iter()
            .filter(|t| t.language == language && !t.string.is_empty())
            .map(|t| t.source_entity)
            .collect();

        let mut total = 0;
        let mut translated = 0;
        let mut translated_wordcount = 0;
        for entity in data.entities_of(resource) {
            total += 1;
            if translated_entities.contains(&entity.id) {
                translated += 1;
                translated_wordcount += word_count(&entity.string);
            }
        }

        let record = &mut data.stats[position];
        record.total = total;
        record.translated = translated;
        record.untranslated = total - translated;
        record.translated_perc = percentage(translated, total);
        record.untranslated_perc = percentage(total - translated, total);
        record.translated_wordcount = translated_wordcount;
        record.last_update = Some(Utc::now());
        Ok(record.clone())
    }

    fn for_resource(&self, resource: ResourceId) -> StoreResult<Vec<StatsRecord>> {
        Ok(self
            .read()
            .stats
            .iter()
            .filter(|s| s.resource == resource)
            .cloned()
            .collect())
    }

    fn delete(&self, id: StatsId) -> StoreResult<()> {
        let mut data = self.write();
        let before = data.stats.len();
        data.stats.retain(|s| s.id != id);
        if data.stats.len() == before {
            return Err(StoreError::UnknownStats(id));
        }
        Ok(())
    }

    fn replace_for_resource(
        &self,
        resource: ResourceId,
        records: Vec<StatsRecord>,
    ) -> StoreResult<()> {
        let mut data = self.write();
        data.stats.retain(|s| s.resource != resource);
        data.stats.extend(records);
        Ok(())
    }
}
