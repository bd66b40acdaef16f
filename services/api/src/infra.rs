use admit_compass::catalog::{
    default_catalog, import_universities, load_catalog_csv, CatalogError, University,
    UniversityCatalog, UniversityId,
};
use admit_compass::counselling::{ProfileId, ShortlistEntry, ShortlistError, ShortlistRepository};
use admit_compass::error::AppError;
use admit_compass::profile::StudentProfile;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryCatalog {
    universities: Arc<Mutex<Vec<University>>>,
}

impl UniversityCatalog for InMemoryCatalog {
    fn list(&self) -> Result<Vec<University>, CatalogError> {
        let guard = self.universities.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn fetch(&self, id: &UniversityId) -> Result<Option<University>, CatalogError> {
        let guard = self.universities.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|university| &university.id == id).cloned())
    }

    fn upsert(&self, university: University) -> Result<bool, CatalogError> {
        let mut guard = self.universities.lock().expect("catalog mutex poisoned");
        if let Some(existing) = guard.iter_mut().find(|existing| existing.id == university.id) {
            *existing = university;
            return Ok(false);
        }
        guard.push(university);
        Ok(true)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryShortlistRepository {
    entries: Arc<Mutex<HashMap<(ProfileId, UniversityId), ShortlistEntry>>>,
}

impl ShortlistRepository for InMemoryShortlistRepository {
    fn update(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
        change: &mut dyn FnMut(&mut Option<ShortlistEntry>),
    ) -> Result<Option<ShortlistEntry>, ShortlistError> {
        let mut guard = self.entries.lock().expect("shortlist mutex poisoned");
        let key = (profile_id.clone(), university_id.clone());
        let mut slot = guard.get(&key).cloned();
        change(&mut slot);
        match &slot {
            Some(entry) => guard.insert(key, entry.clone()),
            None => guard.remove(&key),
        };
        Ok(slot)
    }

    fn for_profile(&self, profile_id: &ProfileId) -> Result<Vec<ShortlistEntry>, ShortlistError> {
        let guard = self.entries.lock().expect("shortlist mutex poisoned");
        let mut entries: Vec<ShortlistEntry> = guard
            .values()
            .filter(|entry| &entry.profile_id == profile_id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.created_at);
        Ok(entries)
    }
}

/// Reads the catalog export when a path is given, otherwise the built-in seed.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Vec<University>, AppError> {
    match path {
        Some(path) => {
            let universities = load_catalog_csv(File::open(path)?)?;
            info!(path = %path.display(), count = universities.len(), "catalog csv parsed");
            Ok(universities)
        }
        None => Ok(default_catalog()),
    }
}

/// Builds the serving catalog by upserting every loaded university.
pub(crate) fn populate_catalog(path: Option<&Path>) -> Result<InMemoryCatalog, AppError> {
    let catalog = InMemoryCatalog::default();
    let summary = import_universities(&catalog, load_catalog(path)?)?;
    info!(
        inserted = summary.inserted,
        replaced = summary.replaced,
        "catalog populated"
    );
    Ok(catalog)
}

pub(crate) fn read_profile(path: &Path) -> Result<StudentProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
