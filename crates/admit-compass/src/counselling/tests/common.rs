use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::catalog::{
    default_catalog, CatalogError, University, UniversityCatalog, UniversityId,
};
use crate::counselling::shortlist::{
    ProfileId, ShortlistEntry, ShortlistError, ShortlistRepository,
};
use crate::counselling::{counselling_router, CounsellingService};
use crate::profile::{SopStatus, StudentProfile};
use crate::scoring::{FitPolicy, NumericField};

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    universities: Arc<Mutex<Vec<University>>>,
}

impl MemoryCatalog {
    pub(super) fn seeded() -> Self {
        Self::with(default_catalog())
    }

    pub(super) fn with(universities: Vec<University>) -> Self {
        Self {
            universities: Arc::new(Mutex::new(universities)),
        }
    }
}

impl UniversityCatalog for MemoryCatalog {
    fn list(&self) -> Result<Vec<University>, CatalogError> {
        Ok(self.universities.lock().expect("catalog mutex poisoned").clone())
    }

    fn fetch(&self, id: &UniversityId) -> Result<Option<University>, CatalogError> {
        let guard = self.universities.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|university| &university.id == id).cloned())
    }

    fn upsert(&self, university: University) -> Result<bool, CatalogError> {
        let mut guard = self.universities.lock().expect("catalog mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == university.id) {
            Some(existing) => {
                *existing = university;
                Ok(false)
            }
            None => {
                guard.push(university);
                Ok(true)
            }
        }
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryShortlists {
    entries: Arc<Mutex<BTreeMap<(ProfileId, UniversityId), ShortlistEntry>>>,
    pause: Duration,
}

impl MemoryShortlists {
    /// Store that sleeps inside every update, for interleaving tests.
    pub(super) fn slow(pause: Duration) -> Self {
        Self {
            pause,
            ..Self::default()
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.lock().expect("shortlist mutex poisoned").len()
    }
}

impl ShortlistRepository for MemoryShortlists {
    fn update(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
        change: &mut dyn FnMut(&mut Option<ShortlistEntry>),
    ) -> Result<Option<ShortlistEntry>, ShortlistError> {
        let mut guard = self.entries.lock().expect("shortlist mutex poisoned");
        let key = (profile_id.clone(), university_id.clone());
        let mut slot = guard.remove(&key);
        // Widens the window between reading and writing the slot.
        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
        change(&mut slot);
        if let Some(entry) = &slot {
            guard.insert(key, entry.clone());
        }
        Ok(slot)
    }

    fn for_profile(&self, profile_id: &ProfileId) -> Result<Vec<ShortlistEntry>, ShortlistError> {
        let guard = self.entries.lock().expect("shortlist mutex poisoned");
        Ok(guard
            .values()
            .filter(|entry| &entry.profile_id == profile_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableShortlists;

impl ShortlistRepository for UnavailableShortlists {
    fn update(
        &self,
        _profile_id: &ProfileId,
        _university_id: &UniversityId,
        _change: &mut dyn FnMut(&mut Option<ShortlistEntry>),
    ) -> Result<Option<ShortlistEntry>, ShortlistError> {
        Err(ShortlistError::Unavailable("database offline".to_string()))
    }

    fn for_profile(&self, _profile_id: &ProfileId) -> Result<Vec<ShortlistEntry>, ShortlistError> {
        Err(ShortlistError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = CounsellingService<MemoryCatalog, MemoryShortlists>;

pub(super) fn build_service() -> (MemoryService, MemoryCatalog, MemoryShortlists) {
    build_service_with(MemoryShortlists::default())
}

pub(super) fn build_service_with(
    shortlists: MemoryShortlists,
) -> (MemoryService, MemoryCatalog, MemoryShortlists) {
    let catalog = MemoryCatalog::seeded();
    let service = CounsellingService::new(
        Arc::new(catalog.clone()),
        Arc::new(shortlists.clone()),
        FitPolicy::default(),
    );
    (service, catalog, shortlists)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    counselling_router(Arc::new(service))
}

pub(super) fn profile_id() -> ProfileId {
    ProfileId("student-42".to_string())
}

pub(super) fn mit() -> UniversityId {
    UniversityId("massachusetts-institute-of-technology-mit".to_string())
}

pub(super) fn eth() -> UniversityId {
    UniversityId("eth-zurich".to_string())
}

/// Matches MIT's published requirements exactly.
pub(super) fn strong_profile() -> StudentProfile {
    StudentProfile {
        gpa: Some(NumericField::Number(3.8)),
        ielts: Some(NumericField::Number(7.5)),
        gre: Some(NumericField::Number(325.0)),
        budget: Some(NumericField::Number(55000.0)),
        sop_status: Some(SopStatus::Ready),
        is_completed: true,
        ..StudentProfile::default()
    }
}

/// Modest credentials on a tight budget, sent the way the profile store encodes them.
pub(super) fn modest_profile() -> StudentProfile {
    StudentProfile {
        gpa: Some(NumericField::from("3.40")),
        toefl: Some(NumericField::from("96")),
        budget: Some(NumericField::from("30000")),
        sop_status: Some(SopStatus::Draft),
        is_completed: true,
        ..StudentProfile::default()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
