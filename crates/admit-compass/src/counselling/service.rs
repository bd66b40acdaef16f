use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::advisor::{AdvisorContext, AdvisorUniversity};
use super::application::{ApplicationUpdate, ApplicationView, LockedDocument, LockedTask};
use super::shortlist::{ProfileId, ShortlistEntry, ShortlistError, ShortlistRepository};
use crate::catalog::{CatalogError, CatalogQuery, University, UniversityCatalog, UniversityId};
use crate::profile::{JourneyStage, StudentProfile};
use crate::scoring::{
    compute_strength, rank_by, Category, FitPolicy, FitReport, FitScore, FitScoreCalculator,
    ProfileStrength,
};

/// Number of ranked universities included in the advisor context by default.
pub const DEFAULT_ADVISOR_TOP_N: usize = 5;

/// Service composing the catalog, shortlist store, and fit rubric.
pub struct CounsellingService<C, S> {
    catalog: Arc<C>,
    shortlists: Arc<S>,
    calculator: Arc<FitScoreCalculator>,
    advisor_top_n: usize,
}

/// One catalog university scored for a specific student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityRecommendation {
    #[serde(flatten)]
    pub university: University,
    pub fit_score: FitScore,
    pub category: Category,
    pub is_shortlisted: bool,
    pub is_locked: bool,
}

/// Result of a shortlist request; `created` is false when the entry already existed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistOutcome {
    pub entry: ShortlistEntry,
    pub created: bool,
}

impl<C, S> CounsellingService<C, S>
where
    C: UniversityCatalog + 'static,
    S: ShortlistRepository + 'static,
{
    pub fn new(catalog: Arc<C>, shortlists: Arc<S>, policy: FitPolicy) -> Self {
        Self {
            catalog,
            shortlists,
            calculator: Arc::new(FitScoreCalculator::new(policy)),
            advisor_top_n: DEFAULT_ADVISOR_TOP_N,
        }
    }

    /// Values below 1 are raised to 1.
    pub fn with_advisor_top_n(mut self, top_n: usize) -> Self {
        self.advisor_top_n = top_n.max(1);
        self
    }

    pub fn advisor_top_n(&self) -> usize {
        self.advisor_top_n
    }

    pub fn search(&self, query: &CatalogQuery) -> Result<Vec<University>, CounsellingError> {
        let universities = self.catalog.list()?;
        Ok(query.apply(universities))
    }

    pub fn university(&self, id: &UniversityId) -> Result<University, CounsellingError> {
        self.catalog
            .fetch(id)?
            .ok_or_else(|| CatalogError::NotFound(id.clone()).into())
    }

    /// Detail-page fit breakdown for one university.
    pub fn university_fit(
        &self,
        id: &UniversityId,
        profile: &StudentProfile,
    ) -> Result<FitReport, CounsellingError> {
        let university = self.university(id)?;
        Ok(self.calculator.evaluate_university(profile, &university))
    }

    pub fn profile_strength(&self, profile: Option<&StudentProfile>) -> ProfileStrength {
        compute_strength(profile)
    }

    /// Scores the whole catalog for a student and ranks it by fit.
    pub fn recommend(
        &self,
        profile_id: &ProfileId,
        profile: &StudentProfile,
    ) -> Result<Vec<UniversityRecommendation>, CounsellingError> {
        let universities = self.catalog.list()?;
        let entries: HashMap<UniversityId, ShortlistEntry> = self
            .shortlists
            .for_profile(profile_id)?
            .into_iter()
            .map(|entry| (entry.university_id.clone(), entry))
            .collect();

        let scored = universities
            .into_iter()
            .map(|university| {
                let score = self.calculator.evaluate_university(profile, &university).score;
                let entry = entries.get(&university.id);
                UniversityRecommendation {
                    fit_score: score,
                    category: score.category(),
                    is_shortlisted: entry.is_some(),
                    is_locked: entry.is_some_and(|entry| entry.is_locked),
                    university,
                }
            })
            .collect();

        let ranked = rank_by(scored, |recommendation: &UniversityRecommendation| {
            Some(recommendation.fit_score)
        });
        info!(%profile_id, count = ranked.len(), "ranked university recommendations");
        Ok(ranked)
    }

    /// Find-or-create; shortlisting twice is not an error.
    pub fn shortlist(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
    ) -> Result<ShortlistOutcome, CounsellingError> {
        self.university(university_id)?;

        let now = Utc::now();
        let mut created = false;
        let entry = self.shortlists.update(profile_id, university_id, &mut |slot| {
            if slot.is_none() {
                *slot = Some(ShortlistEntry::new(profile_id.clone(), university_id.clone(), now));
                created = true;
            }
        })?;
        let entry = stored(entry, profile_id, university_id)?;

        if created {
            debug!(%profile_id, %university_id, "university shortlisted");
        }
        Ok(ShortlistOutcome { entry, created })
    }

    /// Locks the university, shortlisting it first when needed.
    pub fn lock(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
    ) -> Result<ShortlistEntry, CounsellingError> {
        self.university(university_id)?;

        let now = Utc::now();
        let entry = self.shortlists.update(profile_id, university_id, &mut |slot| {
            let entry = slot.get_or_insert_with(|| {
                ShortlistEntry::new(profile_id.clone(), university_id.clone(), now)
            });
            entry.is_locked = true;
            entry.updated_at = now;
        })?;
        let entry = stored(entry, profile_id, university_id)?;

        info!(%profile_id, %university_id, "university locked");
        Ok(entry)
    }

    /// Clears the lock; returns `None` when the university was never shortlisted.
    pub fn unlock(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
    ) -> Result<Option<ShortlistEntry>, CounsellingError> {
        self.university(university_id)?;

        let now = Utc::now();
        let entry = self.shortlists.update(profile_id, university_id, &mut |slot| {
            if let Some(entry) = slot.as_mut() {
                entry.is_locked = false;
                entry.updated_at = now;
            }
        })?;

        if entry.is_some() {
            info!(%profile_id, %university_id, "university unlocked");
        }
        Ok(entry)
    }

    /// Every application the student has started, newest first.
    pub fn applications(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<ApplicationView>, CounsellingError> {
        let mut entries = self.shortlists.for_profile(profile_id)?;
        entries.sort_by_key(|entry| Reverse(entry.created_at));

        entries
            .into_iter()
            .map(|entry| -> Result<ApplicationView, CounsellingError> {
                let university = self.catalog.fetch(&entry.university_id)?;
                Ok(ApplicationView { entry, university })
            })
            .collect()
    }

    pub fn update_application(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
        update: &ApplicationUpdate,
    ) -> Result<ShortlistEntry, CounsellingError> {
        let now = Utc::now();
        let entry = self.shortlists.update(profile_id, university_id, &mut |slot| {
            if let Some(entry) = slot.as_mut() {
                update.apply(entry, now);
            }
        })?;

        let entry = entry.ok_or_else(|| CounsellingError::ApplicationNotFound {
            profile_id: profile_id.clone(),
            university_id: university_id.clone(),
        })?;
        info!(%profile_id, %university_id, status = ?entry.status, "application updated");
        Ok(entry)
    }

    /// Tasks across the student's locked universities.
    pub fn locked_tasks(&self, profile_id: &ProfileId) -> Result<Vec<LockedTask>, CounsellingError> {
        let entries = self.shortlists.for_profile(profile_id)?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.is_locked)
            .flat_map(|entry| {
                let university_id = entry.university_id;
                entry.tasks.into_iter().map(move |task| LockedTask {
                    university_id: university_id.clone(),
                    task,
                })
            })
            .collect())
    }

    /// Documents across the student's locked universities.
    pub fn locked_documents(
        &self,
        profile_id: &ProfileId,
    ) -> Result<Vec<LockedDocument>, CounsellingError> {
        let entries = self.shortlists.for_profile(profile_id)?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.is_locked)
            .flat_map(|entry| {
                let university_id = entry.university_id;
                entry.documents.into_iter().map(move |document| LockedDocument {
                    university_id: university_id.clone(),
                    document,
                })
            })
            .collect())
    }

    /// Builds the assistant payload. Without a profile the catalog order is
    /// used and universities carry no score.
    pub fn advisor_context(
        &self,
        profile_id: &ProfileId,
        profile: Option<&StudentProfile>,
        top_n: Option<usize>,
    ) -> Result<AdvisorContext, CounsellingError> {
        let top_n = top_n.unwrap_or(self.advisor_top_n).max(1);
        let entries = self.shortlists.for_profile(profile_id)?;

        let top_universities: Vec<AdvisorUniversity> = match profile {
            Some(profile) => self
                .recommend(profile_id, profile)?
                .into_iter()
                .take(top_n)
                .map(|recommendation| AdvisorUniversity {
                    id: recommendation.university.id,
                    name: recommendation.university.name,
                    country: recommendation.university.country,
                    fit_score: Some(recommendation.fit_score),
                    category: Some(recommendation.category),
                })
                .collect(),
            None => self
                .catalog
                .list()?
                .into_iter()
                .take(top_n)
                .map(|university| AdvisorUniversity {
                    id: university.id,
                    name: university.name,
                    country: university.country,
                    fit_score: None,
                    category: None,
                })
                .collect(),
        };

        let mut shortlisted = Vec::new();
        let mut locked = Vec::new();
        for entry in &entries {
            let name = self
                .catalog
                .fetch(&entry.university_id)?
                .map(|university| university.name)
                .unwrap_or_else(|| entry.university_id.0.clone());
            if entry.is_locked {
                locked.push(name.clone());
            }
            shortlisted.push(name);
        }

        let has_locked = entries.iter().any(|entry| entry.is_locked);
        Ok(AdvisorContext {
            profile_id: profile_id.clone(),
            stage: JourneyStage::resolve(profile, has_locked),
            strength: compute_strength(profile),
            top_universities,
            shortlisted,
            locked,
            generated_at: Utc::now(),
        })
    }
}

/// Error raised by the counselling service.
#[derive(Debug, thiserror::Error)]
pub enum CounsellingError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Shortlist(#[from] ShortlistError),
    #[error("no application for {university_id} on profile {profile_id}")]
    ApplicationNotFound {
        profile_id: ProfileId,
        university_id: UniversityId,
    },
}

fn stored(
    entry: Option<ShortlistEntry>,
    profile_id: &ProfileId,
    university_id: &UniversityId,
) -> Result<ShortlistEntry, ShortlistError> {
    entry.ok_or_else(|| ShortlistError::Missing {
        profile_id: profile_id.clone(),
        university_id: university_id.clone(),
    })
}
