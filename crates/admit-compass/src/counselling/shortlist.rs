use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::application::{ApplicationDocument, ApplicationTask};
use crate::catalog::UniversityId;

/// Identifier of the student profile a shortlist belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress of the application a student is preparing for a university.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Submitted,
    Accepted,
    Rejected,
    Waitlisted,
}

/// A university a student has shortlisted, optionally locked in as a final choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub profile_id: ProfileId,
    pub university_id: UniversityId,
    pub is_locked: bool,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<ApplicationTask>,
    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortlistEntry {
    pub fn new(profile_id: ProfileId, university_id: UniversityId, now: DateTime<Utc>) -> Self {
        Self {
            profile_id,
            university_id,
            is_locked: false,
            status: ApplicationStatus::NotStarted,
            deadline: None,
            tasks: Vec::new(),
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Storage abstraction for shortlist entries, keyed by (profile, university).
pub trait ShortlistRepository: Send + Sync {
    /// Runs `change` on the slot for (profile, university) while holding the
    /// store's write lock, then returns what the slot holds afterwards.
    fn update(
        &self,
        profile_id: &ProfileId,
        university_id: &UniversityId,
        change: &mut dyn FnMut(&mut Option<ShortlistEntry>),
    ) -> Result<Option<ShortlistEntry>, ShortlistError>;
    fn for_profile(&self, profile_id: &ProfileId) -> Result<Vec<ShortlistEntry>, ShortlistError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ShortlistError {
    #[error("shortlist store unavailable: {0}")]
    Unavailable(String),
    #[error("shortlist store kept no entry for {profile_id}/{university_id}")]
    Missing {
        profile_id: ProfileId,
        university_id: UniversityId,
    },
}
