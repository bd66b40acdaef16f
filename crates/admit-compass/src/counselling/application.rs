//! Application tracking for shortlisted universities: status, deadline, and
//! the task and document checklists a student keeps per application.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::shortlist::{ApplicationStatus, ShortlistEntry};
use crate::catalog::{University, UniversityId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDocument {
    pub name: String,
    #[serde(default, alias = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub uploaded: bool,
}

/// Partial update of an application. Absent fields are left untouched and
/// checklists are replaced wholesale when present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(default, alias = "applicationStatus")]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Option<Vec<ApplicationTask>>,
    #[serde(default)]
    pub documents: Option<Vec<ApplicationDocument>>,
}

impl ApplicationUpdate {
    pub fn apply(&self, entry: &mut ShortlistEntry, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(deadline) = self.deadline {
            entry.deadline = Some(deadline);
        }
        if let Some(tasks) = &self.tasks {
            entry.tasks = tasks.clone();
        }
        if let Some(documents) = &self.documents {
            entry.documents = documents.clone();
        }
        entry.updated_at = now;
    }
}

/// A shortlist entry joined with its catalog university.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub entry: ShortlistEntry,
    /// `None` when the university has since left the catalog.
    pub university: Option<University>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedTask {
    pub university_id: UniversityId,
    #[serde(flatten)]
    pub task: ApplicationTask,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockedDocument {
    pub university_id: UniversityId,
    #[serde(flatten)]
    pub document: ApplicationDocument,
}
