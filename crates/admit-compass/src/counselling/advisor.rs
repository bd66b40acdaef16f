use chrono::{DateTime, Utc};
use serde::Serialize;

use super::shortlist::ProfileId;
use crate::catalog::UniversityId;
use crate::profile::JourneyStage;
use crate::scoring::{Category, FitScore, ProfileStrength};

/// Context handed to the external chat assistant when it builds a prompt.
///
/// Everything serializes to plain strings and numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorContext {
    pub profile_id: ProfileId,
    pub stage: JourneyStage,
    pub strength: ProfileStrength,
    pub top_universities: Vec<AdvisorUniversity>,
    pub shortlisted: Vec<String>,
    pub locked: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorUniversity {
    pub id: UniversityId,
    pub name: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_score: Option<FitScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl AdvisorContext {
    /// One-paragraph plain-text rendering for prompt templates.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Stage: {}. Profile strength {}/100.",
            self.stage.label(),
            self.strength.overall
        );

        if self.top_universities.is_empty() {
            summary.push_str(" No universities available.");
        } else {
            let names: Vec<String> = self
                .top_universities
                .iter()
                .map(|university| match (university.fit_score, university.category) {
                    (Some(score), Some(category)) => {
                        format!("{} ({score}, {category})", university.name)
                    }
                    _ => university.name.clone(),
                })
                .collect();
            summary.push_str(&format!(" Top universities: {}.", names.join(", ")));
        }

        if self.locked.is_empty() && self.shortlisted.is_empty() {
            summary.push_str(" Shortlist: none.");
        } else {
            summary.push_str(&format!(" Shortlist: {}.", self.shortlisted.join(", ")));
            if !self.locked.is_empty() {
                summary.push_str(&format!(" Locked: {}.", self.locked.join(", ")));
            }
        }

        summary
    }
}
