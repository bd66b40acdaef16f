use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::NumericField;

/// Student credentials as read from the profile store.
///
/// Only the fields the scoring engine and stage tracking consume are modeled;
/// everything numeric stays raw until a calculator parses it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub gpa: Option<NumericField>,
    #[serde(default)]
    pub ielts: Option<NumericField>,
    #[serde(default)]
    pub toefl: Option<NumericField>,
    #[serde(default)]
    pub gre: Option<NumericField>,
    #[serde(default)]
    pub gmat: Option<NumericField>,
    #[serde(default)]
    pub budget: Option<NumericField>,
    #[serde(
        default,
        alias = "sopStatus",
        deserialize_with = "blank_status_as_none"
    )]
    pub sop_status: Option<SopStatus>,
    #[serde(default, alias = "isCompleted")]
    pub is_completed: bool,
    #[serde(default)]
    pub stage: Option<JourneyStage>,
}

/// Statement-of-purpose progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum SopStatus {
    #[serde(rename = "Not started")]
    NotStarted,
    Draft,
    Ready,
}

impl SopStatus {
    /// Case-insensitive; `completed` counts as ready and anything unknown as not started.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ready" | "completed" => Self::Ready,
            "draft" => Self::Draft,
            _ => Self::NotStarted,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SopStatus::NotStarted => "Not started",
            SopStatus::Draft => "Draft",
            SopStatus::Ready => "Ready",
        }
    }
}

impl From<String> for SopStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

/// Where a student currently is in the counselling journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JourneyStage {
    #[serde(rename = "Building Profile")]
    BuildingProfile,
    #[serde(rename = "Discovering Universities")]
    DiscoveringUniversities,
    #[serde(rename = "Finalizing Universities")]
    FinalizingUniversities,
    #[serde(rename = "Preparing Applications")]
    PreparingApplications,
}

impl JourneyStage {
    pub const fn label(self) -> &'static str {
        match self {
            JourneyStage::BuildingProfile => "Building Profile",
            JourneyStage::DiscoveringUniversities => "Discovering Universities",
            JourneyStage::FinalizingUniversities => "Finalizing Universities",
            JourneyStage::PreparingApplications => "Preparing Applications",
        }
    }

    /// Resolves the stage shown to the student.
    ///
    /// Incomplete profiles are always still building; a locked university
    /// means applications are being prepared regardless of the stored stage.
    pub fn resolve(profile: Option<&StudentProfile>, has_locked_university: bool) -> Self {
        match profile {
            None => Self::BuildingProfile,
            Some(profile) if !profile.is_completed => Self::BuildingProfile,
            Some(_) if has_locked_university => Self::PreparingApplications,
            Some(profile) => profile.stage.unwrap_or(Self::DiscoveringUniversities),
        }
    }
}

fn blank_status_as_none<'de, D>(deserializer: D) -> Result<Option<SopStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(|value| SopStatus::from_label(&value)))
}
