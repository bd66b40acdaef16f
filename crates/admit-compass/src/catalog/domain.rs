use serde::{Deserialize, Serialize};

use crate::scoring::NumericField;

/// Identifier wrapper for catalog universities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniversityId(pub String);

impl UniversityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UniversityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Published admission thresholds. A missing field means the university does
/// not state that requirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversityRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ielts: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toefl: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gre: Option<NumericField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmat: Option<NumericField>,
}

/// Catalog entry read from the university store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub country: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub ranking: Option<u32>,
    /// Annual cost of attendance.
    #[serde(default)]
    pub cost: Option<NumericField>,
    #[serde(default)]
    pub requirements: Option<UniversityRequirements>,
    #[serde(default, alias = "acceptanceRate")]
    pub acceptance_rate: Option<f64>,
    #[serde(default = "default_true", alias = "isPublic")]
    pub is_public: bool,
    #[serde(default, alias = "isFeatured")]
    pub is_featured: bool,
}

impl University {
    pub fn annual_cost(&self) -> Option<f64> {
        self.cost.as_ref().and_then(NumericField::value)
    }
}

fn default_true() -> bool {
    true
}
