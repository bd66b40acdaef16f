//! University fit rubric.
//!
//! Scores one student profile against one university's stated requirements
//! and annual cost:
//!
//! | factor        | weight | half credit when                       |
//! |---------------|--------|----------------------------------------|
//! | academic      | 40     | GPA within 0.5 of the requirement      |
//! | english exam  | 30     | IELTS within 0.5, or TOEFL within 10   |
//! | graduate exam | 20     | GRE within 20, or GMAT within 50       |
//! | budget        | 10     | cost within 120% of budget             |
//!
//! A factor only counts when both sides carry comparable data, and the total
//! is normalized against the factors that counted.

use serde::{Deserialize, Serialize};

use super::category::{classify, Category};
use super::numeric::{parse_optional, NumericField};
use super::policy::FitPolicy;
use super::rubric::{Rubric, RubricComponent};
use crate::catalog::{University, UniversityRequirements};
use crate::profile::StudentProfile;

/// Integer fit score in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FitScore(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fit score {0} is outside 0..=100")]
pub struct FitScoreOutOfRange(pub u8);

impl FitScore {
    pub const ZERO: FitScore = FitScore(0);

    /// Values above 100 are clamped.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn category(self) -> Category {
        classify(self.0)
    }
}

impl TryFrom<u8> for FitScore {
    type Error = FitScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(FitScoreOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<FitScore> for u8 {
    fn from(score: FitScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for FitScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitFactor {
    Academic,
    EnglishExam,
    GraduateExam,
    Budget,
}

/// Fit score with the rubric lines that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub score: FitScore,
    pub category: Category,
    pub components: Vec<RubricComponent<FitFactor>>,
}

impl FitReport {
    fn empty() -> Self {
        Self {
            score: FitScore::ZERO,
            category: FitScore::ZERO.category(),
            components: Vec::new(),
        }
    }
}

/// Stateless calculator applying a [`FitPolicy`].
#[derive(Debug, Clone, Default)]
pub struct FitScoreCalculator {
    policy: FitPolicy,
}

impl FitScoreCalculator {
    pub fn new(policy: FitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FitPolicy {
        &self.policy
    }

    pub fn score(
        &self,
        profile: Option<&StudentProfile>,
        requirements: Option<&UniversityRequirements>,
        cost: Option<&NumericField>,
    ) -> FitScore {
        self.evaluate(profile, requirements, cost).score
    }

    pub fn evaluate_university(&self, profile: &StudentProfile, university: &University) -> FitReport {
        self.evaluate(
            Some(profile),
            university.requirements.as_ref(),
            university.cost.as_ref(),
        )
    }

    /// Missing profile or missing requirements yields an empty report scored 0.
    pub fn evaluate(
        &self,
        profile: Option<&StudentProfile>,
        requirements: Option<&UniversityRequirements>,
        cost: Option<&NumericField>,
    ) -> FitReport {
        let (Some(profile), Some(requirements)) = (profile, requirements) else {
            return FitReport::empty();
        };

        let policy = &self.policy;
        let mut rubric = Rubric::new();

        if let (Some(gpa), Some(required)) = (
            parse_optional(profile.gpa.as_ref()),
            parse_optional(requirements.gpa.as_ref()),
        ) {
            let earned = tiered_credit(gpa, required, policy.gpa_margin, policy.academic_weight);
            rubric.award(
                FitFactor::Academic,
                policy.academic_weight,
                earned,
                describe("GPA", gpa, required, earned, policy.academic_weight),
            );
        }

        if let Some((exam, actual, required, margin)) = english_exam(profile, requirements, policy) {
            let earned = tiered_credit(actual, required, margin, policy.english_weight);
            rubric.award(
                FitFactor::EnglishExam,
                policy.english_weight,
                earned,
                describe(exam, actual, required, earned, policy.english_weight),
            );
        }

        if let Some((exam, actual, required, margin)) = graduate_exam(profile, requirements, policy) {
            let earned = tiered_credit(actual, required, margin, policy.graduate_weight);
            rubric.award(
                FitFactor::GraduateExam,
                policy.graduate_weight,
                earned,
                describe(exam, actual, required, earned, policy.graduate_weight),
            );
        }

        if let (Some(budget), Some(cost)) =
            (parse_optional(profile.budget.as_ref()), parse_optional(cost))
        {
            let earned = if cost <= budget {
                policy.budget_weight
            } else if cost <= budget * policy.budget_stretch_ratio {
                policy.budget_weight / 2
            } else {
                0
            };
            let notes = if earned == policy.budget_weight {
                format!("annual cost {cost} within budget {budget}")
            } else if earned > 0 {
                format!("annual cost {cost} stretches budget {budget}")
            } else {
                format!("annual cost {cost} exceeds budget {budget}")
            };
            rubric.award(FitFactor::Budget, policy.budget_weight, earned, notes);
        }

        let score = FitScore::new(rubric.percentage());
        FitReport {
            score,
            category: score.category(),
            components: rubric.into_components(),
        }
    }
}

/// Scores with the default policy.
pub fn compute_fit_score(
    profile: Option<&StudentProfile>,
    requirements: Option<&UniversityRequirements>,
    cost: Option<&NumericField>,
) -> FitScore {
    FitScoreCalculator::default().score(profile, requirements, cost)
}

// IELTS wins whenever both sides carry it; TOEFL is only the fallback.
fn english_exam(
    profile: &StudentProfile,
    requirements: &UniversityRequirements,
    policy: &FitPolicy,
) -> Option<(&'static str, f64, f64, f64)> {
    if let (Some(actual), Some(required)) = (
        parse_optional(profile.ielts.as_ref()),
        parse_optional(requirements.ielts.as_ref()),
    ) {
        return Some(("IELTS", actual, required, policy.ielts_margin));
    }
    if let (Some(actual), Some(required)) = (
        parse_optional(profile.toefl.as_ref()),
        parse_optional(requirements.toefl.as_ref()),
    ) {
        return Some(("TOEFL", actual, required, policy.toefl_margin));
    }
    None
}

fn graduate_exam(
    profile: &StudentProfile,
    requirements: &UniversityRequirements,
    policy: &FitPolicy,
) -> Option<(&'static str, f64, f64, f64)> {
    if let (Some(actual), Some(required)) = (
        parse_optional(profile.gre.as_ref()),
        parse_optional(requirements.gre.as_ref()),
    ) {
        return Some(("GRE", actual, required, policy.gre_margin));
    }
    if let (Some(actual), Some(required)) = (
        parse_optional(profile.gmat.as_ref()),
        parse_optional(requirements.gmat.as_ref()),
    ) {
        return Some(("GMAT", actual, required, policy.gmat_margin));
    }
    None
}

fn tiered_credit(actual: f64, required: f64, margin: f64, weight: u32) -> u32 {
    if actual >= required {
        weight
    } else if actual >= required - margin {
        weight / 2
    } else {
        0
    }
}

fn describe(label: &str, actual: f64, required: f64, earned: u32, weight: u32) -> String {
    if earned == weight {
        format!("{label} {actual} meets required {required}")
    } else if earned > 0 {
        format!("{label} {actual} close to required {required}")
    } else {
        format!("{label} {actual} below required {required}")
    }
}
