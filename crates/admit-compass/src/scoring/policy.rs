use serde::{Deserialize, Serialize};

/// Weights and half-credit margins for the university fit rubric.
///
/// The defaults are the long-standing production values. The margins are not
/// derived from one formula (0.5 GPA, 0.5 IELTS, 10 TOEFL, 20 GRE, 50 GMAT,
/// 20% over budget); they are product policy and may be tuned per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitPolicy {
    pub academic_weight: u32,
    pub english_weight: u32,
    pub graduate_weight: u32,
    pub budget_weight: u32,
    pub gpa_margin: f64,
    pub ielts_margin: f64,
    pub toefl_margin: f64,
    pub gre_margin: f64,
    pub gmat_margin: f64,
    /// Cost may exceed the budget by this factor and still earn half credit.
    pub budget_stretch_ratio: f64,
}

impl Default for FitPolicy {
    fn default() -> Self {
        Self {
            academic_weight: 40,
            english_weight: 30,
            graduate_weight: 20,
            budget_weight: 10,
            gpa_margin: 0.5,
            ielts_margin: 0.5,
            toefl_margin: 10.0,
            gre_margin: 20.0,
            gmat_margin: 50.0,
            budget_stretch_ratio: 1.2,
        }
    }
}
