use serde::{Deserialize, Serialize};

/// One scored line of a rubric, kept so callers can show how a total was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricComponent<F> {
    pub factor: F,
    pub earned: u32,
    pub weight: u32,
    pub notes: String,
}

/// Weighted rubric accumulator shared by the fit and strength calculators.
///
/// Only components that are actually awarded count toward the denominator,
/// so a rubric with sparse inputs is normalized against the data it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric<F> {
    components: Vec<RubricComponent<F>>,
    earned: u32,
    max_score: u32,
}

impl<F> Default for Rubric<F> {
    fn default() -> Self {
        Self {
            components: Vec::new(),
            earned: 0,
            max_score: 0,
        }
    }
}

impl<F> Rubric<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an active component. `earned` is capped at `weight`.
    pub fn award(&mut self, factor: F, weight: u32, earned: u32, notes: impl Into<String>) {
        let earned = earned.min(weight);
        self.earned += earned;
        self.max_score += weight;
        self.components.push(RubricComponent {
            factor,
            earned,
            weight,
            notes: notes.into(),
        });
    }

    pub fn earned(&self) -> u32 {
        self.earned
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn components(&self) -> &[RubricComponent<F>] {
        &self.components
    }

    pub fn into_components(self) -> Vec<RubricComponent<F>> {
        self.components
    }

    /// `round(100 * earned / max)` with halves rounded up; 0 when nothing is active.
    pub fn percentage(&self) -> u8 {
        if self.max_score == 0 {
            return 0;
        }
        let numerator = 200 * u64::from(self.earned) + u64::from(self.max_score);
        let denominator = 2 * u64::from(self.max_score);
        (numerator / denominator).min(100) as u8
    }
}
