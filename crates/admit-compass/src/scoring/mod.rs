//! Deterministic rubric scoring shared by the HTTP service, the CLI, and any
//! presentation consumer. Nothing here performs I/O or holds state.

mod category;
mod fit;
mod numeric;
mod policy;
mod ranking;
mod rubric;
mod strength;

pub use category::{classify, Category, SAFE_THRESHOLD, TARGET_THRESHOLD};
pub use fit::{
    compute_fit_score, FitFactor, FitReport, FitScore, FitScoreCalculator, FitScoreOutOfRange,
};
pub use numeric::{parse_optional, NumericField};
pub use policy::FitPolicy;
pub use ranking::{rank, rank_by};
pub use rubric::{Rubric, RubricComponent};
pub use strength::{
    compute_strength, strength_rubric, AcademicsLabel, ExamsLabel, ProfileStrength, SopLabel,
    StrengthFactor,
};
