use serde::{Deserialize, Serialize};

/// Lowest fit score classified as [`Category::Safe`].
pub const SAFE_THRESHOLD: u8 = 80;
/// Lowest fit score classified as [`Category::Target`].
pub const TARGET_THRESHOLD: u8 = 60;

/// Admission risk tier for a university relative to one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Safe,
    Target,
    Dream,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::Safe => "Safe",
            Category::Target => "Target",
            Category::Dream => "Dream",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Band lower bounds are inclusive: 80 is Safe and 60 is Target.
pub fn classify(fit_score: u8) -> Category {
    if fit_score >= SAFE_THRESHOLD {
        Category::Safe
    } else if fit_score >= TARGET_THRESHOLD {
        Category::Target
    } else {
        Category::Dream
    }
}
