//! Profile strength: how competitive a student's own credentials are,
//! independent of any university.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::numeric::parse_optional;
use super::rubric::Rubric;
use crate::profile::{SopStatus, StudentProfile};

const ACADEMICS_WEIGHT: u32 = 40;
const EXAMS_WEIGHT: u32 = 30;
const GRADUATE_WEIGHT: u32 = 20;
const SOP_WEIGHT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthFactor {
    Academics,
    Exams,
    GraduateExam,
    Sop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcademicsLabel {
    #[serde(rename = "Not specified")]
    NotSpecified,
    Strong,
    Average,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamsLabel {
    #[serde(rename = "Not started")]
    NotStarted,
    Strong,
    Average,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SopLabel {
    #[serde(rename = "Not started")]
    NotStarted,
    Ready,
    Draft,
}

impl AcademicsLabel {
    pub const fn label(self) -> &'static str {
        match self {
            AcademicsLabel::NotSpecified => "Not specified",
            AcademicsLabel::Strong => "Strong",
            AcademicsLabel::Average => "Average",
            AcademicsLabel::Weak => "Weak",
        }
    }
}

impl ExamsLabel {
    pub const fn label(self) -> &'static str {
        match self {
            ExamsLabel::NotStarted => "Not started",
            ExamsLabel::Strong => "Strong",
            ExamsLabel::Average => "Average",
            ExamsLabel::Weak => "Weak",
        }
    }
}

impl SopLabel {
    pub const fn label(self) -> &'static str {
        match self {
            SopLabel::NotStarted => "Not started",
            SopLabel::Ready => "Ready",
            SopLabel::Draft => "Draft",
        }
    }
}

impl fmt::Display for AcademicsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ExamsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SopLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary rendered on the dashboard and handed to the advisor context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStrength {
    pub overall: u8,
    pub academics: AcademicsLabel,
    pub exams: ExamsLabel,
    pub sop: SopLabel,
}

impl Default for ProfileStrength {
    fn default() -> Self {
        Self {
            overall: 0,
            academics: AcademicsLabel::NotSpecified,
            exams: ExamsLabel::NotStarted,
            sop: SopLabel::NotStarted,
        }
    }
}

/// Parsed exam scores shared by the exam tiering and its label.
struct EnglishScores {
    ielts: Option<f64>,
    toefl: Option<f64>,
}

impl EnglishScores {
    fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            ielts: parse_optional(profile.ielts.as_ref()),
            toefl: parse_optional(profile.toefl.as_ref()),
        }
    }

    fn is_present(&self) -> bool {
        self.ielts.is_some() || self.toefl.is_some()
    }

    fn reaches(&self, ielts: f64, toefl: f64) -> bool {
        self.ielts.is_some_and(|score| score >= ielts) || self.toefl.is_some_and(|score| score >= toefl)
    }

    fn label(&self) -> ExamsLabel {
        if !self.is_present() {
            ExamsLabel::NotStarted
        } else if self.reaches(7.0, 100.0) {
            ExamsLabel::Strong
        } else if self.reaches(6.5, 90.0) {
            ExamsLabel::Average
        } else {
            ExamsLabel::Weak
        }
    }
}

/// Scores a profile on academics, exams, graduate exams, and SOP progress.
///
/// `None` and an empty profile both produce [`ProfileStrength::default`].
pub fn compute_strength(profile: Option<&StudentProfile>) -> ProfileStrength {
    let Some(profile) = profile else {
        return ProfileStrength::default();
    };
    let rubric = strength_rubric(profile);
    let gpa = parse_optional(profile.gpa.as_ref());

    ProfileStrength {
        overall: rubric.percentage(),
        academics: academics_label(gpa),
        exams: EnglishScores::from_profile(profile).label(),
        sop: sop_label(profile.sop_status),
    }
}

/// The rubric behind [`compute_strength`], exposed for callers that show the breakdown.
pub fn strength_rubric(profile: &StudentProfile) -> Rubric<StrengthFactor> {
    let mut rubric = Rubric::new();

    if let Some(gpa) = parse_optional(profile.gpa.as_ref()) {
        let earned = match gpa {
            g if g >= 3.5 => 40,
            g if g >= 3.0 => 30,
            g if g >= 2.5 => 20,
            _ => 10,
        };
        rubric.award(StrengthFactor::Academics, ACADEMICS_WEIGHT, earned, format!("GPA {gpa}"));
    }

    let english = EnglishScores::from_profile(profile);
    if english.is_present() {
        let earned = match english.label() {
            ExamsLabel::Strong => 30,
            ExamsLabel::Average => 20,
            _ => 10,
        };
        rubric.award(StrengthFactor::Exams, EXAMS_WEIGHT, earned, "english proficiency");
    }

    let gre = parse_optional(profile.gre.as_ref());
    let gmat = parse_optional(profile.gmat.as_ref());
    if gre.is_some() || gmat.is_some() {
        let reaches = |gre_floor: f64, gmat_floor: f64| {
            gre.is_some_and(|score| score >= gre_floor) || gmat.is_some_and(|score| score >= gmat_floor)
        };
        let earned = if reaches(320.0, 650.0) {
            20
        } else if reaches(300.0, 600.0) {
            10
        } else {
            0
        };
        rubric.award(StrengthFactor::GraduateExam, GRADUATE_WEIGHT, earned, "graduate admission test");
    }

    if let Some(status) = profile.sop_status {
        let earned = match status {
            SopStatus::Ready => 10,
            SopStatus::Draft => 5,
            SopStatus::NotStarted => 0,
        };
        rubric.award(StrengthFactor::Sop, SOP_WEIGHT, earned, format!("SOP {}", status.label()));
    }

    rubric
}

fn academics_label(gpa: Option<f64>) -> AcademicsLabel {
    match gpa {
        None => AcademicsLabel::NotSpecified,
        Some(g) if g >= 3.5 => AcademicsLabel::Strong,
        Some(g) if g >= 3.0 => AcademicsLabel::Average,
        Some(_) => AcademicsLabel::Weak,
    }
}

fn sop_label(status: Option<SopStatus>) -> SopLabel {
    match status {
        Some(SopStatus::Ready) => SopLabel::Ready,
        Some(SopStatus::Draft) => SopLabel::Draft,
        Some(SopStatus::NotStarted) | None => SopLabel::NotStarted,
    }
}
