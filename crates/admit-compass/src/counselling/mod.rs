//! Counselling workflows built on the scoring engine.

pub mod advisor;
pub mod application;
pub mod router;
pub mod service;
pub mod shortlist;

#[cfg(test)]
mod tests;

pub use advisor::{AdvisorContext, AdvisorUniversity};
pub use application::{
    ApplicationDocument, ApplicationTask, ApplicationUpdate, ApplicationView, LockedDocument,
    LockedTask,
};
pub use router::{counselling_router, AdvisorContextRequest};
pub use service::{
    CounsellingError, CounsellingService, ShortlistOutcome, UniversityRecommendation,
    DEFAULT_ADVISOR_TOP_N,
};
pub use shortlist::{
    ApplicationStatus, ProfileId, ShortlistEntry, ShortlistError, ShortlistRepository,
};
