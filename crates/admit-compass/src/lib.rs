//! Fit scoring and counselling workflows for study-abroad applicants.
//!
//! [`scoring`] holds the pure rubric calculators. [`catalog`] and
//! [`counselling`] wrap them with storage seams and HTTP routes.

pub mod catalog;
pub mod config;
pub mod counselling;
pub mod error;
pub mod profile;
pub mod scoring;
pub mod telemetry;
