//! Domain models for new-business tracking.
//!
//! This module contains the core domain types (policies, requirements,
//! communication notes) and the pure engines that operate on them: status
//! derivation, urgency/date arithmetic, filtering and sorting.

/// Policy aggregate and its enumerations.
pub mod policy;
pub use policy::{
    Carrier, Communication, NewPolicy, Policy, PolicyStatus, PolicyType, ValidationError,
};

/// Underwriting requirement checklist items.
pub mod requirement;
pub use requirement::{FileRef, Requirement, RequirementStatus};

/// Policy status derivation.
pub mod status;

/// Date parsing, urgency and proximity classification.
pub mod dates;
pub use dates::DateProximity;

/// List-view filtering.
pub mod filter;
pub use filter::Filter;

/// List-view ordering.
pub mod sort;

/// Per-carrier requirement catalog used by the add flow.
pub mod catalog;

mod config;
pub use config::Config;
