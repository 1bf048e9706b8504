//! Insurance "new business" tracking
//!
//! Policies and their underwriting requirement checklists are stored as a
//! single JSON collection under a root directory.

pub mod domain;
pub use domain::{
    Carrier, Communication, Config, Filter, NewPolicy, Policy, PolicyStatus, PolicyType,
    Requirement, RequirementStatus, ValidationError,
};

/// JSON-file storage for the policy collection.
pub mod storage;
pub use storage::{Derive, Store};

/// AI drafting collaborator.
pub mod draft;
pub use draft::{Assistant, GenerationError};
