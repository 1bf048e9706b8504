use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle state of a single underwriting requirement.
///
/// Requirements only change state through explicit user action; there are no
/// automatic transitions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum, Default,
)]
pub enum RequirementStatus {
    /// Not yet received from the client.
    #[default]
    Outstanding,
    /// Received and sent to the carrier.
    Submitted,
    /// Accepted by the carrier.
    Approved,
    /// Rejected by the carrier; must be re-collected.
    Rejected,
    /// The carrier no longer needs this item.
    Waived,
}

impl RequirementStatus {
    /// Whether this status counts towards "all requirements met".
    ///
    /// `Rejected` does not count: a rejected document must be re-collected.
    #[must_use]
    pub const fn is_met(self) -> bool {
        matches!(self, Self::Approved | Self::Waived)
    }
}

impl std::fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Outstanding => "Outstanding",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Waived => "Waived",
        };
        f.write_str(s)
    }
}

/// A document attached to a requirement (name plus URL).
///
/// Carried for round-trip fidelity with exported snapshots; the tracker's
/// logic never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Original filename.
    pub name: String,
    /// Where the document lives.
    pub url: String,
}

/// One checklist item a carrier needs before a policy is considered complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// Short label, unique within a policy by convention (not enforced).
    pub name: String,
    /// Free-text description of what is needed.
    pub description: String,
    /// Current state of the item.
    pub status: RequirementStatus,
    /// Optional attached document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileRef>,
}

impl Requirement {
    /// Construct a new requirement in the `Outstanding` state.
    ///
    /// A fresh UUID is assigned; the id is never reassigned afterwards.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            status: RequirementStatus::Outstanding,
            file: None,
        }
    }

    /// Whether this requirement counts towards "all requirements met".
    #[must_use]
    pub const fn is_met(&self) -> bool {
        self.status.is_met()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requirement_is_outstanding() {
        let req = Requirement::new("Signed Application", "E-signed or wet-signed application.");
        assert_eq!(req.status, RequirementStatus::Outstanding);
        assert!(!req.is_met());
        assert!(req.file.is_none());
    }

    #[test]
    fn ids_are_unique() {
        let a = Requirement::new("A", "");
        let b = Requirement::new("A", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn only_approved_and_waived_are_met() {
        assert!(RequirementStatus::Approved.is_met());
        assert!(RequirementStatus::Waived.is_met());
        assert!(!RequirementStatus::Outstanding.is_met());
        assert!(!RequirementStatus::Submitted.is_met());
        assert!(!RequirementStatus::Rejected.is_met());
    }

    #[test]
    fn status_round_trips_through_json() {
        let json = serde_json::to_string(&RequirementStatus::Waived).unwrap();
        assert_eq!(json, "\"Waived\"");
        let status: RequirementStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, RequirementStatus::Waived);
    }
}
