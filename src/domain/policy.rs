use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    requirement::{Requirement, RequirementStatus},
    status,
};

/// The carriers this agency writes new business with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Carrier {
    Nationwide,
    Progressive,
    Travelers,
    #[serde(rename = "National General")]
    NationalGeneral,
    #[serde(rename = "NC Grange")]
    NcGrange,
    #[serde(rename = "Alamance Farmers")]
    AlamanceFarmers,
    Foremost,
}

impl Carrier {
    /// All carriers, in presentation order.
    pub const ALL: [Self; 7] = [
        Self::Nationwide,
        Self::Progressive,
        Self::Travelers,
        Self::NationalGeneral,
        Self::NcGrange,
        Self::AlamanceFarmers,
        Self::Foremost,
    ];
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Nationwide => "Nationwide",
            Self::Progressive => "Progressive",
            Self::Travelers => "Travelers",
            Self::NationalGeneral => "National General",
            Self::NcGrange => "NC Grange",
            Self::AlamanceFarmers => "Alamance Farmers",
            Self::Foremost => "Foremost",
        };
        f.write_str(s)
    }
}

/// The lines of business the tracker handles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum PolicyType {
    Auto,
    Home,
    Renters,
    Umbrella,
}

impl std::fmt::Display for PolicyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Auto => "Auto",
            Self::Home => "Home",
            Self::Renters => "Renters",
            Self::Umbrella => "Umbrella",
        };
        f.write_str(s)
    }
}

/// Where a policy sits in the onboarding pipeline.
///
/// `PendingRequirements` and `Archived` move automatically via
/// [`status::derive`]; `InReview` and a restored policy's status are only
/// ever set by explicit user action ("sticky" states). See the transition
/// table in [`status`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum PolicyStatus {
    /// One or more requirements are not yet met.
    #[serde(rename = "Pending Requirements")]
    PendingRequirements,
    /// Parked with carrier underwriting; derivation leaves it alone.
    #[serde(rename = "In Review")]
    InReview,
    /// Legacy state carried in old snapshots; derivation never produces it.
    Complete,
    /// All requirements met, or explicitly archived.
    Archived,
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PendingRequirements => "Pending Requirements",
            Self::InReview => "In Review",
            Self::Complete => "Complete",
            Self::Archived => "Archived",
        };
        f.write_str(s)
    }
}

/// A dated free-text note about a call, email or other client contact.
///
/// Notes are append-only apart from explicit deletion by id. Storage order is
/// insertion order; display order is most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    /// Opaque unique identifier.
    pub id: String,
    /// Creation instant, immutable.
    pub timestamp: DateTime<Utc>,
    /// Free text.
    pub note: String,
}

impl Communication {
    /// Construct a new note stamped with the current instant.
    #[must_use]
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            note: note.into(),
        }
    }
}

/// An insurance policy being onboarded.
///
/// The policy exclusively owns its requirement and communication
/// collections. Calendar dates are kept as the raw `YYYY-MM-DD` strings the
/// user entered: malformed values from old snapshots must round-trip, and
/// are treated as "unknown/maximal" wherever dates are compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Opaque unique identifier.
    pub id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub policy_number: String,
    pub carrier: Carrier,
    pub policy_type: PolicyType,
    /// Calendar date (`YYYY-MM-DD`) the coverage starts.
    pub effective_date: String,
    /// Optional calendar date for the next follow-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
    /// Derived, except when explicitly set by restore.
    pub status: PolicyStatus,
    /// Checklist items, in insertion order.
    pub requirements: Vec<Requirement>,
    /// Communication log, in insertion order. Older snapshots predate the
    /// field.
    #[serde(default)]
    pub communications: Vec<Communication>,
}

/// The user-entered fields of a new policy, before requirements are attached.
#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub policy_number: String,
    pub carrier: Carrier,
    pub policy_type: PolicyType,
    pub effective_date: String,
    pub follow_up_date: Option<String>,
}

/// A required creation field was empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} is required")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
}

impl Policy {
    /// Create a policy from user input plus its initial checklist.
    ///
    /// Each requirement starts `Outstanding`. The initial status is derived
    /// immediately, so a policy created with an empty checklist is born
    /// `Archived`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any required client field or the
    /// effective date is empty.
    pub fn new(details: NewPolicy, requirements: Vec<Requirement>) -> Result<Self, ValidationError> {
        fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
            if value.trim().is_empty() {
                Err(ValidationError { field })
            } else {
                Ok(())
            }
        }

        required(&details.client_name, "client name")?;
        required(&details.client_email, "client email")?;
        required(&details.client_phone, "client phone")?;
        required(&details.effective_date, "effective date")?;

        let policy = Self {
            id: Uuid::new_v4().to_string(),
            client_name: details.client_name,
            client_email: details.client_email,
            client_phone: details.client_phone,
            policy_number: details.policy_number,
            carrier: details.carrier,
            policy_type: details.policy_type,
            effective_date: details.effective_date,
            follow_up_date: details.follow_up_date,
            status: PolicyStatus::PendingRequirements,
            requirements,
            communications: Vec::new(),
        };

        Ok(status::derive(policy))
    }

    /// Number of requirements that count as met.
    #[must_use]
    pub fn met_count(&self) -> usize {
        self.requirements.iter().filter(|r| r.is_met()).count()
    }

    /// Requirements still blocking the policy: `Outstanding` or `Rejected`.
    pub fn outstanding(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(|r| {
            matches!(
                r.status,
                RequirementStatus::Outstanding | RequirementStatus::Rejected
            )
        })
    }

    /// Append a communication note.
    pub fn add_note(&mut self, note: impl Into<String>) -> &Communication {
        self.communications.push(Communication::new(note));
        self.communications
            .last()
            .expect("just pushed a communication")
    }

    /// Remove a communication note by id.
    ///
    /// Returns `true` if a note was removed.
    pub fn remove_note(&mut self, note_id: &str) -> bool {
        let before = self.communications.len();
        self.communications.retain(|c| c.id != note_id);
        self.communications.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn details() -> NewPolicy {
        NewPolicy {
            client_name: "Ada Client".to_string(),
            client_email: "ada@example.com".to_string(),
            client_phone: "336-555-0100".to_string(),
            policy_number: "NW-12345".to_string(),
            carrier: Carrier::Nationwide,
            policy_type: PolicyType::Auto,
            effective_date: "2026-09-15".to_string(),
            follow_up_date: None,
        }
    }

    #[test]
    fn new_policy_with_outstanding_requirements_is_pending() {
        let reqs = vec![
            Requirement::new("Signed Application", ""),
            Requirement::new("VIN Verification", ""),
        ];
        let policy = Policy::new(details(), reqs).unwrap();
        assert_eq!(policy.status, PolicyStatus::PendingRequirements);
        assert_eq!(policy.met_count(), 0);
    }

    #[test]
    fn creation_types_are_reachable_from_the_crate_root() {
        // The CLI builds policies through the crate-root re-exports.
        let details: crate::NewPolicy = details();
        let policy = crate::Policy::new(details, Vec::new()).unwrap();
        assert_eq!(policy.status, PolicyStatus::Archived);
    }

    #[test]
    fn new_policy_with_no_requirements_is_archived() {
        let policy = Policy::new(details(), Vec::new()).unwrap();
        assert_eq!(policy.status, PolicyStatus::Archived);
    }

    #[test]
    fn empty_client_name_is_rejected() {
        let mut bad = details();
        bad.client_name = "  ".to_string();
        let err = Policy::new(bad, Vec::new()).unwrap_err();
        assert_eq!(err.field, "client name");
    }

    #[test]
    fn empty_effective_date_is_rejected() {
        let mut bad = details();
        bad.effective_date = String::new();
        let err = Policy::new(bad, Vec::new()).unwrap_err();
        assert_eq!(err.field, "effective date");
    }

    #[test]
    fn notes_append_and_remove_by_id() {
        let mut policy =
            Policy::new(details(), vec![Requirement::new("Application", "")]).unwrap();
        let id = policy.add_note("Left a voicemail.").id.clone();
        policy.add_note("Client emailed the application.");
        assert_eq!(policy.communications.len(), 2);

        assert!(policy.remove_note(&id));
        assert!(!policy.remove_note(&id));
        assert_eq!(policy.communications.len(), 1);
        assert_eq!(policy.communications[0].note, "Client emailed the application.");
    }

    #[test]
    fn outstanding_includes_rejected() {
        let mut reqs = vec![
            Requirement::new("Application", ""),
            Requirement::new("Photos", ""),
            Requirement::new("Draft Form", ""),
        ];
        reqs[1].status = RequirementStatus::Rejected;
        reqs[2].status = RequirementStatus::Submitted;
        let policy = Policy::new(details(), reqs).unwrap();

        let names: Vec<_> = policy.outstanding().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Application", "Photos"]);
    }

    #[test]
    fn carrier_serde_uses_display_names() {
        let json = serde_json::to_string(&Carrier::NcGrange).unwrap();
        assert_eq!(json, "\"NC Grange\"");
        let carrier: Carrier = serde_json::from_str("\"Alamance Farmers\"").unwrap();
        assert_eq!(carrier, Carrier::AlamanceFarmers);
    }

    #[test]
    fn policy_json_uses_camel_case_field_names() {
        let policy = Policy::new(details(), Vec::new()).unwrap();
        let value = serde_json::to_value(&policy).unwrap();
        assert!(value.get("clientName").is_some());
        assert!(value.get("policyNumber").is_some());
        assert!(value.get("effectiveDate").is_some());
        assert_eq!(value["status"], "Archived");
    }

    #[test]
    fn snapshot_without_communications_deserializes() {
        // Exports from before the communication log existed.
        let json = r#"{
            "id": "abc",
            "clientName": "Ada Client",
            "clientEmail": "ada@example.com",
            "clientPhone": "336-555-0100",
            "policyNumber": "NW-1",
            "carrier": "Nationwide",
            "policyType": "Auto",
            "effectiveDate": "2026-09-15",
            "status": "Pending Requirements",
            "requirements": []
        }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert!(policy.communications.is_empty());
        assert!(policy.follow_up_date.is_none());
    }
}
