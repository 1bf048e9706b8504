//! Policy status derivation.
//!
//! Status is a small state machine re-evaluated after every requirement or
//! note mutation, unless the caller explicitly skips it:
//!
//! | From                  | Trigger                         | To                    |
//! |-----------------------|---------------------------------|-----------------------|
//! | `PendingRequirements` | every requirement met, or none  | `Archived`            |
//! | `Archived`            | restore (derivation skipped)    | `PendingRequirements` |
//! | `Complete`            | any derivation                  | `Archived` or `PendingRequirements` |
//! | `InReview`            | —                               | never changed here    |
//! | `Archived`            | —                               | never changed here    |
//!
//! `InReview` and `Archived` are sticky: only explicit user action sets or
//! clears them. Restore must skip derivation, otherwise a policy with an
//! empty or fully-waived checklist would be re-archived on the spot.

use super::policy::{Policy, PolicyStatus};

/// Recompute a policy's status from its requirements.
///
/// Pure and total: returns the policy unchanged except possibly for
/// `status`. Sticky states are never overwritten.
#[must_use]
pub fn derive(mut policy: Policy) -> Policy {
    match policy.status {
        PolicyStatus::Archived | PolicyStatus::InReview => policy,
        PolicyStatus::PendingRequirements | PolicyStatus::Complete => {
            policy.status = if all_met(&policy) {
                PolicyStatus::Archived
            } else {
                PolicyStatus::PendingRequirements
            };
            policy
        }
    }
}

/// True if the checklist is empty or every item is `Approved` or `Waived`.
fn all_met(policy: &Policy) -> bool {
    policy.requirements.iter().all(super::Requirement::is_met)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        policy::NewPolicy, Carrier, PolicyType, Requirement, RequirementStatus,
    };

    fn policy_with(statuses: &[RequirementStatus]) -> Policy {
        let requirements = statuses
            .iter()
            .enumerate()
            .map(|(i, &status)| {
                let mut req = Requirement::new(format!("Item {i}"), "");
                req.status = status;
                req
            })
            .collect();
        Policy::new(
            NewPolicy {
                client_name: "Ada Client".to_string(),
                client_email: "ada@example.com".to_string(),
                client_phone: "336-555-0100".to_string(),
                policy_number: "NW-1".to_string(),
                carrier: Carrier::Nationwide,
                policy_type: PolicyType::Auto,
                effective_date: "2026-09-15".to_string(),
                follow_up_date: None,
            },
            requirements,
        )
        .unwrap()
    }

    #[test]
    fn empty_checklist_archives() {
        let policy = policy_with(&[]);
        assert_eq!(derive(policy).status, PolicyStatus::Archived);
    }

    #[test]
    fn all_approved_or_waived_archives() {
        let policy = policy_with(&[RequirementStatus::Approved, RequirementStatus::Waived]);
        assert_eq!(derive(policy).status, PolicyStatus::Archived);
    }

    #[test]
    fn any_unmet_item_keeps_pending() {
        for blocker in [
            RequirementStatus::Outstanding,
            RequirementStatus::Submitted,
            RequirementStatus::Rejected,
        ] {
            let policy = policy_with(&[RequirementStatus::Approved, blocker]);
            assert_eq!(
                derive(policy).status,
                PolicyStatus::PendingRequirements,
                "{blocker} should block archival"
            );
        }
    }

    #[test]
    fn rejected_only_checklist_is_not_met() {
        let policy = policy_with(&[RequirementStatus::Rejected]);
        assert_eq!(derive(policy).status, PolicyStatus::PendingRequirements);
    }

    #[test]
    fn sticky_states_are_untouched() {
        for sticky in [PolicyStatus::Archived, PolicyStatus::InReview] {
            // Fully-met checklist would otherwise archive; an empty one too.
            let mut policy = policy_with(&[RequirementStatus::Outstanding]);
            policy.status = sticky;
            let derived = derive(policy.clone());
            assert_eq!(derived, policy);
        }
    }

    #[test]
    fn complete_is_normalised_by_derivation() {
        let mut policy = policy_with(&[RequirementStatus::Approved]);
        policy.status = PolicyStatus::Complete;
        assert_eq!(derive(policy).status, PolicyStatus::Archived);

        let mut policy = policy_with(&[RequirementStatus::Outstanding]);
        policy.status = PolicyStatus::Complete;
        assert_eq!(derive(policy).status, PolicyStatus::PendingRequirements);
    }

    #[test]
    fn restore_skips_derivation_and_stays_pending() {
        // A restored policy has its status set directly; derivation is not
        // run, so even an empty checklist does not re-archive it.
        let mut policy = policy_with(&[]);
        assert_eq!(policy.status, PolicyStatus::Archived);
        policy.status = PolicyStatus::PendingRequirements;
        assert_eq!(policy.status, PolicyStatus::PendingRequirements);
    }
}
