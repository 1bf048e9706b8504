//! List-view filtering.
//!
//! Policies are partitioned into the active and archived views first, then
//! narrowed by an AND of independent predicates.

use super::policy::{Policy, PolicyStatus, PolicyType};

/// The list view's filter controls.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Case-insensitive substring match against client name, policy number
    /// or carrier. Empty matches everything.
    pub search: String,
    /// Exact policy-type match; `None` means "All".
    pub policy_type: Option<PolicyType>,
    /// Exact status match; `None` means "All". Only meaningful in the
    /// active view.
    pub status: Option<PolicyStatus>,
    /// Show the archived partition instead of the active one.
    pub show_archived: bool,
}

impl Filter {
    /// Whether a single policy passes the filter.
    #[must_use]
    pub fn matches(&self, policy: &Policy) -> bool {
        let in_partition = if self.show_archived {
            policy.status == PolicyStatus::Archived
        } else {
            policy.status != PolicyStatus::Archived
        };

        in_partition
            && self.matches_search(policy)
            && self.policy_type.is_none_or(|t| policy.policy_type == t)
            && self.status.is_none_or(|s| policy.status == s)
    }

    fn matches_search(&self, policy: &Policy) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        policy.client_name.to_lowercase().contains(&term)
            || policy.policy_number.to_lowercase().contains(&term)
            || policy.carrier.to_string().to_lowercase().contains(&term)
    }

    /// Keep only the policies that pass the filter, preserving input order.
    #[must_use]
    pub fn apply(&self, policies: Vec<Policy>) -> Vec<Policy> {
        policies.into_iter().filter(|p| self.matches(p)).collect()
    }
}
