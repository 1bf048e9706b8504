//! Date parsing, urgency and proximity classification.
//!
//! Calendar dates are stored as raw `YYYY-MM-DD` strings; everything here is
//! total, and an unparseable date is treated as "infinitely far away" rather
//! than an error.

use chrono::{Days, NaiveDate};

use super::policy::{Policy, PolicyStatus};

/// How far urgency looks ahead, in calendar days.
pub const URGENCY_WINDOW_DAYS: u64 = 7;

/// Parse a stored `YYYY-MM-DD` date, returning `None` for anything else.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Sort value for a stored date: unparseable dates sort as far future.
#[must_use]
pub fn sort_key(value: &str) -> NaiveDate {
    parse_date(value).unwrap_or(NaiveDate::MAX)
}

/// Whether a policy needs attention within the urgency window.
///
/// Only `PendingRequirements` policies can be urgent. Given that, a policy
/// is urgent if its effective date or its follow-up date (when present)
/// falls strictly before `today + window` days. Invalid dates are never
/// urgent.
#[must_use]
pub fn is_urgent(policy: &Policy, today: NaiveDate, window_days: u64) -> bool {
    if policy.status != PolicyStatus::PendingRequirements {
        return false;
    }
    let threshold = today
        .checked_add_days(Days::new(window_days))
        .unwrap_or(NaiveDate::MAX);
    let before_threshold =
        |value: &str| parse_date(value).is_some_and(|date| date < threshold);

    before_threshold(&policy.effective_date)
        || policy
            .follow_up_date
            .as_deref()
            .is_some_and(before_threshold)
}

/// Display grouping for a target date relative to today.
///
/// Ordered from most to least urgent; `Unknown` sorts as infinitely far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateProximity {
    /// The date has already passed, by this many days.
    PastDue(u32),
    /// Due today.
    Today,
    /// Due within the week (1..=7 days out).
    Days(u32),
    /// Due within the month, grouped by week count (8..=30 days out).
    Weeks(u32),
    /// Due later, grouped by month count (more than 30 days out).
    Months(u32),
    /// Missing or unparseable date.
    Unknown,
}

impl DateProximity {
    /// Classify a stored date string against today.
    #[must_use]
    pub fn of(value: &str, today: NaiveDate) -> Self {
        let Some(date) = parse_date(value) else {
            return Self::Unknown;
        };
        let diff_days = (date - today).num_days();

        if diff_days < 0 {
            let days = u32::try_from(-diff_days).unwrap_or(u32::MAX);
            Self::PastDue(days)
        } else if diff_days == 0 {
            Self::Today
        } else if diff_days <= 7 {
            Self::Days(u32::try_from(diff_days).unwrap_or(u32::MAX))
        } else if diff_days <= 30 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let weeks = ((diff_days as f64) / 7.0).round() as u32;
            Self::Weeks(weeks)
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let months = ((diff_days as f64) / 30.0).round() as u32;
            Self::Months(months)
        }
    }
}

impl std::fmt::Display for DateProximity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PastDue(_) => f.write_str("Past Due"),
            Self::Today => f.write_str("Today"),
            Self::Days(1) => f.write_str("in 1 day"),
            Self::Days(n) => write!(f, "in {n} days"),
            Self::Weeks(1) => f.write_str("in 1 wk"),
            Self::Weeks(n) => write!(f, "in {n} wks"),
            Self::Months(n) => write!(f, "in {n} mo+"),
            Self::Unknown => f.write_str("No Date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{policy::NewPolicy, Carrier, Policy, PolicyType, Requirement};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    fn pending_policy(effective: &str, follow_up: Option<&str>) -> Policy {
        Policy::new(
            NewPolicy {
                client_name: "Ada Client".to_string(),
                client_email: "ada@example.com".to_string(),
                client_phone: "336-555-0100".to_string(),
                policy_number: "NW-1".to_string(),
                carrier: Carrier::Travelers,
                policy_type: PolicyType::Home,
                effective_date: effective.to_string(),
                follow_up_date: follow_up.map(ToString::to_string),
            },
            vec![Requirement::new("Signed Application", "")],
        )
        .unwrap()
    }

    #[test]
    fn parse_accepts_iso_dates_only() {
        assert_eq!(
            parse_date("2026-08-28"),
            Some(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap())
        );
        assert_eq!(parse_date("08/28/2026"), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn effective_date_inside_window_is_urgent() {
        let policy = pending_policy("2026-08-31", None);
        assert!(is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));
    }

    #[test]
    fn window_boundary_is_not_urgent() {
        // Strictly before today + 7: the boundary day itself does not count.
        let policy = pending_policy("2026-09-04", None);
        assert!(!is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));

        let policy = pending_policy("2026-09-03", None);
        assert!(is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));
    }

    #[test]
    fn past_dates_are_urgent() {
        let policy = pending_policy("2026-08-01", None);
        assert!(is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));
    }

    #[test]
    fn follow_up_date_alone_can_make_urgent() {
        let policy = pending_policy("2026-12-01", Some("2026-08-30"));
        assert!(is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));
    }

    #[test]
    fn invalid_dates_are_not_urgent() {
        let policy = pending_policy("soon", Some("later"));
        assert!(!is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));
    }

    #[test]
    fn non_pending_statuses_are_never_urgent() {
        use crate::domain::PolicyStatus;
        for status in [
            PolicyStatus::InReview,
            PolicyStatus::Complete,
            PolicyStatus::Archived,
        ] {
            let mut policy = pending_policy("2026-08-29", None);
            policy.status = status;
            assert!(!is_urgent(&policy, today(), URGENCY_WINDOW_DAYS));
        }
    }

    #[test]
    fn proximity_buckets() {
        let today = today();
        assert_eq!(
            DateProximity::of("2026-08-20", today),
            DateProximity::PastDue(8)
        );
        assert_eq!(DateProximity::of("2026-08-28", today), DateProximity::Today);
        assert_eq!(
            DateProximity::of("2026-08-31", today),
            DateProximity::Days(3)
        );
        assert_eq!(
            DateProximity::of("2026-09-04", today),
            DateProximity::Days(7)
        );
        // 14 days out rounds to 2 weeks.
        assert_eq!(
            DateProximity::of("2026-09-11", today),
            DateProximity::Weeks(2)
        );
        // 60 days out rounds to 2 months.
        assert_eq!(
            DateProximity::of("2026-10-27", today),
            DateProximity::Months(2)
        );
        assert_eq!(DateProximity::of("garbage", today), DateProximity::Unknown);
    }

    #[test]
    fn proximity_orders_most_urgent_first() {
        assert!(DateProximity::PastDue(1) < DateProximity::Today);
        assert!(DateProximity::Today < DateProximity::Days(1));
        assert!(DateProximity::Days(7) < DateProximity::Weeks(2));
        assert!(DateProximity::Months(6) < DateProximity::Unknown);
    }

    #[test]
    fn proximity_labels() {
        assert_eq!(DateProximity::Days(1).to_string(), "in 1 day");
        assert_eq!(DateProximity::Days(3).to_string(), "in 3 days");
        assert_eq!(DateProximity::Weeks(2).to_string(), "in 2 wks");
        assert_eq!(DateProximity::Months(3).to_string(), "in 3 mo+");
        assert_eq!(DateProximity::Unknown.to_string(), "No Date");
    }

    #[test]
    fn unparseable_dates_sort_last_ascending() {
        assert!(sort_key("2026-08-28") < sort_key("nonsense"));
        assert_eq!(sort_key("nonsense"), NaiveDate::MAX);
    }
}
