//! List-view ordering.

use chrono::NaiveDate;
use std::cmp::Reverse;

use super::{dates, policy::Policy};

/// Order policies for display, in place.
///
/// Archived view: most recent effective date first; unparseable dates are
/// treated as far future and therefore lead. Active view: urgent policies
/// first, then soonest effective date; unparseable dates trail.
///
/// The underlying sort is stable, so policies with equal keys keep their
/// input order.
pub fn sort(policies: &mut [Policy], show_archived: bool, today: NaiveDate, window_days: u64) {
    if show_archived {
        policies.sort_by_key(|p| Reverse(dates::sort_key(&p.effective_date)));
    } else {
        policies.sort_by_key(|p| {
            (
                Reverse(dates::is_urgent(p, today, window_days)),
                dates::sort_key(&p.effective_date),
            )
        });
    }
}
