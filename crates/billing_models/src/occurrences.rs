//! Calendar occurrence enumeration.
//!
//! Answers "on which days of this month does the subscription bill?" for
//! calendar rendering. The answer is a set of day-of-month values, empty
//! when the subscription has no billing activity in that month.
//!
//! # Examples
//!
//! ```
//! use billing_core::types::CalendarDate;
//! use billing_models::occurrences::occurrences_in_month;
//! use billing_models::recurrence::{IntervalUnit, Recurrence, RecurrenceDescriptor};
//!
//! let gym = RecurrenceDescriptor::new(
//!     Recurrence::Interval { count: 1, unit: IntervalUnit::Week },
//!     Some(CalendarDate::from_ymd(2024, 4, 3).unwrap()),
//!     CalendarDate::from_ymd(2023, 9, 1).unwrap(),
//! );
//!
//! // Rewinding from April stops at the first step inside March
//! let march: Vec<u32> = occurrences_in_month(&gym, 2024, 3).into_iter().collect();
//! assert_eq!(march, vec![27]);
//!
//! let april: Vec<u32> = occurrences_in_month(&gym, 2024, 4).into_iter().collect();
//! assert_eq!(april, vec![3, 10, 17, 24]);
//! ```

use billing_core::types::{days_in_month, CalendarDate};
use std::collections::BTreeSet;
use tracing::{trace, warn};

use crate::recurrence::lattice::{IntervalLattice, StepBudget};
use crate::recurrence::{Recurrence, RecurrenceDescriptor, RecurrenceError, DEFAULT_MAX_WALK_STEPS};

/// Returns the days of (`year`, `month`) on which the subscription bills.
///
/// - One-time: the next billing date's day, if it falls in the month.
/// - Monthly by date: the configured day, clamped to the month's length.
/// - Yearly by date: the configured day (clamped) in the configured month only.
/// - Interval: the dates `anchor + k * step` inside the month, where the
///   anchor is the next billing date. When the anchor is after the month
///   the walk rewinds to the last step on or before the month's final day;
///   otherwise it starts at the anchor. Either way it then steps forward
///   through the month.
///
/// Interval recurrences with no next billing date or a count below 1 have
/// no occurrences. An invalid `month` yields an empty set.
///
/// # Examples
///
/// ```
/// use billing_core::types::CalendarDate;
/// use billing_models::occurrences::occurrences_in_month;
/// use billing_models::recurrence::{Recurrence, RecurrenceDescriptor};
///
/// let created = CalendarDate::from_ymd(2023, 1, 1).unwrap();
/// let rent = RecurrenceDescriptor::new(Recurrence::MonthlyByDate { day: 31 }, None, created);
///
/// assert!(occurrences_in_month(&rent, 2023, 2).contains(&28));
/// assert!(occurrences_in_month(&rent, 2024, 2).contains(&29));
/// assert!(occurrences_in_month(&rent, 2024, 4).contains(&30));
/// ```
pub fn occurrences_in_month(
    descriptor: &RecurrenceDescriptor,
    year: i32,
    month: u32,
) -> BTreeSet<u32> {
    occurrences_in_month_with_limit(descriptor, year, month, DEFAULT_MAX_WALK_STEPS)
}

/// Same as [`occurrences_in_month`] with an explicit bound on interval walk
/// iterations.
///
/// A walk that would exceed `max_steps` is abandoned and yields an empty set.
pub fn occurrences_in_month_with_limit(
    descriptor: &RecurrenceDescriptor,
    year: i32,
    month: u32,
    max_steps: usize,
) -> BTreeSet<u32> {
    let month_len = days_in_month(year, month);
    if month_len == 0 {
        return BTreeSet::new();
    }

    match descriptor.recurrence() {
        Recurrence::OneTime => descriptor
            .next_billing_date()
            .filter(|date| date.is_in_month(year, month))
            .map(|date| date.day())
            .into_iter()
            .collect(),
        Recurrence::MonthlyByDate { day } => BTreeSet::from([clamp_day(day, month_len)]),
        Recurrence::YearlyByDate {
            month: billing_month,
            day,
        } => {
            if billing_month == month {
                BTreeSet::from([clamp_day(day, month_len)])
            } else {
                BTreeSet::new()
            }
        }
        Recurrence::Interval { count, unit } => {
            let Some(anchor) = descriptor.next_billing_date() else {
                return BTreeSet::new();
            };
            let Some(lattice) = IntervalLattice::new(anchor, count, unit) else {
                trace!(count, %unit, "non-positive interval count has no occurrences");
                return BTreeSet::new();
            };

            walk_month(&lattice, year, month, max_steps).unwrap_or_else(|err| {
                warn!(%anchor, count, %unit, year, month, error = %err, "interval walk abandoned");
                BTreeSet::new()
            })
        }
    }
}

/// Clamps a configured day of month into `1..=month_len`.
#[inline]
pub(crate) fn clamp_day(day: u32, month_len: u32) -> u32 {
    day.clamp(1, month_len)
}

/// Collects the lattice dates inside (`year`, `month`) reached from the anchor.
///
/// The cursor starts at the anchor and only rewinds while it lies after the
/// month, so dates earlier than the anchor appear only when the anchor is
/// past the month, and then only the last one on or before its final day.
fn walk_month(
    lattice: &IntervalLattice,
    year: i32,
    month: u32,
    max_steps: usize,
) -> Result<BTreeSet<u32>, RecurrenceError> {
    let first = CalendarDate::first_of_month(year, month)?;
    let last = CalendarDate::last_of_month(year, month)?;
    let mut budget = StepBudget::new(max_steps);

    // Start no later than the anchor; rewind only while after the month
    let mut k = lattice.index_near(last).min(0);
    while lattice.at(k)? > last {
        budget.spend()?;
        k -= 1;
    }
    while k < 0 && lattice.at(k + 1)? <= last {
        budget.spend()?;
        k += 1;
    }

    let mut days = BTreeSet::new();
    loop {
        let date = lattice.at(k)?;
        if date > last {
            break;
        }
        budget.spend()?;
        if date >= first {
            days.insert(date.day());
        }
        k += 1;
    }

    trace!(year, month, steps = budget.spent(), "interval walk complete");
    Ok(days)
}
