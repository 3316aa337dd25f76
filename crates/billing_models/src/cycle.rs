//! Billing-cycle position.
//!
//! Computes how far through its current billing cycle a subscription is as
//! of a given day, for progress indicators. `None` means "render no
//! indicator", not an error.

use billing_core::types::{CalendarDate, DateShift};
use tracing::debug;

use crate::recurrence::{Recurrence, RecurrenceDescriptor};

/// Returns the start of the cycle that ends on the next billing date.
///
/// - One-time: the creation date (purchase to due date).
/// - Monthly by date: one month before the next billing date.
/// - Yearly by date: one year before the next billing date.
/// - Interval: one step before the next billing date.
///
/// Returns `None` without a next billing date, for interval counts below 1,
/// or if the shift leaves the representable range.
///
/// # Examples
///
/// ```
/// use billing_core::types::CalendarDate;
/// use billing_models::cycle::previous_cycle_start;
/// use billing_models::recurrence::{Recurrence, RecurrenceDescriptor};
///
/// let d = RecurrenceDescriptor::new(
///     Recurrence::MonthlyByDate { day: 31 },
///     Some(CalendarDate::from_ymd(2024, 3, 31).unwrap()),
///     CalendarDate::from_ymd(2023, 1, 31).unwrap(),
/// );
/// assert_eq!(previous_cycle_start(&d), Some(CalendarDate::from_ymd(2024, 2, 29).unwrap()));
/// ```
pub fn previous_cycle_start(descriptor: &RecurrenceDescriptor) -> Option<CalendarDate> {
    let next = descriptor.next_billing_date()?;

    let shift = match descriptor.recurrence() {
        Recurrence::OneTime => return Some(descriptor.created_at()),
        Recurrence::MonthlyByDate { .. } => DateShift::months(-1),
        Recurrence::YearlyByDate { .. } => DateShift::years(-1),
        Recurrence::Interval { count, unit } => {
            if count <= 0 {
                return None;
            }
            unit.step(count).negated()
        }
    };

    next.shift(shift)
        .map_err(|err| debug!(%next, error = %err, "previous cycle start out of range"))
        .ok()
}

/// Returns the percentage (0-100) of the current billing cycle elapsed on `today`.
///
/// The cycle runs from [`previous_cycle_start`] to the next billing date.
/// Days before the cycle start report 0; days on or after the next billing
/// date (overdue) report 100. One-time charges always measure from the
/// creation date to the due date, even once the due date has passed.
///
/// Returns `None` when there is no next billing date, no previous cycle
/// start, or the cycle is not at least one day long.
///
/// # Examples
///
/// ```
/// use approx::assert_relative_eq;
/// use billing_core::types::CalendarDate;
/// use billing_models::cycle::cycle_progress_percent;
/// use billing_models::recurrence::{Recurrence, RecurrenceDescriptor};
///
/// let d = RecurrenceDescriptor::new(
///     Recurrence::MonthlyByDate { day: 1 },
///     Some(CalendarDate::from_ymd(2024, 3, 1).unwrap()),
///     CalendarDate::from_ymd(2023, 6, 1).unwrap(),
/// );
/// let today = CalendarDate::from_ymd(2024, 2, 15).unwrap();
///
/// // 14 of 29 days in a leap February
/// let progress = cycle_progress_percent(&d, today).unwrap();
/// assert_relative_eq!(progress, 1400.0 / 29.0, epsilon = 1e-9);
/// ```
pub fn cycle_progress_percent(descriptor: &RecurrenceDescriptor, today: CalendarDate) -> Option<f64> {
    let next = descriptor.next_billing_date()?;
    let start = previous_cycle_start(descriptor)?;

    let duration = next - start;
    if duration <= 0 {
        debug!(%start, %next, "non-positive billing cycle");
        return None;
    }

    let elapsed = today - start;
    let ratio = (elapsed as f64 / duration as f64).clamp(0.0, 1.0);
    Some(ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::IntervalUnit;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn monthly(next: CalendarDate) -> RecurrenceDescriptor {
        RecurrenceDescriptor::new(
            Recurrence::MonthlyByDate { day: next.day() },
            Some(next),
            date(2020, 1, 1),
        )
    }

    // ========================================
    // previous_cycle_start
    // ========================================

    #[test]
    fn test_previous_cycle_start_per_kind() {
        let next = date(2024, 3, 31);
        let created = date(2024, 1, 5);

        let one_time = RecurrenceDescriptor::new(Recurrence::OneTime, Some(next), created);
        assert_eq!(previous_cycle_start(&one_time), Some(created));

        assert_eq!(previous_cycle_start(&monthly(next)), Some(date(2024, 2, 29)));

        let yearly = RecurrenceDescriptor::new(
            Recurrence::YearlyByDate { month: 2, day: 29 },
            Some(date(2028, 2, 29)),
            created,
        );
        assert_eq!(previous_cycle_start(&yearly), Some(date(2027, 2, 28)));

        let fortnightly = RecurrenceDescriptor::new(
            Recurrence::Interval {
                count: 2,
                unit: IntervalUnit::Week,
            },
            Some(next),
            created,
        );
        assert_eq!(previous_cycle_start(&fortnightly), Some(date(2024, 3, 17)));

        let quarterly = RecurrenceDescriptor::new(
            Recurrence::Interval {
                count: 3,
                unit: IntervalUnit::Month,
            },
            Some(next),
            created,
        );
        assert_eq!(previous_cycle_start(&quarterly), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_previous_cycle_start_requires_next() {
        let d = RecurrenceDescriptor::new(
            Recurrence::MonthlyByDate { day: 1 },
            None,
            date(2024, 1, 1),
        );
        assert_eq!(previous_cycle_start(&d), None);
    }

    // ========================================
    // cycle_progress_percent
    // ========================================

    #[test]
    fn test_progress_leap_february() {
        let d = monthly(date(2024, 3, 1));
        let progress = cycle_progress_percent(&d, date(2024, 2, 15)).unwrap();
        assert_relative_eq!(progress, 48.275862068965516, epsilon = 1e-9);
    }

    #[test]
    fn test_progress_bounds() {
        let d = monthly(date(2024, 3, 1));
        assert_eq!(cycle_progress_percent(&d, date(2024, 2, 1)), Some(0.0));
        assert_eq!(cycle_progress_percent(&d, date(2024, 3, 1)), Some(100.0));
    }

    #[test]
    fn test_progress_clamps() {
        let d = monthly(date(2024, 3, 1));
        assert_eq!(cycle_progress_percent(&d, date(2024, 1, 10)), Some(0.0));
        assert_eq!(cycle_progress_percent(&d, date(2024, 5, 10)), Some(100.0));
    }

    #[test]
    fn test_progress_interval() {
        let d = RecurrenceDescriptor::new(
            Recurrence::Interval {
                count: 2,
                unit: IntervalUnit::Week,
            },
            Some(date(2024, 3, 15)),
            date(2024, 1, 1),
        );
        assert_relative_eq!(
            cycle_progress_percent(&d, date(2024, 3, 8)).unwrap(),
            50.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_progress_yearly() {
        let d = RecurrenceDescriptor::new(
            Recurrence::YearlyByDate { month: 1, day: 1 },
            Some(date(2025, 1, 1)),
            date(2020, 1, 1),
        );
        // 2024 has 366 days; 183 elapsed on July 2nd
        assert_relative_eq!(
            cycle_progress_percent(&d, date(2024, 7, 2)).unwrap(),
            18300.0 / 366.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_one_time_measures_from_creation() {
        let d = RecurrenceDescriptor::new(
            Recurrence::OneTime,
            Some(date(2024, 1, 11)),
            date(2024, 1, 1),
        );
        assert_relative_eq!(
            cycle_progress_percent(&d, date(2024, 1, 6)).unwrap(),
            50.0,
            epsilon = 1e-12
        );
        // Past the due date: still the same purchase-to-due span, not a new cycle
        assert_eq!(cycle_progress_percent(&d, date(2024, 6, 1)), Some(100.0));
    }

    #[test]
    fn test_one_time_degenerate_span() {
        let same_day = RecurrenceDescriptor::new(
            Recurrence::OneTime,
            Some(date(2024, 1, 1)),
            date(2024, 1, 1),
        );
        assert_eq!(cycle_progress_percent(&same_day, date(2024, 1, 1)), None);

        let created_after_due = RecurrenceDescriptor::new(
            Recurrence::OneTime,
            Some(date(2024, 1, 1)),
            date(2024, 2, 1),
        );
        assert_eq!(cycle_progress_percent(&created_after_due, date(2024, 1, 15)), None);
    }

    #[test]
    fn test_progress_without_next_date() {
        let d = RecurrenceDescriptor::new(Recurrence::OneTime, None, date(2024, 1, 1));
        assert_eq!(cycle_progress_percent(&d, date(2024, 1, 15)), None);
    }

    #[test]
    fn test_progress_degenerate_interval_count() {
        for count in [0, -2] {
            for unit in [
                IntervalUnit::Day,
                IntervalUnit::Week,
                IntervalUnit::Month,
                IntervalUnit::Year,
            ] {
                let d = RecurrenceDescriptor::new(
                    Recurrence::Interval { count, unit },
                    Some(date(2024, 3, 1)),
                    date(2024, 1, 1),
                );
                assert_eq!(cycle_progress_percent(&d, date(2024, 2, 15)), None);
            }
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_progress_within_bounds(
                offset in -400i64..400,
                count in 1i32..12,
                unit_idx in 0usize..4,
            ) {
                let unit = [
                    IntervalUnit::Day,
                    IntervalUnit::Week,
                    IntervalUnit::Month,
                    IntervalUnit::Year,
                ][unit_idx];
                let next = date(2024, 3, 31);
                let d = RecurrenceDescriptor::new(
                    Recurrence::Interval { count, unit },
                    Some(next),
                    date(2020, 1, 1),
                );
                let today = next.shift(DateShift::days(offset)).unwrap();

                let progress = cycle_progress_percent(&d, today).unwrap();
                prop_assert!((0.0..=100.0).contains(&progress));
                if offset >= 0 {
                    prop_assert_eq!(progress, 100.0);
                }
            }
        }
    }
}
