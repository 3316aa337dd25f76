//! Forward projection of billing dates.
//!
//! Used by reminders and calendar feeds that need concrete future dates
//! rather than per-month day sets.

use billing_core::types::{days_in_month, CalendarDate, DateShift};
use std::iter;
use tracing::warn;

use crate::occurrences::clamp_day;
use crate::recurrence::lattice::{IntervalLattice, StepBudget};
use crate::recurrence::{Recurrence, RecurrenceDescriptor, RecurrenceError, DEFAULT_MAX_WALK_STEPS};

/// Upper bound on the dates returned by one [`upcoming_billing_dates`] call.
pub const MAX_PROJECTED_DATES: usize = DEFAULT_MAX_WALK_STEPS;

/// Returns up to `limit` billing dates on or after `from`, in order.
///
/// `limit` is capped at [`MAX_PROJECTED_DATES`].
///
/// Projection starts at the later of `from` and the next billing date, so a
/// subscription without a next billing date (disabled) has no upcoming
/// dates. Monthly and yearly dates clamp to short months independently
/// each period; interval dates are measured from the next billing date.
///
/// # Examples
///
/// ```
/// use billing_core::types::CalendarDate;
/// use billing_models::projection::upcoming_billing_dates;
/// use billing_models::recurrence::{Recurrence, RecurrenceDescriptor};
///
/// let d = RecurrenceDescriptor::new(
///     Recurrence::MonthlyByDate { day: 31 },
///     Some(CalendarDate::from_ymd(2024, 1, 31).unwrap()),
///     CalendarDate::from_ymd(2023, 12, 31).unwrap(),
/// );
///
/// let dates = upcoming_billing_dates(&d, CalendarDate::from_ymd(2024, 1, 1).unwrap(), 3);
/// let shown: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
/// assert_eq!(shown, ["2024-01-31", "2024-02-29", "2024-03-31"]);
/// ```
pub fn upcoming_billing_dates(
    descriptor: &RecurrenceDescriptor,
    from: CalendarDate,
    limit: usize,
) -> Vec<CalendarDate> {
    let Some(next) = descriptor.next_billing_date() else {
        return Vec::new();
    };
    let limit = limit.min(MAX_PROJECTED_DATES);
    if limit == 0 {
        return Vec::new();
    }
    let start = from.max(next);

    match descriptor.recurrence() {
        Recurrence::OneTime => {
            if next >= start {
                vec![next]
            } else {
                Vec::new()
            }
        }
        Recurrence::MonthlyByDate { day } => {
            let Ok(first) = CalendarDate::first_of_month(start.year(), start.month()) else {
                return Vec::new();
            };
            every(first, DateShift::months(1))
                .filter_map(|month| clamped(month.year(), month.month(), day))
                .filter(|date| *date >= start)
                .take(limit)
                .collect()
        }
        Recurrence::YearlyByDate { month, day } => {
            let Ok(first) = CalendarDate::first_of_month(start.year(), month) else {
                return Vec::new();
            };
            every(first, DateShift::years(1))
                .filter_map(|year| clamped(year.year(), month, day))
                .filter(|date| *date >= start)
                .take(limit)
                .collect()
        }
        Recurrence::Interval { count, unit } => {
            let Some(lattice) = IntervalLattice::new(next, count, unit) else {
                return Vec::new();
            };
            let mut dates = Vec::with_capacity(limit);
            if let Err(err) = walk_from(&lattice, start, limit, &mut dates) {
                warn!(%next, count, %unit, %start, error = %err, "upcoming walk stopped early");
            }
            dates
        }
    }
}

/// Returns the billing date following the next billing date.
///
/// This is the next billing date a caller stores once the current one has
/// been charged. One-time charges have none.
///
/// # Examples
///
/// ```
/// use billing_core::types::CalendarDate;
/// use billing_models::projection::advance_billing_date;
/// use billing_models::recurrence::{Recurrence, RecurrenceDescriptor};
///
/// let d = RecurrenceDescriptor::new(
///     Recurrence::MonthlyByDate { day: 31 },
///     Some(CalendarDate::from_ymd(2024, 2, 29).unwrap()),
///     CalendarDate::from_ymd(2023, 12, 31).unwrap(),
/// );
/// assert_eq!(advance_billing_date(&d), Some(CalendarDate::from_ymd(2024, 3, 31).unwrap()));
/// ```
pub fn advance_billing_date(descriptor: &RecurrenceDescriptor) -> Option<CalendarDate> {
    let next = descriptor.next_billing_date()?;
    let day_after = next.shift(DateShift::days(1)).ok()?;
    upcoming_billing_dates(descriptor, day_after, 1).into_iter().next()
}

/// Returns the signed number of days from `today` to the next billing date.
///
/// Negative when the billing date has passed; `None` without a next billing date.
pub fn days_until_billing(descriptor: &RecurrenceDescriptor, today: CalendarDate) -> Option<i64> {
    descriptor.next_billing_date().map(|next| next - today)
}

fn every(first: CalendarDate, step: DateShift) -> impl Iterator<Item = CalendarDate> {
    iter::successors(Some(first), move |date| date.shift(step).ok())
}

fn clamped(year: i32, month: u32, day: u32) -> Option<CalendarDate> {
    let month_len = days_in_month(year, month);
    if month_len == 0 {
        return None;
    }
    CalendarDate::from_ymd(year, month, clamp_day(day, month_len)).ok()
}

fn walk_from(
    lattice: &IntervalLattice,
    start: CalendarDate,
    limit: usize,
    dates: &mut Vec<CalendarDate>,
) -> Result<(), RecurrenceError> {
    let mut budget = StepBudget::new(DEFAULT_MAX_WALK_STEPS.saturating_add(limit));

    let mut k = lattice.index_near(start);
    while lattice.at(k)? >= start {
        budget.spend()?;
        k -= 1;
    }

    while dates.len() < limit {
        budget.spend()?;
        k += 1;
        let date = lattice.at(k)?;
        if date >= start {
            dates.push(date);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::IntervalUnit;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn descriptor(recurrence: Recurrence, next: Option<CalendarDate>) -> RecurrenceDescriptor {
        RecurrenceDescriptor::new(recurrence, next, date(2020, 1, 1))
    }

    // ========================================
    // upcoming_billing_dates
    // ========================================

    #[test]
    fn test_upcoming_one_time() {
        let d = descriptor(Recurrence::OneTime, Some(date(2024, 5, 1)));
        assert_eq!(
            upcoming_billing_dates(&d, date(2024, 1, 1), 5),
            vec![date(2024, 5, 1)]
        );
        assert!(upcoming_billing_dates(&d, date(2024, 5, 2), 5).is_empty());
    }

    #[test]
    fn test_upcoming_monthly_starts_at_next_billing_date() {
        let d = descriptor(Recurrence::MonthlyByDate { day: 15 }, Some(date(2024, 3, 15)));
        assert_eq!(
            upcoming_billing_dates(&d, date(2024, 1, 1), 2),
            vec![date(2024, 3, 15), date(2024, 4, 15)]
        );
        assert_eq!(
            upcoming_billing_dates(&d, date(2024, 4, 16), 2),
            vec![date(2024, 5, 15), date(2024, 6, 15)]
        );
    }

    #[test]
    fn test_upcoming_monthly_clamps_each_month() {
        let d = descriptor(Recurrence::MonthlyByDate { day: 30 }, Some(date(2023, 1, 30)));
        assert_eq!(
            upcoming_billing_dates(&d, date(2023, 1, 1), 3),
            vec![date(2023, 1, 30), date(2023, 2, 28), date(2023, 3, 30)]
        );
    }

    #[test]
    fn test_upcoming_yearly() {
        let d = descriptor(
            Recurrence::YearlyByDate { month: 2, day: 29 },
            Some(date(2024, 2, 29)),
        );
        assert_eq!(
            upcoming_billing_dates(&d, date(2024, 1, 1), 5),
            vec![
                date(2024, 2, 29),
                date(2025, 2, 28),
                date(2026, 2, 28),
                date(2027, 2, 28),
                date(2028, 2, 29)
            ]
        );
    }

    #[test]
    fn test_upcoming_yearly_invalid_month() {
        let d = descriptor(
            Recurrence::YearlyByDate { month: 13, day: 1 },
            Some(date(2024, 2, 29)),
        );
        assert!(upcoming_billing_dates(&d, date(2024, 1, 1), 3).is_empty());
    }

    #[test]
    fn test_upcoming_interval() {
        let d = descriptor(
            Recurrence::Interval {
                count: 1,
                unit: IntervalUnit::Month,
            },
            Some(date(2024, 1, 31)),
        );
        assert_eq!(
            upcoming_billing_dates(&d, date(2024, 3, 1), 3),
            vec![date(2024, 3, 31), date(2024, 4, 30), date(2024, 5, 31)]
        );

        let weekly = descriptor(
            Recurrence::Interval {
                count: 1,
                unit: IntervalUnit::Week,
            },
            Some(date(2024, 1, 3)),
        );
        assert_eq!(
            upcoming_billing_dates(&weekly, date(2024, 1, 4), 2),
            vec![date(2024, 1, 10), date(2024, 1, 17)]
        );
    }

    #[test]
    fn test_upcoming_huge_limit_is_capped() {
        let daily = descriptor(
            Recurrence::Interval {
                count: 1,
                unit: IntervalUnit::Day,
            },
            Some(date(2024, 1, 1)),
        );
        let dates = upcoming_billing_dates(&daily, date(2024, 1, 1), usize::MAX);
        assert_eq!(dates.len(), MAX_PROJECTED_DATES);
        assert_eq!(dates[0], date(2024, 1, 1));
        assert!(dates.windows(2).all(|w| w[1] - w[0] == 1));

        let monthly = descriptor(Recurrence::MonthlyByDate { day: 31 }, Some(date(2024, 1, 31)));
        assert_eq!(
            upcoming_billing_dates(&monthly, date(2024, 1, 1), usize::MAX).len(),
            MAX_PROJECTED_DATES
        );
    }

    #[test]
    fn test_upcoming_disabled_or_zero_limit() {
        let d = descriptor(Recurrence::MonthlyByDate { day: 1 }, None);
        assert!(upcoming_billing_dates(&d, date(2024, 1, 1), 3).is_empty());

        let d = descriptor(Recurrence::MonthlyByDate { day: 1 }, Some(date(2024, 1, 1)));
        assert!(upcoming_billing_dates(&d, date(2024, 1, 1), 0).is_empty());

        let d = descriptor(
            Recurrence::Interval {
                count: 0,
                unit: IntervalUnit::Day,
            },
            Some(date(2024, 1, 1)),
        );
        assert!(upcoming_billing_dates(&d, date(2024, 1, 1), 3).is_empty());
    }

    // ========================================
    // advance_billing_date / days_until_billing
    // ========================================

    #[test]
    fn test_advance_billing_date() {
        let monthly = descriptor(Recurrence::MonthlyByDate { day: 31 }, Some(date(2024, 4, 30)));
        assert_eq!(advance_billing_date(&monthly), Some(date(2024, 5, 31)));

        let yearly = descriptor(
            Recurrence::YearlyByDate { month: 12, day: 25 },
            Some(date(2024, 12, 25)),
        );
        assert_eq!(advance_billing_date(&yearly), Some(date(2025, 12, 25)));

        let daily = descriptor(
            Recurrence::Interval {
                count: 3,
                unit: IntervalUnit::Day,
            },
            Some(date(2024, 2, 28)),
        );
        assert_eq!(advance_billing_date(&daily), Some(date(2024, 3, 2)));

        let one_time = descriptor(Recurrence::OneTime, Some(date(2024, 2, 28)));
        assert_eq!(advance_billing_date(&one_time), None);

        let disabled = descriptor(Recurrence::MonthlyByDate { day: 1 }, None);
        assert_eq!(advance_billing_date(&disabled), None);
    }

    #[test]
    fn test_days_until_billing() {
        let d = descriptor(Recurrence::MonthlyByDate { day: 1 }, Some(date(2024, 3, 1)));
        assert_eq!(days_until_billing(&d, date(2024, 2, 1)), Some(29));
        assert_eq!(days_until_billing(&d, date(2024, 3, 1)), Some(0));
        assert_eq!(days_until_billing(&d, date(2024, 3, 4)), Some(-3));

        let disabled = descriptor(Recurrence::MonthlyByDate { day: 1 }, None);
        assert_eq!(days_until_billing(&disabled, date(2024, 3, 4)), None);
    }
}
