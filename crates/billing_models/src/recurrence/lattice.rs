//! Billing dates of an interval recurrence, indexed from the anchor.

use billing_core::types::{CalendarDate, DateError, DateShift};

use super::error::RecurrenceError;
use super::unit::IntervalUnit;

/// Upper bound on interval walk iterations used when callers do not pick one.
pub const DEFAULT_MAX_WALK_STEPS: usize = 10_000;

/// The dates `anchor + k * step` for every integer `k`.
///
/// Each date is computed from the anchor directly rather than from its
/// neighbour, so month-end clamping never accumulates: an anchor on the
/// 31st yields the 30th in April and the 31st again in May.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IntervalLattice {
    anchor: CalendarDate,
    step: DateShift,
    unit: IntervalUnit,
    count: i32,
}

impl IntervalLattice {
    /// Returns `None` when `count` cannot advance the walk.
    pub(crate) fn new(anchor: CalendarDate, count: i32, unit: IntervalUnit) -> Option<Self> {
        (count > 0).then(|| Self {
            anchor,
            step: unit.step(count),
            unit,
            count,
        })
    }

    /// The `k`-th date from the anchor (negative `k` walks backward).
    pub(crate) fn at(&self, k: i64) -> Result<CalendarDate, DateError> {
        let shift = self.step.times(k).ok_or(DateError::OutOfRange {
            date: self.anchor,
            shift: self.step,
        })?;
        self.anchor.shift(shift)
    }

    /// An index whose date lies in or before the month of `target`.
    ///
    /// For day and week units the date is on or before `target`; callers
    /// still adjust by walking, this only keeps the walk short.
    pub(crate) fn index_near(&self, target: CalendarDate) -> i64 {
        let count = i64::from(self.count);
        match self.unit {
            IntervalUnit::Day => (target - self.anchor).div_euclid(count),
            IntervalUnit::Week => (target - self.anchor).div_euclid(7 * count),
            IntervalUnit::Month => month_index(target)
                .saturating_sub(month_index(self.anchor))
                .div_euclid(count),
            IntervalUnit::Year => month_index(target)
                .saturating_sub(month_index(self.anchor))
                .div_euclid(12 * count),
        }
    }
}

fn month_index(date: CalendarDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month()) - 1
}

/// Counts walk iterations against a bound.
#[derive(Debug)]
pub(crate) struct StepBudget {
    limit: usize,
    spent: usize,
}

impl StepBudget {
    pub(crate) fn new(limit: usize) -> Self {
        Self { limit, spent: 0 }
    }

    pub(crate) fn spend(&mut self) -> Result<(), RecurrenceError> {
        self.spent += 1;
        if self.spent > self.limit {
            return Err(RecurrenceError::WalkLimitExceeded { limit: self.limit });
        }
        Ok(())
    }

    pub(crate) fn spent(&self) -> usize {
        self.spent
    }
}
