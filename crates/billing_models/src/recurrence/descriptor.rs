//! Recurrence descriptor and recurrence kinds.

use billing_core::types::CalendarDate;
use std::fmt;

use super::unit::IntervalUnit;

/// Whether a subscription bills once or repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BillingKind {
    /// A single charge.
    #[cfg_attr(feature = "serde", serde(alias = "one-time", alias = "onetime"))]
    OneTime,
    /// A repeating charge.
    Recurring,
}

/// Shape of a repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecurrenceKind {
    /// Every N days, weeks, months or years.
    Interval,
    /// A fixed day of every month.
    #[cfg_attr(feature = "serde", serde(alias = "monthly"))]
    MonthlyByDate,
    /// A fixed month and day of every year.
    #[cfg_attr(feature = "serde", serde(alias = "yearly"))]
    YearlyByDate,
}

/// A billing schedule.
///
/// Each variant carries exactly the fields its kind needs.
///
/// Out-of-range values are representable. The calculators clamp days
/// beyond a month's length to its last day, and interval counts below 1
/// produce no occurrences.
///
/// # Examples
///
/// ```
/// use billing_models::recurrence::{IntervalUnit, Recurrence};
///
/// let biweekly = Recurrence::Interval { count: 2, unit: IntervalUnit::Week };
/// assert_eq!(biweekly.to_string(), "every 2 weeks");
///
/// let rent = Recurrence::MonthlyByDate { day: 1 };
/// assert!(rent.is_recurring());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// A single charge on the next billing date.
    OneTime,
    /// Every `count` `unit`s, anchored at the next billing date.
    Interval {
        /// Number of units per step (expected to be at least 1).
        count: i32,
        /// Unit of each step.
        unit: IntervalUnit,
    },
    /// A fixed day of every month.
    MonthlyByDate {
        /// Day of month (1-31), clamped to shorter months.
        day: u32,
    },
    /// A fixed month and day of every year.
    YearlyByDate {
        /// Month of year (1-12).
        month: u32,
        /// Day of month (1-31), clamped to shorter months.
        day: u32,
    },
}

impl Recurrence {
    /// Returns the billing kind.
    #[inline]
    pub fn billing_kind(&self) -> BillingKind {
        match self {
            Recurrence::OneTime => BillingKind::OneTime,
            _ => BillingKind::Recurring,
        }
    }

    /// Returns the recurrence kind, or `None` for one-time charges.
    #[inline]
    pub fn recurrence_kind(&self) -> Option<RecurrenceKind> {
        match self {
            Recurrence::OneTime => None,
            Recurrence::Interval { .. } => Some(RecurrenceKind::Interval),
            Recurrence::MonthlyByDate { .. } => Some(RecurrenceKind::MonthlyByDate),
            Recurrence::YearlyByDate { .. } => Some(RecurrenceKind::YearlyByDate),
        }
    }

    /// Returns whether this schedule repeats.
    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.billing_kind() == BillingKind::Recurring
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::OneTime => write!(f, "one-time"),
            Recurrence::Interval { count: 1, unit } => write!(f, "every {}", unit),
            Recurrence::Interval { count, unit } => write!(f, "every {} {}s", count, unit),
            Recurrence::MonthlyByDate { day } => write!(f, "monthly on day {}", day),
            Recurrence::YearlyByDate { month, day } => {
                write!(f, "yearly on {:02}-{:02}", month, day)
            }
        }
    }
}

/// Recurrence configuration of one subscription, as handed to the calculators.
///
/// Built by the caller from a persisted subscription record immediately
/// before a calculation; the calculators never store it.
///
/// # Examples
///
/// ```
/// use billing_core::types::CalendarDate;
/// use billing_models::recurrence::{BillingKind, Recurrence, RecurrenceDescriptor};
///
/// let purchase = CalendarDate::from_ymd(2024, 1, 10).unwrap();
/// let due = CalendarDate::from_ymd(2024, 2, 10).unwrap();
///
/// let descriptor = RecurrenceDescriptor::new(Recurrence::OneTime, Some(due), purchase);
/// assert_eq!(descriptor.billing_kind(), BillingKind::OneTime);
/// assert_eq!(descriptor.next_billing_date(), Some(due));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecurrenceDescriptor {
    /// The billing schedule.
    recurrence: Recurrence,
    /// Next scheduled occurrence; `None` when disabled or not yet computed.
    next_billing_date: Option<CalendarDate>,
    /// Creation date, the cycle start of one-time charges.
    created_at: CalendarDate,
}

impl RecurrenceDescriptor {
    /// Creates a descriptor.
    #[inline]
    pub fn new(
        recurrence: Recurrence,
        next_billing_date: Option<CalendarDate>,
        created_at: CalendarDate,
    ) -> Self {
        Self {
            recurrence,
            next_billing_date,
            created_at,
        }
    }

    /// Returns the billing schedule.
    #[inline]
    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    /// Returns the next scheduled billing date, if any.
    #[inline]
    pub fn next_billing_date(&self) -> Option<CalendarDate> {
        self.next_billing_date
    }

    /// Returns the creation date.
    #[inline]
    pub fn created_at(&self) -> CalendarDate {
        self.created_at
    }

    /// Returns the billing kind.
    #[inline]
    pub fn billing_kind(&self) -> BillingKind {
        self.recurrence.billing_kind()
    }

    /// Returns the recurrence kind, or `None` for one-time charges.
    #[inline]
    pub fn recurrence_kind(&self) -> Option<RecurrenceKind> {
        self.recurrence.recurrence_kind()
    }

    /// Returns a copy with a different next billing date.
    #[inline]
    pub fn with_next_billing_date(self, next_billing_date: Option<CalendarDate>) -> Self {
        Self {
            next_billing_date,
            ..self
        }
    }
}
