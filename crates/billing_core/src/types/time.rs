//! Calendar dates and month arithmetic for billing calculations.
//!
//! This module provides:
//! - `CalendarDate`: Type-safe calendar date (year, month, day) with no time component
//! - `DateShift`: A years/months/days offset applied in calendar order
//! - Month-length lookup with the Gregorian leap-year rule
//!
//! All arithmetic is calendar-pure: there is no time-of-day, timezone or DST
//! anywhere in this module.
//!
//! # Examples
//!
//! ```
//! use billing_core::types::time::{shift_date, CalendarDate, DateShift};
//!
//! let start = CalendarDate::from_ymd(2024, 1, 31).unwrap();
//!
//! // Months first (with clamping), then the exact day offset
//! let shifted = shift_date(start, DateShift::new(0, 1, 1)).unwrap();
//! assert_eq!(shifted, CalendarDate::from_ymd(2024, 3, 1).unwrap());
//! ```

use chrono::{Datelike, Days, NaiveDate, Utc};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Returns whether `year` is a Gregorian leap year.
///
/// Divisible by 4, except centuries, which must also be divisible by 400.
///
/// # Examples
///
/// ```
/// use billing_core::types::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2000));
/// ```
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the number of days in the given month.
///
/// Returns 0 for a month outside 1-12.
///
/// # Examples
///
/// ```
/// use billing_core::types::days_in_month;
///
/// assert_eq!(days_in_month(2024, 1), 31);
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// assert_eq!(days_in_month(2024, 4), 30);
/// ```
#[inline]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Calendar date with no time component.
///
/// A (year, month, day) triple ordered by year, then month, then day.
/// Backed by `chrono::NaiveDate` for exact day-count arithmetic, and
/// serialised as an ISO 8601 string (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use billing_core::types::time::CalendarDate;
///
/// let date = CalendarDate::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: CalendarDate = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Elapsed days between dates
/// let start = CalendarDate::from_ymd(2024, 2, 1).unwrap();
/// let end = CalendarDate::from_ymd(2024, 3, 1).unwrap();
/// assert_eq!(end - start, 29);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a CalendarDate from year, month, and day components.
    ///
    /// # Arguments
    /// * `year` - Year (e.g., 2024)
    /// * `month` - Month (1-12)
    /// * `day` - Day (1-31, depending on month)
    ///
    /// # Returns
    /// `Ok(CalendarDate)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_core::types::time::CalendarDate;
    ///
    /// let leap = CalendarDate::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(leap.day(), 29);
    ///
    /// assert!(CalendarDate::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns the first day of the given month.
    pub fn first_of_month(year: i32, month: u32) -> Result<Self, DateError> {
        Self::from_ymd(year, month, 1)
    }

    /// Returns the last day of the given month.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_core::types::time::CalendarDate;
    ///
    /// let last = CalendarDate::last_of_month(2024, 2).unwrap();
    /// assert_eq!(last.day(), 29);
    /// ```
    pub fn last_of_month(year: i32, month: u32) -> Result<Self, DateError> {
        Self::from_ymd(year, month, days_in_month(year, month))
    }

    /// Returns today's calendar date in UTC.
    ///
    /// The time of day is discarded, so repeated calls within one UTC day
    /// compare equal.
    pub fn today() -> Self {
        CalendarDate(Utc::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_core::types::time::CalendarDate;
    ///
    /// let date = CalendarDate::parse("2024-06-15").unwrap();
    /// assert_eq!(date.month(), 6);
    ///
    /// assert!(CalendarDate::parse("15/06/2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(CalendarDate)
            .map_err(|e| DateError::ParseError(format!("{s:?}: {e}")))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns whether this date lies in the given (year, month).
    #[inline]
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.year() == year && self.month() == month
    }

    /// Shifts this date, see [`shift_date`].
    #[inline]
    pub fn shift(self, shift: DateShift) -> Result<Self, DateError> {
        shift_date(self, shift)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl Sub for CalendarDate {
    type Output = i64;

    /// Returns the number of elapsed days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        CalendarDate::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Offset applied to a [`CalendarDate`] by [`shift_date`].
///
/// Years and months are calendar-relative and clamp the day of month;
/// days are an exact day count applied afterwards.
///
/// # Examples
///
/// ```
/// use billing_core::types::time::DateShift;
///
/// let quarter = DateShift::months(3);
/// assert_eq!(quarter.negated(), DateShift::months(-3));
/// assert_eq!(quarter.times(4), Some(DateShift::months(12)));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DateShift {
    /// Whole years to add (may be negative).
    pub years: i32,
    /// Whole months to add (may be negative).
    pub months: i32,
    /// Exact days to add after the month/year shift (may be negative).
    pub days: i64,
}

impl DateShift {
    /// Creates a shift from all three components.
    #[inline]
    pub const fn new(years: i32, months: i32, days: i64) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// A shift of whole years.
    #[inline]
    pub const fn years(years: i32) -> Self {
        Self::new(years, 0, 0)
    }

    /// A shift of whole months.
    #[inline]
    pub const fn months(months: i32) -> Self {
        Self::new(0, months, 0)
    }

    /// A shift of exact days.
    #[inline]
    pub const fn days(days: i64) -> Self {
        Self::new(0, 0, days)
    }

    /// Returns the shift pointing the opposite way.
    #[inline]
    pub fn negated(self) -> Self {
        Self {
            years: self.years.saturating_neg(),
            months: self.months.saturating_neg(),
            days: self.days.saturating_neg(),
        }
    }

    /// Multiplies every component by `k`, or `None` on overflow.
    pub fn times(self, k: i64) -> Option<Self> {
        let years = i32::try_from(i64::from(self.years).checked_mul(k)?).ok()?;
        let months = i32::try_from(i64::from(self.months).checked_mul(k)?).ok()?;
        let days = self.days.checked_mul(k)?;
        Some(Self {
            years,
            months,
            days,
        })
    }
}

impl fmt::Display for DateShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}y {:+}m {:+}d", self.years, self.months, self.days)
    }
}

/// Shifts a date by years, months and days.
///
/// 1. Years and months are added to the month component, carrying
///    overflow and underflow into the year.
/// 2. The input day of month is clamped to the length of the resulting
///    month, so "Jan 31 + 1 month" lands on the last day of February.
/// 3. The day offset is then applied as an exact day count, which may cross
///    further month and year boundaries.
///
/// The day offset must come last: the month step clamps, the day step does not.
///
/// # Errors
///
/// Returns `DateError::OutOfRange` if the result is not representable.
///
/// # Examples
///
/// ```
/// use billing_core::types::time::{shift_date, CalendarDate, DateShift};
///
/// let jan_31 = CalendarDate::from_ymd(2023, 1, 31).unwrap();
/// let feb = shift_date(jan_31, DateShift::months(1)).unwrap();
/// assert_eq!(feb, CalendarDate::from_ymd(2023, 2, 28).unwrap());
///
/// let leap_day = CalendarDate::from_ymd(2024, 2, 29).unwrap();
/// let next_year = shift_date(leap_day, DateShift::years(1)).unwrap();
/// assert_eq!(next_year, CalendarDate::from_ymd(2025, 2, 28).unwrap());
/// ```
pub fn shift_date(date: CalendarDate, shift: DateShift) -> Result<CalendarDate, DateError> {
    let out_of_range = || DateError::OutOfRange { date, shift };

    let month_index = i64::from(date.year()) * 12
        + i64::from(date.month() - 1)
        + i64::from(shift.years) * 12
        + i64::from(shift.months);
    let year = i32::try_from(month_index.div_euclid(12)).map_err(|_| out_of_range())?;
    let month = month_index.rem_euclid(12) as u32 + 1;

    let day = date.day().min(days_in_month(year, month));
    let clamped = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)?;

    let shifted = if shift.days >= 0 {
        clamped.checked_add_days(Days::new(shift.days.unsigned_abs()))
    } else {
        clamped.checked_sub_days(Days::new(shift.days.unsigned_abs()))
    };

    shifted.map(CalendarDate).ok_or_else(out_of_range)
}
