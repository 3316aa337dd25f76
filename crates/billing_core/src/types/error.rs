//! Error types for structured error handling.

use thiserror::Error;

use super::time::{CalendarDate, DateShift};

/// Date-related errors.
///
/// Provides structured error handling for date construction, parsing and
/// shifting with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
/// - `OutOfRange`: A shift left the representable calendar range
///
/// # Examples
/// ```
/// use billing_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Shifting a date left the representable calendar range.
    #[error("Date out of range: {date} shifted by {shift}")]
    OutOfRange {
        /// The date being shifted.
        date: CalendarDate,
        /// The requested shift.
        shift: DateShift,
    },
}
