//! Calendar date types for billing calculations.
//!
//! This module provides:
//! - `time`: Calendar dates, date shifts, and month-length arithmetic
//! - `error`: Structured error types for date construction, parsing and shifting
//!
//! # Re-exports
//!
//! For convenience, commonly used items are re-exported at this module level:
//! - [`CalendarDate`], [`DateShift`], [`days_in_month`], [`is_leap_year`], [`shift_date`] from `time`
//! - [`DateError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::DateError;
pub use time::{days_in_month, is_leap_year, shift_date, CalendarDate, DateShift};
