//! # billing_core: Calendar Foundation for Billing Schedules
//!
//! ## Layer 1 (Foundation) Role
//!
//! billing_core is the bottom layer of the billcycle workspace, providing:
//! - Calendar-pure dates with no time-of-day or timezone (`types::time::CalendarDate`)
//! - Month-length lookup and the Gregorian leap-year rule (`types::time`)
//! - Calendar-relative shifting with end-of-month clamping (`types::time::shift_date`)
//! - Error types: `DateError` (`types::error`)
//!
//! ## Minimal Dependency Principle
//!
//! Layer 1 has no dependencies on other billing_* crates:
//! - chrono: Day-count arithmetic on naive dates
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use billing_core::types::{days_in_month, shift_date, CalendarDate, DateShift};
//!
//! let jan_31 = CalendarDate::from_ymd(2024, 1, 31).unwrap();
//!
//! // Month shifts clamp to the end of the shorter month
//! let feb = shift_date(jan_31, DateShift::months(1)).unwrap();
//! assert_eq!(feb, CalendarDate::from_ymd(2024, 2, 29).unwrap());
//!
//! assert_eq!(days_in_month(2023, 2), 28);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable ISO-8601 serialisation for `CalendarDate`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
