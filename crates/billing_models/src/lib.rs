//! # Billing Models (L2: Business Logic)
//!
//! Recurrence schedules for subscription billing.
//!
//! This crate provides:
//! - Recurrence descriptors (one-time, interval, monthly-by-date, yearly-by-date)
//! - Calendar occurrence enumeration for an arbitrary month
//! - Billing-cycle progress as of a given day
//! - Forward projections (next cycle, upcoming billing dates)
//! - Conversion from loosely typed persisted subscription records
//!
//! ## Design Principles
//!
//! - **Enum-based recurrences** so that incomplete schedules are unrepresentable
//! - **Pure functions** of their arguments: no caching, no shared state
//! - **Degrade, don't fail**: malformed schedules yield an empty set or `None`
//!
//! ## Usage Examples
//!
//! ```rust
//! use billing_core::types::CalendarDate;
//! use billing_models::cycle::cycle_progress_percent;
//! use billing_models::occurrences::occurrences_in_month;
//! use billing_models::recurrence::{Recurrence, RecurrenceDescriptor};
//!
//! let created = CalendarDate::from_ymd(2023, 11, 20).unwrap();
//! let next = CalendarDate::from_ymd(2024, 3, 31).unwrap();
//! let netflix = RecurrenceDescriptor::new(
//!     Recurrence::MonthlyByDate { day: 31 },
//!     Some(next),
//!     created,
//! );
//!
//! let feb: Vec<u32> = occurrences_in_month(&netflix, 2024, 2).into_iter().collect();
//! assert_eq!(feb, vec![29]);
//!
//! let today = CalendarDate::from_ymd(2024, 3, 15).unwrap();
//! let progress = cycle_progress_percent(&netflix, today).unwrap();
//! assert!(progress > 0.0 && progress < 100.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cycle;
pub mod occurrences;
pub mod projection;
pub mod recurrence;
