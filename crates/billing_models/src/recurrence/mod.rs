//! Recurrence descriptions for subscription billing.
//!
//! This module provides:
//! - [`Recurrence`]: The billing schedule (one-time, interval, monthly, yearly)
//! - [`RecurrenceDescriptor`]: A schedule plus its next billing and creation dates
//! - [`IntervalUnit`]: Day, week, month or year steps
//! - [`SubscriptionRecord`]: Flat persisted columns, validated into a descriptor
//! - [`RecurrenceError`]: Validation and walk errors
//!
//! # Examples
//!
//! ```
//! use billing_core::types::CalendarDate;
//! use billing_models::recurrence::{IntervalUnit, Recurrence, RecurrenceDescriptor};
//!
//! let descriptor = RecurrenceDescriptor::new(
//!     Recurrence::Interval { count: 2, unit: IntervalUnit::Week },
//!     Some(CalendarDate::from_ymd(2024, 3, 4).unwrap()),
//!     CalendarDate::from_ymd(2024, 1, 1).unwrap(),
//! );
//!
//! assert!(descriptor.recurrence().is_recurring());
//! ```

mod descriptor;
mod error;
pub(crate) mod lattice;
#[cfg(feature = "serde")]
mod record;
mod unit;

pub use descriptor::{BillingKind, Recurrence, RecurrenceDescriptor, RecurrenceKind};
pub use error::RecurrenceError;
pub use lattice::DEFAULT_MAX_WALK_STEPS;
#[cfg(feature = "serde")]
pub use record::SubscriptionRecord;
pub use unit::IntervalUnit;
