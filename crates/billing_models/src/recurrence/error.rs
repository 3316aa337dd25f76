//! Recurrence error types.

use billing_core::types::DateError;
use thiserror::Error;

/// Errors raised while building or walking a recurrence.
///
/// The calculators themselves never surface these to callers; they degrade
/// to an empty occurrence set or `None`. The errors matter at the record
/// boundary, where persisted columns become a typed descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// A field required by the billing or recurrence kind is absent.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A field holds a value outside its allowed range.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// The name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// A kind or unit string could not be recognised.
    #[error("Unknown {what}: {value}")]
    UnknownKind {
        /// What was being parsed (e.g. "interval unit").
        what: &'static str,
        /// The unrecognised text.
        value: String,
    },

    /// An interval walk exceeded its step bound.
    #[error("Interval walk exceeded {limit} steps")]
    WalkLimitExceeded {
        /// The bound that was hit.
        limit: usize,
    },

    /// Date arithmetic left the representable range.
    #[error(transparent)]
    Date(#[from] DateError),
}
