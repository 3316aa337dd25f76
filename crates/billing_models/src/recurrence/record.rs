//! Persisted subscription records.
//!
//! A stored subscription keeps every recurrence column on one flat record
//! and relies on convention to say which ones are meaningful. This module
//! validates such a record into a [`RecurrenceDescriptor`].

use billing_core::types::CalendarDate;
use serde::{Deserialize, Serialize};

use super::descriptor::{BillingKind, Recurrence, RecurrenceDescriptor, RecurrenceKind};
use super::error::RecurrenceError;
use super::unit::IntervalUnit;

/// Recurrence columns of a stored subscription.
///
/// # Examples
///
/// ```
/// use billing_models::recurrence::{Recurrence, RecurrenceDescriptor, SubscriptionRecord};
///
/// let record: SubscriptionRecord = serde_json::from_str(r#"{
///     "billing_kind": "recurring",
///     "recurrence_kind": "monthly_by_date",
///     "monthly_day": 31,
///     "next_billing_date": "2024-03-31",
///     "created_at": "2023-05-31"
/// }"#).unwrap();
///
/// let descriptor = RecurrenceDescriptor::try_from(&record).unwrap();
/// assert_eq!(descriptor.recurrence(), Recurrence::MonthlyByDate { day: 31 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// One-time or recurring.
    pub billing_kind: BillingKind,
    /// Required when recurring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_kind: Option<RecurrenceKind>,
    /// Required for interval recurrences; at least 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_count: Option<i32>,
    /// Required for interval recurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_unit: Option<IntervalUnit>,
    /// Required for monthly-by-date recurrences; 1-31.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_day: Option<u32>,
    /// Required for yearly-by-date recurrences; 1-12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_month: Option<u32>,
    /// Required for yearly-by-date recurrences; 1-31.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_day: Option<u32>,
    /// Next scheduled occurrence; absent when disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_billing_date: Option<CalendarDate>,
    /// Creation date.
    pub created_at: CalendarDate,
}

impl SubscriptionRecord {
    /// Creates a record with every optional column empty.
    pub fn new(billing_kind: BillingKind, created_at: CalendarDate) -> Self {
        Self {
            billing_kind,
            recurrence_kind: None,
            interval_count: None,
            interval_unit: None,
            monthly_day: None,
            yearly_month: None,
            yearly_day: None,
            next_billing_date: None,
            created_at,
        }
    }
}

impl From<&RecurrenceDescriptor> for SubscriptionRecord {
    fn from(descriptor: &RecurrenceDescriptor) -> Self {
        let mut record = SubscriptionRecord::new(descriptor.billing_kind(), descriptor.created_at());
        record.recurrence_kind = descriptor.recurrence_kind();
        record.next_billing_date = descriptor.next_billing_date();

        match descriptor.recurrence() {
            Recurrence::OneTime => {}
            Recurrence::Interval { count, unit } => {
                record.interval_count = Some(count);
                record.interval_unit = Some(unit);
            }
            Recurrence::MonthlyByDate { day } => record.monthly_day = Some(day),
            Recurrence::YearlyByDate { month, day } => {
                record.yearly_month = Some(month);
                record.yearly_day = Some(day);
            }
        }
        record
    }
}

impl TryFrom<&SubscriptionRecord> for RecurrenceDescriptor {
    type Error = RecurrenceError;

    /// Validates the columns required by the record's kinds.
    ///
    /// Columns that do not belong to the record's kind are ignored.
    ///
    /// # Errors
    ///
    /// - `MissingField` if a column required by the kind is absent
    /// - `InvalidValue` if a count, month or day is out of range
    fn try_from(record: &SubscriptionRecord) -> Result<Self, Self::Error> {
        let recurrence = match record.billing_kind {
            BillingKind::OneTime => Recurrence::OneTime,
            BillingKind::Recurring => {
                let kind = record.recurrence_kind.ok_or(RecurrenceError::MissingField {
                    field: "recurrence_kind",
                })?;
                match kind {
                    RecurrenceKind::Interval => {
                        let count = required(record.interval_count, "interval_count")?;
                        let unit = required(record.interval_unit, "interval_unit")?;
                        check_range("interval_count", i64::from(count), 1, i64::from(i32::MAX))?;
                        Recurrence::Interval { count, unit }
                    }
                    RecurrenceKind::MonthlyByDate => {
                        let day = required(record.monthly_day, "monthly_day")?;
                        check_range("monthly_day", i64::from(day), 1, 31)?;
                        Recurrence::MonthlyByDate { day }
                    }
                    RecurrenceKind::YearlyByDate => {
                        let month = required(record.yearly_month, "yearly_month")?;
                        let day = required(record.yearly_day, "yearly_day")?;
                        check_range("yearly_month", i64::from(month), 1, 12)?;
                        check_range("yearly_day", i64::from(day), 1, 31)?;
                        Recurrence::YearlyByDate { month, day }
                    }
                }
            }
        };

        Ok(RecurrenceDescriptor::new(
            recurrence,
            record.next_billing_date,
            record.created_at,
        ))
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RecurrenceError> {
    value.ok_or(RecurrenceError::MissingField { field })
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), RecurrenceError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RecurrenceError::InvalidValue { field, value })
    }
}
