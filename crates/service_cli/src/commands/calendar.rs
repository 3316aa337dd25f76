//! Calendar command implementation
//!
//! Lists the days of a calendar month on which each subscription bills.

use billing_core::types::days_in_month;
use billing_models::occurrences::occurrences_in_month_with_limit;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use super::{emit, render_table};
use crate::config::CliConfig;
use crate::subscriptions::{Subscription, SubscriptionBook};
use crate::{CliError, Result};

/// Billing days of one subscription in the rendered month
#[derive(Debug, Clone, Serialize)]
pub struct CalendarRow {
    pub name: String,
    pub schedule: String,
    pub days: Vec<u32>,
}

/// Run the calendar command
pub fn run(config: &CliConfig, year: i32, month: u32) -> Result<()> {
    if days_in_month(year, month) == 0 {
        return Err(CliError::InvalidArgument(format!(
            "Month must be 1-12, got {month}"
        )));
    }

    let book = SubscriptionBook::load(&config.subscriptions_file)?;
    let rows = build_rows(&book.subscriptions(), year, month, config.max_walk_steps);
    info!(year, month, subscriptions = rows.len(), "calendar computed");

    emit(config.output_format, rows.as_slice(), |rows| {
        render(year, month, rows)
    })
}

/// Occurrences for every subscription, in input order
pub fn build_rows(
    subscriptions: &[Subscription],
    year: i32,
    month: u32,
    max_steps: usize,
) -> Vec<CalendarRow> {
    subscriptions
        .iter()
        .map(|sub| CalendarRow {
            name: sub.name.clone(),
            schedule: sub.descriptor.recurrence().to_string(),
            days: occurrences_in_month_with_limit(&sub.descriptor, year, month, max_steps)
                .into_iter()
                .collect(),
        })
        .collect()
}

/// Subscription names billed on each day of the month
pub fn by_day(rows: &[CalendarRow]) -> BTreeMap<u32, Vec<&str>> {
    let mut days: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for row in rows {
        for &day in &row.days {
            days.entry(day).or_default().push(&row.name);
        }
    }
    days
}

fn render(year: i32, month: u32, rows: &[CalendarRow]) -> String {
    let per_subscription: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let days: Vec<String> = row.days.iter().map(u32::to_string).collect();
            vec![row.name.clone(), row.schedule.clone(), days.join(", ")]
        })
        .collect();

    let per_day: Vec<Vec<String>> = by_day(rows)
        .into_iter()
        .map(|(day, names)| vec![format!("{year:04}-{month:02}-{day:02}"), names.join(", ")])
        .collect();

    format!(
        "Billing calendar {year:04}-{month:02}\n{}\n{}",
        render_table(&["Subscription", "Schedule", "Days"], &per_subscription),
        render_table(&["Date", "Subscriptions"], &per_day),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::types::CalendarDate;
    use billing_models::recurrence::{
        IntervalUnit, Recurrence, RecurrenceDescriptor, DEFAULT_MAX_WALK_STEPS,
    };

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    fn subscription(name: &str, recurrence: Recurrence, next: CalendarDate) -> Subscription {
        Subscription {
            name: name.to_string(),
            descriptor: RecurrenceDescriptor::new(recurrence, Some(next), date(2023, 1, 1)),
        }
    }

    fn sample() -> Vec<Subscription> {
        vec![
            subscription(
                "netflix",
                Recurrence::MonthlyByDate { day: 31 },
                date(2024, 3, 31),
            ),
            subscription(
                "gym",
                Recurrence::Interval {
                    count: 2,
                    unit: IntervalUnit::Week,
                },
                date(2024, 3, 4),
            ),
            subscription(
                "insurance",
                Recurrence::YearlyByDate { month: 6, day: 1 },
                date(2024, 6, 1),
            ),
        ]
    }

    #[test]
    fn test_build_rows_february_leap_year() {
        let rows = build_rows(&sample(), 2024, 2, DEFAULT_MAX_WALK_STEPS);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].days, vec![29]);
        // Rewinding from Mar 4 stops at Feb 19
        assert_eq!(rows[1].days, vec![19]);
        assert!(rows[2].days.is_empty());
        assert_eq!(rows[0].schedule, "monthly on day 31");
    }

    #[test]
    fn test_by_day_groups_names() {
        let rows = build_rows(&sample(), 2024, 6, DEFAULT_MAX_WALK_STEPS);
        let days = by_day(&rows);
        assert_eq!(days.get(&1), Some(&vec!["insurance"]));
        assert_eq!(days.get(&30), Some(&vec!["netflix"]));
        assert_eq!(days.values().flatten().filter(|n| **n == "gym").count(), 2);
    }

    #[test]
    fn test_render_lists_dates() {
        let rows = build_rows(&sample(), 2024, 2, DEFAULT_MAX_WALK_STEPS);
        let text = render(2024, 2, &rows);
        assert!(text.starts_with("Billing calendar 2024-02"));
        assert!(text.contains("2024-02-29"));
        assert!(text.contains("2024-02-19"));
    }

    #[test]
    fn test_json_shape() {
        let rows = build_rows(&sample()[..1], 2023, 2, DEFAULT_MAX_WALK_STEPS);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["name"], "netflix");
        assert_eq!(json[0]["days"], serde_json::json!([28]));
    }

    #[test]
    fn test_run_rejects_invalid_month() {
        let err = run(&CliConfig::default(), 2024, 13).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
