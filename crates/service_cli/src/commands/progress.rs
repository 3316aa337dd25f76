//! Progress command implementation
//!
//! Shows how far each subscription is through its current billing cycle.

use billing_core::types::CalendarDate;
use billing_models::cycle::cycle_progress_percent;
use billing_models::projection::{advance_billing_date, days_until_billing};
use serde::Serialize;
use tracing::info;

use super::{emit, or_dash, render_table};
use crate::config::CliConfig;
use crate::subscriptions::{Subscription, SubscriptionBook};
use crate::Result;

const BAR_WIDTH: usize = 20;

/// Cycle position of one subscription as of a given day
#[derive(Debug, Clone, Serialize)]
pub struct ProgressRow {
    pub name: String,
    pub schedule: String,
    pub next_billing_date: Option<CalendarDate>,
    pub days_until: Option<i64>,
    pub progress_percent: Option<f64>,
    pub following_billing_date: Option<CalendarDate>,
}

/// Run the progress command
pub fn run(config: &CliConfig, today: CalendarDate) -> Result<()> {
    let book = SubscriptionBook::load(&config.subscriptions_file)?;
    let rows = build_rows(&book.subscriptions(), today);
    info!(%today, subscriptions = rows.len(), "cycle progress computed");

    emit(config.output_format, rows.as_slice(), |rows| render(today, rows))
}

/// Progress for every subscription, in input order
pub fn build_rows(subscriptions: &[Subscription], today: CalendarDate) -> Vec<ProgressRow> {
    subscriptions
        .iter()
        .map(|sub| ProgressRow {
            name: sub.name.clone(),
            schedule: sub.descriptor.recurrence().to_string(),
            next_billing_date: sub.descriptor.next_billing_date(),
            days_until: days_until_billing(&sub.descriptor, today),
            progress_percent: cycle_progress_percent(&sub.descriptor, today),
            following_billing_date: advance_billing_date(&sub.descriptor),
        })
        .collect()
}

/// Fixed-width bar such as `[##########----------]`
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn render(today: CalendarDate, rows: &[ProgressRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let progress = row.progress_percent.map_or_else(
                || "-".to_string(),
                |p| format!("{} {:5.1}%", progress_bar(p), p),
            );
            vec![
                row.name.clone(),
                row.schedule.clone(),
                or_dash(row.next_billing_date),
                or_dash(row.days_until),
                progress,
                or_dash(row.following_billing_date),
            ]
        })
        .collect();

    format!(
        "Billing cycles as of {today}\n{}",
        render_table(
            &["Subscription", "Schedule", "Next", "Days", "Progress", "Then"],
            &cells,
        )
    )
}
