//! Upcoming command implementation
//!
//! Projects the next billing dates of every subscription into one agenda.

use billing_core::types::CalendarDate;
use billing_models::projection::upcoming_billing_dates;
use serde::Serialize;
use tracing::info;

use super::{emit, render_table};
use crate::config::CliConfig;
use crate::subscriptions::{Subscription, SubscriptionBook};
use crate::Result;

/// One projected charge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaEntry {
    pub date: CalendarDate,
    pub name: String,
    pub days_from_start: i64,
}

/// Run the upcoming command
pub fn run(config: &CliConfig, from: CalendarDate, count: usize) -> Result<()> {
    let book = SubscriptionBook::load(&config.subscriptions_file)?;
    let agenda = build_agenda(&book.subscriptions(), from, count);
    info!(%from, count, entries = agenda.len(), "upcoming billing dates projected");

    emit(config.output_format, agenda.as_slice(), |agenda| {
        render(from, agenda)
    })
}

/// Up to `count` dates per subscription on or after `from`, merged by date
///
/// Entries on the same date keep input order.
pub fn build_agenda(
    subscriptions: &[Subscription],
    from: CalendarDate,
    count: usize,
) -> Vec<AgendaEntry> {
    let mut agenda: Vec<AgendaEntry> = subscriptions
        .iter()
        .flat_map(|sub| {
            upcoming_billing_dates(&sub.descriptor, from, count)
                .into_iter()
                .map(move |date| AgendaEntry {
                    date,
                    name: sub.name.clone(),
                    days_from_start: date - from,
                })
        })
        .collect();
    agenda.sort_by_key(|entry| entry.date);
    agenda
}

fn render(from: CalendarDate, agenda: &[AgendaEntry]) -> String {
    let cells: Vec<Vec<String>> = agenda
        .iter()
        .map(|entry| {
            vec![
                entry.date.to_string(),
                entry.name.clone(),
                format!("+{}d", entry.days_from_start),
            ]
        })
        .collect();

    format!(
        "Upcoming billing dates from {from}\n{}",
        render_table(&["Date", "Subscription", "In"], &cells)
    )
}
