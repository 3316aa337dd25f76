//! Check command implementation
//!
//! Validates every record in the subscriptions file.

use serde::Serialize;
use tracing::{info, warn};

use super::{emit, render_table};
use crate::config::CliConfig;
use crate::subscriptions::SubscriptionBook;
use crate::{CliError, Result};

/// Validation outcome of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRow {
    pub name: String,
    pub valid: bool,
    pub detail: String,
}

/// Run the check command
///
/// Fails with [`CliError::InvalidSubscriptions`] if any record is invalid.
pub fn run(config: &CliConfig) -> Result<()> {
    info!(path = %config.subscriptions_file.display(), "checking subscriptions");
    let book = SubscriptionBook::load(&config.subscriptions_file)?;
    let rows = build_rows(&book);

    emit(config.output_format, rows.as_slice(), render)?;

    let invalid = rows.iter().filter(|row| !row.valid).count();
    if invalid > 0 {
        return Err(CliError::InvalidSubscriptions { count: invalid });
    }
    info!(records = rows.len(), "all subscriptions valid");
    Ok(())
}

/// One row per record, in file order
pub fn build_rows(book: &SubscriptionBook) -> Vec<CheckRow> {
    book.validated()
        .map(|(name, outcome)| match outcome {
            Ok(descriptor) => CheckRow {
                name: name.to_string(),
                valid: true,
                detail: descriptor.recurrence().to_string(),
            },
            Err(err) => {
                warn!(subscription = name, error = %err, "invalid subscription");
                CheckRow {
                    name: name.to_string(),
                    valid: false,
                    detail: err.to_string(),
                }
            }
        })
        .collect()
}

fn render(rows: &[CheckRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let status = if row.valid { "ok" } else { "INVALID" };
            vec![row.name.clone(), status.to_string(), row.detail.clone()]
        })
        .collect();
    render_table(&["Subscription", "Status", "Detail"], &cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"
        [[subscription]]
        name = "domain"
        billing_kind = "recurring"
        recurrence_kind = "yearly_by_date"
        yearly_month = 2
        yearly_day = 9
        next_billing_date = "2025-02-09"
        created_at = "2024-02-09"

        [[subscription]]
        name = "no unit"
        billing_kind = "recurring"
        recurrence_kind = "interval"
        interval_count = 3
        created_at = "2024-02-09"
    "#;

    #[test]
    fn test_build_rows() {
        let book = SubscriptionBook::from_toml_str(RECORDS, "inline").unwrap();
        let rows = build_rows(&book);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].valid);
        assert_eq!(rows[0].detail, "yearly on 02-09");
        assert!(!rows[1].valid);
        assert!(rows[1].detail.contains("interval_unit"));
    }

    #[test]
    fn test_render_marks_invalid() {
        let book = SubscriptionBook::from_toml_str(RECORDS, "inline").unwrap();
        let text = render(&build_rows(&book));
        assert!(text.contains("INVALID"));
        assert!(text.contains("│ ok "));
    }
}
