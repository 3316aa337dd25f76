//! Subscriptions file loading
//!
//! A subscriptions file is TOML with one `[[subscription]]` table per
//! subscription: a `name` plus the persisted record columns.
//!
//! ```toml
//! [[subscription]]
//! name = "netflix"
//! billing_kind = "recurring"
//! recurrence_kind = "monthly_by_date"
//! monthly_day = 31
//! next_billing_date = "2024-03-31"
//! created_at = "2023-05-31"
//! ```

use billing_models::recurrence::{RecurrenceDescriptor, RecurrenceError, SubscriptionRecord};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::{CliError, Result};

/// A named subscription whose record passed validation
#[derive(Debug, Clone)]
pub struct Subscription {
    pub name: String,
    pub descriptor: RecurrenceDescriptor,
}

#[derive(Debug, Clone, Deserialize)]
struct SubscriptionEntry {
    name: String,
    #[serde(flatten)]
    record: SubscriptionRecord,
}

#[derive(Debug, Deserialize)]
struct SubscriptionFile {
    #[serde(default, rename = "subscription")]
    subscriptions: Vec<SubscriptionEntry>,
}

/// All records read from a subscriptions file, valid or not
#[derive(Debug, Clone)]
pub struct SubscriptionBook {
    entries: Vec<SubscriptionEntry>,
}

impl SubscriptionBook {
    /// Read and parse a subscriptions file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let book = Self::from_toml_str(&content, &path.display().to_string())?;
        if book.is_empty() {
            warn!(path = %path.display(), "subscriptions file has no [[subscription]] entries");
        } else {
            debug!(path = %path.display(), records = book.len(), "loaded subscriptions");
        }
        Ok(book)
    }

    /// Parse subscriptions from TOML text; `origin` names the source in errors
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let file: SubscriptionFile =
            toml::from_str(content).map_err(|e| CliError::Subscriptions {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            entries: file.subscriptions,
        })
    }

    /// Number of records, including invalid ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file held no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every record with its conversion outcome, in file order
    pub fn validated(
        &self,
    ) -> impl Iterator<Item = (&str, std::result::Result<RecurrenceDescriptor, RecurrenceError>)> + '_
    {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), RecurrenceDescriptor::try_from(&entry.record)))
    }

    /// Valid subscriptions in file order; invalid records are logged and skipped
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.validated()
            .filter_map(|(name, outcome)| match outcome {
                Ok(descriptor) => Some(Subscription {
                    name: name.to_string(),
                    descriptor,
                }),
                Err(err) => {
                    warn!(subscription = name, error = %err, "skipping invalid subscription");
                    None
                }
            })
            .collect()
    }
}
