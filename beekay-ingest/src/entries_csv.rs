//! Parse ledger CSV files into entries.
//!
//! Expected header (extra columns are ignored, the last two are optional):
//!   date,description,amount,category,account_type,flow_type
//!
//! `date` is `YYYY-MM-DD` or `MM/DD/YYYY`. The sign of `amount` decides
//! income vs expense. First data row = newest entry.

use beekay_core::{AccountType, Category, Context, Entry, EntryType, FlowType};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("opening {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct Row {
    date: String,
    description: String,
    amount: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    account_type: Option<String>,
    #[serde(default)]
    flow_type: Option<String>,
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '$').collect();
    cleaned.parse::<f64>().ok().filter(|a| a.is_finite() && *a != 0.0)
}

/// Parse CSV from any reader. Rows with unusable dates or amounts are skipped.
pub fn parse_entries(reader: impl Read, ctx: Context<'_>) -> Result<Vec<Entry>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();

    for (line, result) in rdr.deserialize::<Row>().enumerate() {
        let row = result?;

        let Some(date) = parse_date(&row.date) else {
            tracing::warn!(line = line + 2, date = %row.date, "skipping row with bad date");
            continue;
        };
        let Some(amount) = parse_amount(&row.amount) else {
            tracing::warn!(line = line + 2, amount = %row.amount, "skipping row with bad amount");
            continue;
        };

        let entry_type = if amount > 0.0 { EntryType::Income } else { EntryType::Expense };
        let category = row
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(Category::from)
            .unwrap_or(Category::Miscellaneous);

        entries.push(Entry {
            id: ctx.next_id(),
            description: row.description,
            amount,
            category,
            date,
            entry_type,
            account_type: row.account_type.as_deref().and_then(|s| s.parse::<AccountType>().ok()),
            flow_type: row.flow_type.as_deref().and_then(|s| s.parse::<FlowType>().ok()),
            created_at: ctx.clock.now(),
        });
    }

    tracing::debug!(count = entries.len(), "parsed seed entries");
    Ok(entries)
}

/// Parse a CSV file on disk.
pub fn load_entries_csv(path: impl AsRef<Path>, ctx: Context<'_>) -> Result<Vec<Entry>, IngestError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| IngestError::Open {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    parse_entries(file, ctx)
}
