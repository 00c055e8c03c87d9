//! Report aggregation: filter recorded entries by period and category, then
//! fold them into income / expense / net totals.
//!
//! Period resolution, first branch that applies wins:
//! 1) monthly request carrying both month and year
//! 2) custom request carrying both start and end dates
//! 3) anything else falls back to the current calendar day
//!
//! The category filter is applied after the period filter.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::entry::{Entry, EntryType};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Monthly,
    Custom,
}

/// What the caller asked to be reported on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Full month name, any case ("February")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ReportRequest {
    pub fn monthly(month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            kind: ReportKind::Monthly,
            month: Some(month.into()),
            year: Some(year.into()),
            ..Self::default()
        }
    }

    /// Inclusive date range.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: ReportKind::Custom,
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn resolve(&self, today: NaiveDate) -> Resolved {
        match (self.kind, &self.month, &self.year, self.start_date, self.end_date) {
            (ReportKind::Monthly, Some(month), Some(year), _, _) => Resolved::Month {
                month: month.clone(),
                year: year.clone(),
            },
            (ReportKind::Custom, _, _, Some(start), Some(end)) => Resolved::Range { start, end },
            _ => Resolved::Day(today),
        }
    }
}

enum Resolved {
    Month { month: String, year: String },
    Range { start: NaiveDate, end: NaiveDate },
    Day(NaiveDate),
}

impl Resolved {
    fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Resolved::Month { month, year } => {
                month_name(date).to_lowercase() == month.trim().to_lowercase()
                    && date.year().to_string() == year.trim()
            }
            Resolved::Range { start, end } => *start <= date && date <= *end,
            Resolved::Day(day) => date == *day,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    /// Always a non-negative magnitude
    pub total_expenses: f64,
    pub net_amount: f64,
}

impl Summary {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        entries.into_iter().fold(Summary::default(), |mut acc, entry| {
            match entry.entry_type {
                EntryType::Income => acc.total_income += entry.amount,
                EntryType::Expense => acc.total_expenses += entry.amount.abs(),
            }
            acc.net_amount = acc.total_income - acc.total_expenses;
            acc
        })
    }
}

/// Echo of the resolved reporting window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub entries: Vec<Entry>,
    pub summary: Summary,
    pub period: Period,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Download file name: whitespace runs become underscores.
    pub fn file_name(&self) -> String {
        let stem: Vec<&str> = self.title.split_whitespace().collect();
        format!("{}.txt", stem.join("_"))
    }
}

/// Filter `entries` per `request` and summarize them into a new report.
///
/// Entry order is preserved. An empty selection is not an error; it
/// produces a zeroed summary.
pub fn aggregate(entries: &[Entry], request: &ReportRequest, ctx: Context<'_>) -> Report {
    let today = ctx.clock.today();
    let window = request.resolve(today);

    let selected: Vec<Entry> = entries
        .iter()
        .filter(|e| window.contains(e.date))
        .filter(|e| match &request.category {
            Some(cat) => e.category.matches(cat),
            None => true,
        })
        .cloned()
        .collect();

    let summary = Summary::from_entries(&selected);

    let (title, period) = match &window {
        Resolved::Month { month, year } => (
            format!("Monthly Report - {month} {year}"),
            Period {
                month: Some(month.clone()),
                year: Some(year.clone()),
                ..Period::default()
            },
        ),
        Resolved::Range { start, end } => (
            format!("Custom Report - {start} to {end}"),
            Period {
                start_date: Some(*start),
                end_date: Some(*end),
                ..Period::default()
            },
        ),
        Resolved::Day(day) => (
            format!(
                "Daily Report - {} {}, {}",
                month_name(*day),
                day.day(),
                day.year()
            ),
            Period {
                month: Some(month_name(*day)),
                year: Some(day.year().to_string()),
                start_date: Some(*day),
                end_date: Some(*day),
            },
        ),
    };

    let title = match &request.category {
        Some(cat) => format!("{cat} {title}"),
        None => title,
    };

    tracing::debug!(
        title = %title,
        matched = selected.len(),
        of = entries.len(),
        "aggregated report"
    );

    Report {
        id: ctx.next_id(),
        title,
        entries: selected,
        summary,
        period,
        generated_at: ctx.clock.now(),
    }
}

/// Full English month name ("February")
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Three-letter month abbreviation ("Feb")
pub fn month_abbrev(date: NaiveDate) -> String {
    date.format("%b").to_string()
}
