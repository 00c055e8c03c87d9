//! Plain-text report export.
//!
//! Layout (fixed width, `\n` separated, no trailing newline):
//!   === <title> ===
//!
//!   Period: ...
//!   Generated on: ...
//!
//!   SUMMARY
//!   ------------------------------
//!   Total Income: $0.00
//!   ...
//!   ENTRIES
//!   Date(12) Description(30) Category(20) Amount(15, right aligned)

use chrono::Datelike;
use chrono_tz::Tz;
use regex::Regex;

use crate::entry::{Entry, EntryType};
use crate::report::{Report, Summary};

pub const ATTRIBUTION: &str = "Made with ❤️ by Beekae";

const RULE_WIDTH: usize = 80;
const SUMMARY_RULE_WIDTH: usize = 30;
const DATE_COL: usize = 12;
const DESC_COL: usize = 30;
const DESC_MAX: usize = 28;
const CAT_COL: usize = 20;
const CAT_MAX: usize = 18;
const AMOUNT_COL: usize = 15;

/// Render `report` as text. `tz` picks the zone for the generation stamp.
pub fn render_report(report: &Report, tz: Tz) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("=== {} ===", report.title));
    lines.push(String::new());

    let period = &report.period;
    if let (Some(month), Some(year)) = (&period.month, &period.year) {
        lines.push(format!("Period: {month} {year}"));
    } else if let (Some(start), Some(end)) = (period.start_date, period.end_date) {
        lines.push(format!("Period: {start} to {end}"));
    }

    let generated = report.generated_at.with_timezone(&tz);
    lines.push(format!(
        "Generated on: {}",
        generated.format("%B %-d, %Y at %I:%M %p")
    ));
    lines.push(String::new());

    lines.push("SUMMARY".to_string());
    lines.push("-".repeat(SUMMARY_RULE_WIDTH));
    lines.push(format!("Total Income: ${:.2}", report.summary.total_income));
    lines.push(format!("Total Expenses: ${:.2}", report.summary.total_expenses));
    lines.push(format!("Net Amount: ${:.2}", report.summary.net_amount));
    lines.push(String::new());

    lines.push("ENTRIES".to_string());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "{:<DATE_COL$}{:<DESC_COL$}{:<CAT_COL$}{:>AMOUNT_COL$}",
        "Date", "Description", "Category", "Amount"
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for entry in &report.entries {
        lines.push(entry_row(entry));
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(String::new());
    lines.push(ATTRIBUTION.to_string());

    lines.join("\n")
}

fn entry_row(entry: &Entry) -> String {
    let date = format!(
        "{}/{}/{}",
        entry.date.month(),
        entry.date.day(),
        entry.date.year()
    );
    let sign = match entry.entry_type {
        EntryType::Income => '+',
        EntryType::Expense => '-',
    };
    let amount = format!("{sign}${:.2}", entry.abs_amount());
    let description = truncate(&entry.description, DESC_MAX);
    let category = truncate(entry.category.name(), CAT_MAX);

    format!("{date:<DATE_COL$}{description:<DESC_COL$}{category:<CAT_COL$}{amount:>AMOUNT_COL$}")
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Recover the three summary totals from an exported report.
pub fn read_summary(text: &str) -> Option<Summary> {
    let total = |label: &str| -> Option<f64> {
        let re = Regex::new(&format!(r"(?m)^{label}: \$(-?\d+\.\d{{2}})$")).ok()?;
        re.captures(text)?.get(1)?.as_str().parse().ok()
    };

    Some(Summary {
        total_income: total("Total Income")?,
        total_expenses: total("Total Expenses")?,
        net_amount: total("Net Amount")?,
    })
}
