//! Turn a report-style question into a `ReportRequest`.
//!
//! Only explicit month names and four-digit years are understood. Anything
//! without a month/year hint, or anything asking about "today", becomes a
//! single-day range for the current date.

use beekay_core::report::month_name;
use beekay_core::{Category, ReportKind, ReportRequest};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::keywords::{contains_any, first_match, KeywordRule};

/// Any of these routes text to the report path, even when it also carries
/// an amount.
pub const REPORT_KEYWORDS: &[&str] = &[
    "report",
    "summary",
    "total",
    "statistics",
    "financial statement",
    "expenses",
    "income",
    "spent",
    "earned",
    "cash flow",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static REPORT_CATEGORIES: &[KeywordRule<Category>] = &[
    KeywordRule { keywords: &["payroll"], value: Category::Payroll },
    KeywordRule { keywords: &["marketing"], value: Category::Marketing },
    KeywordRule { keywords: &["technology"], value: Category::Technology },
    KeywordRule { keywords: &["office space"], value: Category::OfficeSpace },
    KeywordRule { keywords: &["subscription revenue"], value: Category::SubscriptionRevenue },
    KeywordRule { keywords: &["services"], value: Category::Services },
    KeywordRule { keywords: &["equipment"], value: Category::Equipment },
    KeywordRule { keywords: &["loans"], value: Category::Loans },
    KeywordRule { keywords: &["assets"], value: Category::Assets },
];

static YEAR_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").ok());

pub fn is_report_request(lower: &str) -> bool {
    contains_any(lower, REPORT_KEYWORDS)
}

fn is_daily(lower: &str) -> bool {
    lower.contains("today") || lower.contains("daily") || (lower.contains("this") && lower.contains("day"))
}

fn named_month(lower: &str) -> Option<String> {
    MONTHS.iter().find(|m| lower.contains(*m)).map(|m| {
        let mut chars = m.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    })
}

fn named_year(lower: &str) -> Option<String> {
    let re = YEAR_RE.as_ref()?;
    Some(re.captures(lower)?.get(1)?.as_str().to_string())
}

/// Build the request for lowercased `lower`, resolving defaults against `today`.
pub fn build_request(lower: &str, today: NaiveDate) -> ReportRequest {
    let month = named_month(lower);
    let mentions_period = month.is_some() || lower.contains("month") || lower.contains("year");

    let mut request = if is_daily(lower) || !mentions_period {
        ReportRequest {
            kind: ReportKind::Custom,
            start_date: Some(today),
            end_date: Some(today),
            ..ReportRequest::default()
        }
    } else {
        ReportRequest {
            kind: ReportKind::Monthly,
            month: Some(month.unwrap_or_else(|| month_name(today))),
            year: Some(named_year(lower).unwrap_or_else(|| today.year().to_string())),
            ..ReportRequest::default()
        }
    };

    request.category = first_match(REPORT_CATEGORIES, lower).map(|c| c.name().to_string());
    request
}
