//! Human-readable labels for extracted entries.

use beekay_core::{Category, EntryType};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::keywords::{contains_any, first_match, KeywordRule};

static COUNTERPARTY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)from\s+([a-z0-9\s]+)\s+(for|corp|inc|llc)").ok());

/// Object of a spending verb: "bought printer ink for 45" -> "printer ink"
static EXPENSE_OBJECT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(paid|bought|purchased|for)\s+([a-zA-Z0-9\s]+?)\s+(for|\$|this|last)").ok()
});

static EXPENSE_LABELS: &[KeywordRule<&str>] = &[
    KeywordRule { keywords: &["aws"], value: "AWS Hosting" },
    KeywordRule { keywords: &["salary", "payroll"], value: "Staff Payroll" },
    KeywordRule { keywords: &["marketing", "ads"], value: "Marketing Expenses" },
    KeywordRule { keywords: &["loan", "borrowed"], value: "Bank Loan" },
    KeywordRule { keywords: &["furniture"], value: "Office Furniture" },
    KeywordRule { keywords: &["equipment", "asset"], value: "Equipment Purchase" },
];

/// Counterparty named after "from", e.g. "from acme corp" -> "Acme".
pub fn counterparty(lower: &str) -> Option<String> {
    let re = COUNTERPARTY_RE.as_ref()?;
    let name = re.captures(lower)?.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some(capitalize_words(name, 0))
}

/// Build the description (without the month suffix).
pub fn describe(lower: &str, entry_type: EntryType, category: &Category) -> String {
    match entry_type {
        EntryType::Income => describe_income(lower, category),
        EntryType::Expense => describe_expense(lower, category),
    }
}

fn describe_income(lower: &str, category: &Category) -> String {
    let client = counterparty(lower);

    if contains_any(lower, &["invoice"]) {
        return match client {
            Some(name) => format!("Invoice to {name}"),
            None => "Client Invoice".to_string(),
        };
    }

    match client {
        Some(name) => format!("{name} Revenue"),
        None if *category == Category::SubscriptionRevenue => "Subscription Revenue".to_string(),
        None => "Client Revenue".to_string(),
    }
}

fn describe_expense(lower: &str, category: &Category) -> String {
    if let Some(label) = first_match(EXPENSE_LABELS, lower) {
        return label.to_string();
    }

    EXPENSE_OBJECT_RE
        .as_ref()
        .and_then(|re| re.captures(lower))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim())
        .filter(|object| !object.is_empty())
        .map(|object| capitalize_words(object, 2))
        .unwrap_or_else(|| category.name().to_string())
}

/// Append the ", Mon" suffix every synthesized description carries.
pub fn with_month_suffix(description: &str, today: NaiveDate) -> String {
    format!("{description}, {}", beekay_core::report::month_abbrev(today))
}

/// Uppercase the first letter of each space-separated word longer than
/// `min_len` characters.
fn capitalize_words(s: &str, min_len: usize) -> String {
    s.split(' ')
        .map(|word| {
            if word.chars().count() <= min_len {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
