//! Ledger entry types recorded by the assistant

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier for this entry
    pub id: String,
    /// Human-readable label
    pub description: String,
    /// Positive = income, negative = expense
    pub amount: f64,
    pub category: Category,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    /// Apply this direction to an unsigned magnitude.
    pub fn signed(&self, magnitude: f64) -> f64 {
        match self {
            EntryType::Income => magnitude.abs(),
            EntryType::Expense => -magnitude.abs(),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Balance-sheet side implied by the text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(AccountType::Asset),
            "liability" => Ok(AccountType::Liability),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FlowType {
    #[serde(rename = "cash-in")]
    CashIn,
    #[serde(rename = "cash-out")]
    CashOut,
}

impl FromStr for FlowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash-in" => Ok(FlowType::CashIn),
            "cash-out" => Ok(FlowType::CashOut),
            other => Err(format!("unknown flow type: {other}")),
        }
    }
}

/// Bookkeeping categories.
///
/// The extractor only ever produces the named variants; `Other` holds
/// categories that arrive from seeded data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Payroll,
    Marketing,
    Technology,
    OfficeSpace,
    SubscriptionRevenue,
    Services,
    Equipment,
    Loans,
    Assets,
    AccountsReceivable,
    Sales,
    ConsultingServices,
    Miscellaneous,
    Other(String),
}

impl Category {
    pub const NAMED: [Category; 13] = [
        Category::Payroll,
        Category::Marketing,
        Category::Technology,
        Category::OfficeSpace,
        Category::SubscriptionRevenue,
        Category::Services,
        Category::Equipment,
        Category::Loans,
        Category::Assets,
        Category::AccountsReceivable,
        Category::Sales,
        Category::ConsultingServices,
        Category::Miscellaneous,
    ];

    /// Display name as shown in reports and exports
    pub fn name(&self) -> &str {
        match self {
            Category::Payroll => "Payroll",
            Category::Marketing => "Marketing",
            Category::Technology => "Technology",
            Category::OfficeSpace => "Office Space",
            Category::SubscriptionRevenue => "Subscription Revenue",
            Category::Services => "Services",
            Category::Equipment => "Equipment",
            Category::Loans => "Loans",
            Category::Assets => "Assets",
            Category::AccountsReceivable => "Accounts Receivable",
            Category::Sales => "Sales",
            Category::ConsultingServices => "Consulting Services",
            Category::Miscellaneous => "Miscellaneous",
            Category::Other(name) => name,
        }
    }

    /// Case-insensitive name comparison, used by report filters.
    pub fn matches(&self, name: &str) -> bool {
        self.name().to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        Category::NAMED
            .iter()
            .find(|c| c.matches(trimmed))
            .cloned()
            .unwrap_or_else(|| Category::Other(trimmed.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from(s.as_str()))
    }
}

impl Entry {
    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Entry {
        Entry {
            id: "1".to_string(),
            description: "AWS Hosting, Feb".to_string(),
            amount: -1452.0,
            category: Category::Technology,
            date: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
            entry_type: EntryType::Expense,
            account_type: None,
            flow_type: Some(FlowType::CashOut),
            created_at: Utc.with_ymd_and_hms(2026, 2, 18, 15, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "Technology");
        assert_eq!(json["flowType"], "cash-out");
        assert_eq!(json["date"], "2026-02-18");
        assert!(json.get("accountType").is_none());
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        assert_eq!(Category::from("office space"), Category::OfficeSpace);
        assert_eq!(Category::from("Travel"), Category::Other("Travel".to_string()));
        assert!(Category::SubscriptionRevenue.matches("SUBSCRIPTION revenue"));
    }

    #[test]
    fn test_signed_amounts() {
        assert_eq!(EntryType::Income.signed(50.0), 50.0);
        assert_eq!(EntryType::Expense.signed(50.0), -50.0);
        assert!(sample().is_expense());
        assert_eq!(sample().abs_amount(), 1452.0);
    }
}
