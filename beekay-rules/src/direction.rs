//! Direction (income vs expense) and balance-sheet tagging.

use beekay_core::{AccountType, EntryType, FlowType};

use crate::keywords::{first_match, last_match, KeywordRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub entry_type: EntryType,
    pub flow_type: FlowType,
    pub account_type: Option<AccountType>,
}

const EXPENSE: Direction = Direction {
    entry_type: EntryType::Expense,
    flow_type: FlowType::CashOut,
    account_type: None,
};

/// Invoices are income that has not been collected yet: a receivable asset.
static DIRECTION_RULES: &[KeywordRule<Direction>] = &[
    KeywordRule {
        keywords: &["invoice", "bill to", "charge"],
        value: Direction {
            entry_type: EntryType::Income,
            flow_type: FlowType::CashIn,
            account_type: Some(AccountType::Asset),
        },
    },
    KeywordRule {
        keywords: &[
            "received",
            "earned",
            "revenue",
            "client paid",
            "income",
            "sales",
            "got",
            "collected",
        ],
        value: Direction {
            entry_type: EntryType::Income,
            flow_type: FlowType::CashIn,
            account_type: None,
        },
    },
];

/// Evaluated in order with the last hit winning, so debt language beats
/// purchase language when both appear.
static ACCOUNT_RULES: &[KeywordRule<AccountType>] = &[
    KeywordRule {
        keywords: &[
            "purchased",
            "bought",
            "acquired",
            "investment",
            "furniture",
            "equipment",
        ],
        value: AccountType::Asset,
    },
    KeywordRule {
        keywords: &["loan", "debt", "owed"],
        value: AccountType::Liability,
    },
];

/// Classify direction, then refine the account type. `lower` is lowercased.
pub fn classify_direction(lower: &str) -> Direction {
    let mut direction = first_match(DIRECTION_RULES, lower).copied().unwrap_or(EXPENSE);
    if let Some(account) = last_match(ACCOUNT_RULES, lower) {
        direction.account_type = Some(*account);
    }
    direction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_expense() {
        assert_eq!(classify_direction("paid aws bill 1452"), EXPENSE);
    }

    #[test]
    fn test_invoice_is_receivable() {
        let d = classify_direction("invoice acme for 500");
        assert_eq!(d.entry_type, EntryType::Income);
        assert_eq!(d.flow_type, FlowType::CashIn);
        assert_eq!(d.account_type, Some(AccountType::Asset));
    }

    #[test]
    fn test_receipt_language_is_income_without_account() {
        let d = classify_direction("received 25000 from enterprise clients");
        assert_eq!(d.entry_type, EntryType::Income);
        assert_eq!(d.account_type, None);
    }

    #[test]
    fn test_purchase_is_asset() {
        let d = classify_direction("bought new equipment for 900");
        assert_eq!(d.entry_type, EntryType::Expense);
        assert_eq!(d.account_type, Some(AccountType::Asset));
    }

    #[test]
    fn test_debt_beats_purchase_and_invoice() {
        let d = classify_direction("bought furniture with a loan 4000");
        assert_eq!(d.account_type, Some(AccountType::Liability));

        let d = classify_direction("invoice for the debt 300");
        assert_eq!(d.entry_type, EntryType::Income);
        assert_eq!(d.account_type, Some(AccountType::Liability));
    }

    #[test]
    fn test_loan_received_is_liability_income() {
        let d = classify_direction("got a loan from wells fargo for 50k");
        assert_eq!(d.entry_type, EntryType::Income);
        assert_eq!(d.flow_type, FlowType::CashIn);
        assert_eq!(d.account_type, Some(AccountType::Liability));
    }
}
