//! Deterministic category rules for extracted entries.
//! Priority: first keyword group in table order, then the invoice override.

use beekay_core::Category;

use crate::keywords::{first_match, KeywordRule};

static CATEGORY_RULES: &[KeywordRule<Category>] = &[
    KeywordRule { keywords: &["salary", "payroll", "wage"], value: Category::Payroll },
    KeywordRule { keywords: &["advertisement", "marketing"], value: Category::Marketing },
    KeywordRule { keywords: &["server", "hosting", "aws"], value: Category::Technology },
    KeywordRule { keywords: &["rent", "office"], value: Category::OfficeSpace },
    KeywordRule { keywords: &["subscription", "saas"], value: Category::SubscriptionRevenue },
    KeywordRule { keywords: &["consulting", "service"], value: Category::Services },
    KeywordRule { keywords: &["equipment", "hardware", "furniture"], value: Category::Equipment },
    KeywordRule { keywords: &["loan", "borrowed"], value: Category::Loans },
    KeywordRule { keywords: &["asset", "investment"], value: Category::Assets },
];

/// Invoice wording always lands in receivables, whatever matched above.
static CATEGORY_OVERRIDES: &[KeywordRule<Category>] = &[KeywordRule {
    keywords: &["invoice", "bill to"],
    value: Category::AccountsReceivable,
}];

/// Categorize lowercased entry text.
pub fn categorize(lower: &str) -> Category {
    first_match(CATEGORY_OVERRIDES, lower)
        .or_else(|| first_match(CATEGORY_RULES, lower))
        .cloned()
        .unwrap_or(Category::Miscellaneous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_is_technology() {
        assert_eq!(categorize("paid aws bill 1452"), Category::Technology);
    }

    #[test]
    fn test_priority_order() {
        // payroll outranks office
        assert_eq!(categorize("office payroll 3000"), Category::Payroll);
        // keywords match substrings: "current" contains "rent"
        assert_eq!(categorize("current hosting 20"), Category::Technology);
        assert_eq!(categorize("paid current bill 20"), Category::OfficeSpace);
    }

    #[test]
    fn test_invoice_overrides_category() {
        assert_eq!(
            categorize("invoice initech for consulting 4000"),
            Category::AccountsReceivable
        );
        assert_eq!(categorize("bill to hooli 100"), Category::AccountsReceivable);
    }

    #[test]
    fn test_loans_and_default() {
        assert_eq!(categorize("got a loan from wells fargo for 50k"), Category::Loans);
        assert_eq!(categorize("coffee 4"), Category::Miscellaneous);
    }
}
