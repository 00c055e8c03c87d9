//! Literal demo phrases that always produce the same entry.

use beekay_core::{Category, Context, Entry, EntryType};

#[derive(Debug, Clone)]
pub struct CannedEntry {
    pub phrase: &'static str,
    pub description: &'static str,
    pub amount: f64,
    pub category: Category,
}

static CANNED: &[CannedEntry] = &[
    CannedEntry {
        phrase: "issue a receipt for mr. rose for 2000",
        description: "Receipt for Mr. Rose",
        amount: 2000.0,
        category: Category::Sales,
    },
    CannedEntry {
        phrase: "invoice globex for 12500 dollars for 50 hours",
        description: "Invoice to Globex for consulting",
        amount: 12500.0,
        category: Category::ConsultingServices,
    },
];

/// Canned example contained in lowercased `lower`, if any.
pub fn lookup(lower: &str) -> Option<&'static CannedEntry> {
    CANNED.iter().find(|c| lower.contains(c.phrase))
}

impl CannedEntry {
    /// Stamp a fresh income entry for this example.
    pub fn to_entry(&self, ctx: Context<'_>) -> Entry {
        Entry {
            id: ctx.next_id(),
            description: self.description.to_string(),
            amount: self.amount,
            category: self.category.clone(),
            date: ctx.clock.today(),
            entry_type: EntryType::Income,
            account_type: None,
            flow_type: None,
            created_at: ctx.clock.now(),
        }
    }
}
