//! In-memory collections owned by a session: entries and generated reports.
//!
//! Both are kept newest first. Nothing here persists past the process.

use crate::entry::Entry;
use crate::report::Report;

/// Recorded transactions, newest first
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a fixed set of entries, already ordered newest first.
    pub fn seeded(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Record a new entry at the front.
    pub fn insert(&mut self, entry: Entry) {
        self.entries.insert(0, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generated reports, newest first
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, report: Report) {
        self.reports.insert(0, report);
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Drop the report with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| r.id != id);
        self.reports.len() != before
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }

    pub fn as_slice(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Category, EntryType};
    use crate::report::{Period, Summary};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn entry(id: &str) -> Entry {
        Entry {
            id: id.to_string(),
            description: format!("entry {id}"),
            amount: 10.0,
            category: Category::Sales,
            date: NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
            entry_type: EntryType::Income,
            account_type: None,
            flow_type: None,
            created_at: Utc.with_ymd_and_hms(2026, 2, 18, 9, 0, 0).unwrap(),
        }
    }

    fn report(id: &str) -> Report {
        Report {
            id: id.to_string(),
            title: format!("report {id}"),
            entries: vec![],
            summary: Summary::default(),
            period: Period::default(),
            generated_at: Utc.with_ymd_and_hms(2026, 2, 18, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_entries_are_newest_first() {
        let mut store = EntryStore::new();
        store.insert(entry("a"));
        store.insert(entry("b"));
        let ids: Vec<_> = store.as_slice().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_report_by_id() {
        let mut reports = ReportStore::new();
        reports.insert(report("r1"));
        reports.insert(report("r2"));

        assert!(reports.remove("r1"));
        assert!(!reports.remove("r1"));
        assert_eq!(reports.len(), 1);
        assert!(reports.get("r2").is_some());
    }
}
