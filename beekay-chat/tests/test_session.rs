use std::sync::Arc;
use std::time::Duration;

use beekay_chat::{Phase, Sender, Session, SessionConfig, SessionEvent};
use beekay_core::{
    read_summary, Category, Entry, EntryStore, EntryType, FixedClock, ReportRequest,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 2, 19, 18, 0, 0).unwrap(),
        chrono_tz::UTC,
    ))
}

fn instant() -> SessionConfig {
    SessionConfig {
        processing_delay: Duration::ZERO,
    }
}

fn session() -> Session {
    Session::new(clock(), instant())
}

fn seeded_entry(id: &str, date: NaiveDate, amount: f64, category: Category) -> Entry {
    Entry {
        id: id.to_string(),
        description: id.to_string(),
        amount,
        category,
        date,
        entry_type: if amount > 0.0 { EntryType::Income } else { EntryType::Expense },
        account_type: None,
        flow_type: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_entry_round_trip() {
    let s = session();
    let reply = s.submit_and_wait("paid AWS bill 1452").await.unwrap();

    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(
        reply.text,
        "Entry processed successfully: expense $1452.00 - AWS Hosting, Feb"
    );
    let entry = reply.entry.unwrap();
    assert_eq!(entry.amount, -1452.0);

    let messages = s.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].text, "paid AWS bill 1452");

    assert_eq!(s.entries(), vec![entry]);
    assert!(!s.is_loading());
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.last_error(), None);
}

#[tokio::test]
async fn test_entries_newest_first() {
    let s = session();
    s.submit_and_wait("paid AWS bill 1452").await.unwrap();
    s.submit_and_wait("received 900 from acme inc").await.unwrap();

    let descriptions: Vec<String> = s.entries().into_iter().map(|e| e.description).collect();
    assert_eq!(descriptions, vec!["Acme Revenue, Feb", "AWS Hosting, Feb"]);
}

#[tokio::test]
async fn test_parse_failure_settles_with_error() {
    let s = session();
    let reply = s.submit_and_wait("thanks for everything").await.unwrap();

    assert_eq!(
        reply.text,
        "Error: I couldn't detect an amount in your entry. Please include a dollar amount like 1200.00."
    );
    assert!(reply.entry.is_none());
    assert!(s.entries().is_empty());
    assert!(s.last_error().unwrap().contains("couldn't detect an amount"));
    assert!(!s.is_loading());

    // next submission clears the error
    s.submit_and_wait("help").await.unwrap();
    assert_eq!(s.last_error(), None);
}

#[tokio::test]
async fn test_report_and_help_replies() {
    let s = session();
    s.submit_and_wait("paid AWS bill 1452").await.unwrap();

    let reply = s.submit_and_wait("what did I spend today? give me a summary").await.unwrap();
    assert_eq!(
        reply.text,
        "Report generated successfully: Custom Report - 2026-02-19 to 2026-02-19"
    );
    let report = reply.report.unwrap();
    assert_eq!(report.summary.total_expenses, 1452.0);
    assert_eq!(s.reports().len(), 1);

    let help = s.submit_and_wait("what can you do").await.unwrap();
    assert!(help.text.starts_with("I can help you track your business finances."));
    assert!(help.entry.is_none() && help.report.is_none());
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let s = session();
    assert!(s.submit("   ").is_none());
    assert!(s.messages().is_empty());
    assert!(!s.is_loading());
}

#[tokio::test]
async fn test_submit_while_loading_is_ignored() {
    let s = Session::new(
        clock(),
        SessionConfig {
            processing_delay: Duration::from_millis(50),
        },
    );

    let first = s.submit("paid AWS bill 1452").unwrap();
    assert!(s.is_loading());
    assert_eq!(s.messages().len(), 1);

    assert!(s.submit("received 900 from acme inc").is_none());
    assert_eq!(s.messages().len(), 1);

    first.await.unwrap();
    assert!(!s.is_loading());
    assert_eq!(s.messages().len(), 2);
    assert_eq!(s.entries().len(), 1);
}

#[tokio::test]
async fn test_reset_keeps_entries() {
    let s = session();
    s.submit_and_wait("paid AWS bill 1452").await.unwrap();
    s.reset();

    assert!(s.messages().is_empty());
    assert_eq!(s.entries().len(), 1);
    assert_eq!(s.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_clear_all_and_remove_report() {
    let s = session();
    s.submit_and_wait("paid AWS bill 1452").await.unwrap();
    let report = s.request_report(&ReportRequest::monthly("February", "2026"));
    assert_eq!(report.entries.len(), 1);
    assert_eq!(s.reports().len(), 1);

    assert!(s.remove_report(&report.id));
    assert!(!s.remove_report(&report.id));
    assert!(s.reports().is_empty());

    s.request_report(&ReportRequest::default());
    s.clear_all();
    assert!(s.entries().is_empty());
    assert!(s.reports().is_empty());
    assert_eq!(s.messages().len(), 2);
}

#[tokio::test]
async fn test_seeded_store_and_export() {
    let entries = EntryStore::seeded(vec![
        seeded_entry("rent", NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(), -3000.0, Category::OfficeSpace),
        seeded_entry("sale", NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), 4500.0, Category::Sales),
        seeded_entry("old", NaiveDate::from_ymd_opt(2025, 12, 30).unwrap(), 100.0, Category::Sales),
    ]);
    let s = Session::with_entries(clock(), instant(), entries);

    let report = s.request_report(&ReportRequest::monthly("January", "2026"));
    assert_eq!(report.summary.net_amount, 1500.0);

    let (file_name, text) = s.export_report(&report.id).unwrap();
    assert_eq!(file_name, "Monthly_Report_-_January_2026.txt");
    assert_eq!(read_summary(&text), Some(report.summary));
    assert!(text.contains("1/3/2026"));
    assert!(s.export_report("missing").is_none());
}

#[tokio::test]
async fn test_events_follow_the_state_machine() {
    let s = session();
    let mut rx = s.subscribe();
    s.submit_and_wait("paid AWS bill 1452").await.unwrap();

    let mut seen = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        seen.push(ev);
    }

    assert!(matches!(seen[0], SessionEvent::MessageAppended(ref m) if m.sender == Sender::User));
    assert!(matches!(seen[1], SessionEvent::LoadingChanged(true)));
    assert!(matches!(seen[2], SessionEvent::MessageAppended(ref m) if m.sender == Sender::Assistant));
    assert!(matches!(seen[3], SessionEvent::Settled { ok: true }));
    assert!(matches!(seen[4], SessionEvent::LoadingChanged(false)));
}

#[tokio::test]
async fn test_seed_replaces_entries() {
    let s = session();
    s.submit_and_wait("paid AWS bill 1452").await.unwrap();

    let seeded = seeded_entry("rent", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), -3000.0, Category::OfficeSpace);
    s.seed(vec![seeded.clone()]);
    assert_eq!(s.entries(), vec![seeded]);
}

#[tokio::test]
async fn test_reset_while_in_flight_drops_the_stale_reply() {
    let s = Session::new(
        clock(),
        SessionConfig {
            processing_delay: Duration::from_millis(100),
        },
    );

    let first = s.submit("paid AWS bill 1452").unwrap();
    s.reset();
    assert!(!s.is_loading());
    assert!(s.messages().is_empty());

    // no overlapping requests until the first one drains
    assert!(s.submit("received 900 from acme inc").is_none());
    assert!(s.messages().is_empty());

    // the request still resolves into the store, but its reply is dropped
    assert_eq!(first.await.unwrap(), None);
    assert!(s.messages().is_empty());
    assert!(!s.is_loading());
    assert_eq!(s.entries().len(), 1);

    let second = s.submit("received 900 from acme inc").unwrap();
    assert!(s.is_loading());
    let reply = second.await.unwrap().unwrap();
    assert_eq!(reply.text, "Entry processed successfully: income $900.00 - Acme Revenue, Feb");

    let messages = s.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "received 900 from acme inc");
    assert_eq!(messages[1], reply);
    assert!(!s.is_loading());
    assert_eq!(s.entries().len(), 2);
}

#[tokio::test]
async fn test_stale_failure_does_not_set_last_error() {
    let s = Session::new(
        clock(),
        SessionConfig {
            processing_delay: Duration::from_millis(20),
        },
    );

    let first = s.submit("thanks for everything").unwrap();
    s.reset();
    assert_eq!(first.await.unwrap(), None);
    assert_eq!(s.last_error(), None);
    assert!(s.entries().is_empty());
}
