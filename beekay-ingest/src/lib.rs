//! beekay-ingest: seed a session's entry store from CSV exports.

pub mod entries_csv;

pub use entries_csv::{load_entries_csv, parse_entries, IngestError};
