//! beekay-core: ledger model, session stores, report aggregation and export

pub mod context;
pub mod entry;
pub mod error;
pub mod export;
pub mod ids;
pub mod report;
pub mod store;
pub mod time;

pub use context::Context;
pub use entry::{AccountType, Category, Entry, EntryType, FlowType};
pub use error::{InvalidTimezone, ParseError};
pub use export::{read_summary, render_report};
pub use ids::IdGen;
pub use report::{aggregate, Period, Report, ReportKind, ReportRequest, Summary};
pub use store::{EntryStore, ReportStore};
pub use time::{parse_timezone, Clock, FixedClock, SystemClock};
