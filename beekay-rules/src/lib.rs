//! beekay-rules: deterministic text classifier that turns free-text
//! bookkeeping statements into entries, report requests or help replies.
//!
//! No LLM involved: every decision is a keyword or regex rule, evaluated in
//! a fixed priority order.

pub mod amount;
pub mod canned;
pub mod category_rules;
pub mod classifier;
pub mod description;
pub mod direction;
pub mod keywords;
pub mod report_intent;

pub use classifier::{classify, Reply, HELP_MESSAGE};
pub use keywords::KeywordRule;
