//! Intent routing and entry extraction.
//!
//! Intent rules run top to bottom and the first one that claims the text
//! wins:
//! 1) canned demo phrases
//! 2) report keywords (these win over any amount in the text)
//! 3) help keywords
//! 4) entry extraction, the fallback

use beekay_core::report::aggregate;
use beekay_core::{Context, Entry, ParseError, Report};

use crate::amount::extract_amount;
use crate::canned;
use crate::category_rules::categorize;
use crate::description::{describe, with_month_suffix};
use crate::direction::classify_direction;
use crate::keywords::contains_any;
use crate::report_intent::{build_request, is_report_request};

pub const HELP_MESSAGE: &str = "I can help you track your business finances. Just describe a transaction like 'received 25000 from enterprise clients'";

const HELP_KEYWORDS: &[&str] = &["help", "what can you do"];

/// What the assistant answers with
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Entry(Entry),
    Report(Report),
    Message(String),
}

struct Input<'a> {
    text: &'a str,
    lower: String,
    existing: &'a [Entry],
    ctx: Context<'a>,
}

struct IntentRule {
    name: &'static str,
    /// `None` means the rule does not apply and the next one is tried.
    apply: fn(&Input<'_>) -> Option<Result<Reply, ParseError>>,
}

const INTENT_RULES: &[IntentRule] = &[
    IntentRule { name: "canned", apply: canned_rule },
    IntentRule { name: "report", apply: report_rule },
    IntentRule { name: "help", apply: help_rule },
    IntentRule { name: "entry", apply: entry_rule },
];

fn canned_rule(input: &Input<'_>) -> Option<Result<Reply, ParseError>> {
    let hit = canned::lookup(&input.lower)?;
    Some(Ok(Reply::Entry(hit.to_entry(input.ctx))))
}

fn report_rule(input: &Input<'_>) -> Option<Result<Reply, ParseError>> {
    if !is_report_request(&input.lower) {
        return None;
    }
    let request = build_request(&input.lower, input.ctx.clock.today());
    Some(Ok(Reply::Report(aggregate(input.existing, &request, input.ctx))))
}

fn help_rule(input: &Input<'_>) -> Option<Result<Reply, ParseError>> {
    contains_any(&input.lower, HELP_KEYWORDS).then(|| Ok(Reply::Message(HELP_MESSAGE.to_string())))
}

fn entry_rule(input: &Input<'_>) -> Option<Result<Reply, ParseError>> {
    Some(extract_entry(input.text, input.ctx).map(Reply::Entry))
}

/// Classify free text against the entries recorded so far.
///
/// The only failure is `ParseError::AmountNotFound`, raised when the text
/// falls through to entry extraction without a recognizable amount.
pub fn classify(text: &str, existing: &[Entry], ctx: Context<'_>) -> Result<Reply, ParseError> {
    let input = Input {
        text,
        lower: text.to_lowercase(),
        existing,
        ctx,
    };

    for rule in INTENT_RULES {
        if let Some(outcome) = (rule.apply)(&input) {
            tracing::debug!(rule = rule.name, ok = outcome.is_ok(), "intent matched");
            return outcome;
        }
    }

    // entry_rule always claims the text
    Err(ParseError::AmountNotFound)
}

/// Extract a new entry from free text.
pub fn extract_entry(text: &str, ctx: Context<'_>) -> Result<Entry, ParseError> {
    let lower = text.to_lowercase();

    let direction = classify_direction(&lower);
    let magnitude = extract_amount(text)?;
    let category = categorize(&lower);
    let today = ctx.clock.today();
    let description = with_month_suffix(&describe(&lower, direction.entry_type, &category), today);

    Ok(Entry {
        id: ctx.next_id(),
        description,
        amount: direction.entry_type.signed(magnitude),
        category,
        date: today,
        entry_type: direction.entry_type,
        account_type: direction.account_type,
        flow_type: Some(direction.flow_type),
        created_at: ctx.clock.now(),
    })
}
