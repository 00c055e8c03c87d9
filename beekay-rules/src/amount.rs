//! Amount extraction.
//!
//! Patterns are tried in order and the first one that matches anywhere in
//! the text wins:
//!   1) `$1,234.56`, `1234`, `1.5k` (optional `$`, thousands commas, cents, `k`)
//!   2) `5k`
//!   3) `100 dollars`
//!   4) `50 bucks`

use beekay_core::ParseError;
use regex::Regex;
use std::sync::LazyLock;

const PATTERNS: [&str; 4] = [
    r"(?i)\$?(\d+(?:,\d{3})*(?:\.\d{1,2})?k?)",
    r"(?i)(\d+)k\b",
    r"(?i)(\d+)\s+dollars",
    r"(?i)(\d+)\s+bucks",
];

static AMOUNT_RES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| PATTERNS.iter().filter_map(|p| Regex::new(p).ok()).collect());

/// Pull the first monetary amount out of `text` as an unsigned magnitude.
pub fn extract_amount(text: &str) -> Result<f64, ParseError> {
    let token = AMOUNT_RES
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(',', ""))
        .ok_or(ParseError::AmountNotFound)?;

    parse_token(&token).ok_or(ParseError::AmountNotFound)
}

fn parse_token(token: &str) -> Option<f64> {
    match token.strip_suffix(['k', 'K']) {
        Some(prefix) => prefix.parse::<f64>().ok().map(|n| n * 1000.0),
        None => token.parse::<f64>().ok(),
    }
}
