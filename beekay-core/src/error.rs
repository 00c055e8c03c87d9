use thiserror::Error;

/// Failures the extractor reports back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("I couldn't detect an amount in your entry. Please include a dollar amount like 1200.00.")]
    AmountNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timezone: {0}")]
pub struct InvalidTimezone(pub String);
