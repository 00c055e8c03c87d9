//! Creation-time derived identifiers.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Issues millisecond-timestamp ids that never repeat and never go backwards,
/// even when two ids are requested within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGen {
    last: AtomicI64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = millis.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}
