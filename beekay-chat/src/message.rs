use beekay_core::{Entry, Report};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One chat bubble. Assistant bubbles may carry the entry or report they
/// announce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(id: String, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            sender: Sender::User,
            text: text.into(),
            entry: None,
            report: None,
            timestamp,
        }
    }

    pub fn assistant(id: String, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            sender: Sender::Assistant,
            text: text.into(),
            entry: None,
            report: None,
            timestamp,
        }
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = Some(report);
        self
    }
}
