//! beekay-chat: conversation orchestrator. Sequences user text through the
//! classifier, applies the outcome to the session stores and records the
//! assistant's reply.

pub mod message;
pub mod session;

pub use message::{ChatMessage, Sender};
pub use session::{Phase, Session, SessionConfig, SessionEvent};
