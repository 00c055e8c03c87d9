//! Session state machine.
//!
//!   Idle --submit--> Sending --classified--> Idle (reply appended)
//!
//! The user bubble is appended synchronously inside `submit`; the classifier
//! runs after the simulated processing delay on a spawned task. A submit
//! that arrives while another one is in flight is dropped.
//!
//! `reset` returns the conversation to idle at once, but a request already
//! in flight still finishes: its entry or report lands in the stores, its
//! reply is discarded, and new submits stay rejected until it drains.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use beekay_core::report::aggregate;
use beekay_core::{
    render_report, Clock, Context, Entry, EntryStore, IdGen, Report, ReportRequest, ReportStore,
};
use beekay_rules::{classify, Reply};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::message::ChatMessage;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause before classifying, mimicking a remote model round trip
    pub processing_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
}

/// Observable state changes, for whatever renders the conversation
#[derive(Debug, Clone)]
pub enum SessionEvent {
    MessageAppended(ChatMessage),
    LoadingChanged(bool),
    /// A request finished; `ok` is false when the reply is an error
    Settled { ok: bool },
    Reset,
}

struct State {
    /// What the conversation shows
    phase: Phase,
    /// A spawned request has not settled yet, possibly from before a reset
    in_flight: bool,
    /// Bumped by `reset`; replies from an older generation are dropped
    generation: u64,
    messages: Vec<ChatMessage>,
    entries: EntryStore,
    reports: ReportStore,
    last_error: Option<String>,
}

struct Inner {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
    ids: IdGen,
    config: SessionConfig,
    events: broadcast::Sender<SessionEvent>,
}

/// One user's conversation plus the entries and reports it produced.
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    pub fn new(clock: Arc<dyn Clock>, config: SessionConfig) -> Self {
        Self::with_entries(clock, config, EntryStore::new())
    }

    /// Start with a pre-seeded entry store.
    pub fn with_entries(clock: Arc<dyn Clock>, config: SessionConfig, entries: EntryStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    phase: Phase::Idle,
                    in_flight: false,
                    generation: 0,
                    messages: Vec::new(),
                    entries,
                    reports: ReportStore::new(),
                    last_error: None,
                }),
                clock,
                ids: IdGen::new(),
                config,
                events,
            }),
        }
    }

    /// Clock and id source for callers that build entries themselves.
    pub fn context(&self) -> Context<'_> {
        Context::new(self.inner.clock.as_ref(), &self.inner.ids)
    }

    /// Replace the entry store, e.g. with entries loaded through
    /// [`Session::context`] so their ids come from the same generator.
    pub fn seed(&self, entries: Vec<Entry>) {
        let count = entries.len();
        self.inner.lock().entries = EntryStore::seeded(entries);
        tracing::info!(count, "entry store seeded");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Submit user text. Blank input, or input while a request is still in
    /// flight, is ignored and returns `None`. Otherwise returns the handle of
    /// the task that appends the assistant's reply; the task yields that
    /// reply, or `None` if the conversation was reset in the meantime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<Option<ChatMessage>>> {
        if text.trim().is_empty() {
            return None;
        }

        let generation = {
            let mut state = self.inner.lock();
            if state.in_flight {
                tracing::warn!("submit ignored: a request is already in flight");
                return None;
            }
            state.in_flight = true;
            state.phase = Phase::Sending;
            state.last_error = None;

            let message = ChatMessage::user(self.inner.next_id(), text, self.inner.clock.now());
            state.messages.push(message.clone());
            self.inner.emit(SessionEvent::MessageAppended(message));
            self.inner.emit(SessionEvent::LoadingChanged(true));
            state.generation
        };

        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        Some(tokio::spawn(async move {
            if !inner.config.processing_delay.is_zero() {
                tokio::time::sleep(inner.config.processing_delay).await;
            }
            inner.process(&text, generation)
        }))
    }

    /// Submit and wait for the reply. Returns `None` when the submission was
    /// ignored or its reply was dropped by a reset.
    pub async fn submit_and_wait(&self, text: &str) -> Option<ChatMessage> {
        let handle = self.submit(text)?;
        match handle.await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "processing task failed");
                self.inner.lock().in_flight = false;
                None
            }
        }
    }

    /// Build a report outside the chat flow and keep it with the others.
    pub fn request_report(&self, request: &ReportRequest) -> Report {
        let mut state = self.inner.lock();
        let report = aggregate(state.entries.as_slice(), request, self.context());
        state.reports.insert(report.clone());
        tracing::info!(id = %report.id, title = %report.title, "report generated");
        report
    }

    pub fn remove_report(&self, id: &str) -> bool {
        let removed = self.inner.lock().reports.remove(id);
        if removed {
            tracing::info!(id, "report removed");
        }
        removed
    }

    /// Drop every entry and report. Messages stay.
    pub fn clear_all(&self) {
        let mut state = self.inner.lock();
        state.entries.clear();
        state.reports.clear();
        tracing::info!("all entries and reports cleared");
    }

    /// Clear the conversation and return to idle. Entries and reports stay.
    pub fn reset(&self) {
        let mut state = self.inner.lock();
        state.generation = state.generation.wrapping_add(1);
        state.messages.clear();
        state.phase = Phase::Idle;
        state.last_error = None;
        self.inner.emit(SessionEvent::Reset);
        self.inner.emit(SessionEvent::LoadingChanged(false));
    }

    /// Text export of a stored report, if it still exists.
    pub fn export_report(&self, id: &str) -> Option<(String, String)> {
        let state = self.inner.lock();
        let report = state.reports.get(id)?;
        Some((
            report.file_name(),
            render_report(report, self.inner.clock.timezone()),
        ))
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.lock().messages.clone()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.inner.lock().entries.as_slice().to_vec()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.inner.lock().reports.as_slice().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().phase == Phase::Sending
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().phase
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> String {
        self.ids.next(self.clock.now())
    }

    fn emit(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    /// Classify and settle. Unless a reset happened since `generation` was
    /// taken, leaves the session idle with exactly one assistant message
    /// appended and returns it.
    fn process(&self, text: &str, generation: u64) -> Option<ChatMessage> {
        let mut state = self.lock();
        let ctx = Context::new(self.clock.as_ref(), &self.ids);
        let outcome = classify(text, state.entries.as_slice(), ctx);
        let now = self.clock.now();

        let (reply, error) = match outcome {
            Ok(Reply::Entry(entry)) => {
                tracing::info!(
                    id = %entry.id,
                    kind = %entry.entry_type,
                    amount = entry.amount,
                    category = %entry.category,
                    "entry recorded"
                );
                let text = format!(
                    "Entry processed successfully: {} ${:.2} - {}",
                    entry.entry_type,
                    entry.abs_amount(),
                    entry.description
                );
                state.entries.insert(entry.clone());
                (ChatMessage::assistant(self.next_id(), text, now).with_entry(entry), None)
            }
            Ok(Reply::Report(report)) => {
                tracing::info!(id = %report.id, title = %report.title, "report generated");
                let text = format!("Report generated successfully: {}", report.title);
                state.reports.insert(report.clone());
                (ChatMessage::assistant(self.next_id(), text, now).with_report(report), None)
            }
            Ok(Reply::Message(message)) => (ChatMessage::assistant(self.next_id(), message, now), None),
            Err(e) => {
                tracing::warn!(error = %e, input = text, "could not process entry");
                (
                    ChatMessage::assistant(self.next_id(), format!("Error: {e}"), now),
                    Some(e.to_string()),
                )
            }
        };

        state.in_flight = false;
        if state.generation != generation {
            tracing::debug!(id = %reply.id, "conversation was reset, reply dropped");
            return None;
        }

        let ok = error.is_none();
        state.last_error = error;
        state.messages.push(reply.clone());
        state.phase = Phase::Idle;
        self.emit(SessionEvent::MessageAppended(reply.clone()));
        self.emit(SessionEvent::Settled { ok });
        self.emit(SessionEvent::LoadingChanged(false));
        Some(reply)
    }
}
