//! Collaborators shared by the extractor and the aggregator.

use crate::ids::IdGen;
use crate::time::Clock;

/// Borrowed clock + id source threaded through every operation that stamps
/// an entry or a report.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub clock: &'a dyn Clock,
    pub ids: &'a IdGen,
}

impl<'a> Context<'a> {
    pub fn new(clock: &'a dyn Clock, ids: &'a IdGen) -> Self {
        Self { clock, ids }
    }

    /// Fresh creation-time id.
    pub fn next_id(&self) -> String {
        self.ids.next(self.clock.now())
    }
}
