//! ManualFrameScheduler - frame scheduler driven by the host's own timer

use std::collections::BTreeSet;

use contracts::{FrameRequestId, FrameScheduler};

/// Queues frame requests until the host fires them
///
/// The host owns the clock: on every tick it drains `take_due()` and feeds
/// each id back to the simulator.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    pending: BTreeSet<FrameRequestId>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every outstanding request, oldest first
    pub fn take_due(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Number of outstanding requests
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.pending.contains(&id)
    }

    /// Total requests ever made
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Requests withdrawn before firing
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        self.requested += 1;
        let id = FrameRequestId(self.next_id);
        self.pending.insert(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.pending.remove(&id) {
            self.cancelled += 1;
        }
    }
}
