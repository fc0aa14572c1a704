//! Fan-out of state snapshots and finished events.
//!
//! Snapshots go through a `watch` channel: a subscriber always sees the
//! newest state and never accumulates a backlog. Finished events go through
//! a `broadcast` channel so each subscriber receives every event once.

use tokio::sync::{broadcast, watch};

use super::state::{RoundFinished, RoundState};

/// Finished events a slow subscriber may fall behind by before lagging.
pub const FINISHED_CAPACITY: usize = 16;

/// Delivers published snapshots and finished events to current subscribers.
#[derive(Debug)]
pub struct StateBroadcaster {
    state_tx: watch::Sender<RoundState>,
    finished_tx: broadcast::Sender<RoundFinished>,
}

impl StateBroadcaster {
    /// Create a broadcaster holding `initial` as the current snapshot.
    #[must_use]
    pub fn new(initial: RoundState) -> Self {
        let (state_tx, _) = watch::channel(initial);
        let (finished_tx, _) = broadcast::channel(FINISHED_CAPACITY);
        Self {
            state_tx,
            finished_tx,
        }
    }

    /// Subscribe to snapshots. `borrow()` on the receiver yields the current
    /// snapshot immediately; `has_changed()` reports later publishes.
    pub fn subscribe_state(&self) -> watch::Receiver<RoundState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to finished events. Past events are not replayed.
    pub fn subscribe_finished(&self) -> broadcast::Receiver<RoundFinished> {
        self.finished_tx.subscribe()
    }

    /// Replace the current snapshot and notify every subscriber.
    pub fn publish_state(&self, state: RoundState) {
        tracing::trace!(
            subscribers = self.state_tx.receiver_count(),
            remaining = state.remaining,
            score = state.score,
            "state published"
        );
        self.state_tx.send_replace(state);
    }

    /// Send a finished event to every finished subscriber.
    pub fn publish_finished(&self, event: RoundFinished) {
        // No subscribers is not an error; the event is simply unobserved.
        let delivered = self.finished_tx.send(event).unwrap_or(0);
        tracing::trace!(subscribers = delivered, "finished published");
    }
}
