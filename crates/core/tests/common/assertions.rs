//! Custom assertion helpers for polling tests.

use rb_protocol::ipc::{PollEvent, PollerState};
use tokio::sync::mpsc::Receiver;

/// Drain every event currently buffered in the channel.
pub fn drain_events(rx: &mut Receiver<PollEvent>) -> Vec<PollEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Count SnapshotUpdated events.
pub fn count_snapshot_updates(events: &[PollEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PollEvent::SnapshotUpdated { .. }))
        .count()
}

/// Count RefreshFailed events.
pub fn count_refresh_failures(events: &[PollEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PollEvent::RefreshFailed { .. }))
        .count()
}

/// Whether a PollingStopped event with the given final state was sent.
pub fn has_stopped_with(events: &[PollEvent], state: PollerState) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            PollEvent::PollingStopped { state: s, .. } if *s == state
        )
    })
}
