//! Per-view polling state machine.
//!
//! Each view that observes a run owns one `PollingController`. While the
//! run's effective status is active the controller refreshes its snapshot
//! once immediately and then on a fixed interval:
//!
//! Idle -> Polling -> (Idle | Stopped)
//!
//! At most one refresh is in flight per controller. A tick that finds the
//! previous refresh still pending is skipped, not queued. Stopping clears
//! the timer and the in-flight flag, and responses belonging to a stopped
//! session are discarded, so a view never shows a response older than the
//! one it last rendered.

use crate::polling::fetcher::{FetchError, SnapshotFetcher};
use rb_protocol::ipc::{PollEvent, PollerState};
use rb_protocol::progress_models::ProgressSnapshot;
use rb_protocol::run_models::ExecutionStatus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A refresh request was started.
    Issued,

    /// The previous refresh is still pending; nothing was started.
    SkippedInFlight,

    /// The controller is not polling (or the tick belongs to an old
    /// session).
    NotPolling,
}

struct Inner {
    state: PollerState,

    /// Incremented on every start and stop. Work tagged with an older
    /// generation is ignored.
    generation: u64,

    latest: Option<ProgressSnapshot>,

    timer: Option<JoinHandle<()>>,

    fetch: Option<JoinHandle<()>>,
}

struct Shared {
    run_id: Uuid,
    fetcher: Arc<dyn SnapshotFetcher>,
    events_tx: mpsc::Sender<PollEvent>,
    in_flight: AtomicBool,
    /// Set once the owning controller is dropped.
    closed: AtomicBool,
    inner: Mutex<Inner>,
}

/// Refreshes the live snapshot of one run while it is active.
pub struct PollingController {
    shared: Arc<Shared>,
    interval: Duration,
}

impl PollingController {
    /// Create an idle controller.
    ///
    /// # Arguments
    ///
    /// * `run_id` - The run to observe
    /// * `fetcher` - Where snapshots are read from
    /// * `interval` - Delay between refreshes (5000 ms by default config)
    /// * `events_tx` - Channel for sending updates to the owning view
    pub fn new(
        run_id: Uuid,
        fetcher: Arc<dyn SnapshotFetcher>,
        interval: Duration,
        events_tx: mpsc::Sender<PollEvent>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                run_id,
                fetcher,
                events_tx,
                in_flight: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                inner: Mutex::new(Inner {
                    state: PollerState::Idle,
                    generation: 0,
                    latest: None,
                    timer: None,
                    fetch: None,
                }),
            }),
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.shared.run_id
    }

    pub async fn state(&self) -> PollerState {
        self.shared.inner.lock().await.state
    }

    /// The most recent successful snapshot, if any.
    pub async fn latest_snapshot(&self) -> Option<ProgressSnapshot> {
        self.shared.inner.lock().await.latest.clone()
    }

    /// Whether a refresh request is currently pending.
    pub fn is_in_flight(&self) -> bool {
        self.shared.in_flight.load(Ordering::Acquire)
    }

    /// Re-evaluate whether the run should be polled.
    ///
    /// The effective status is the latest live status if one was received,
    /// otherwise `stored_status`. Polling starts when it is active and the
    /// controller is not already polling; it stops (moving to `Stopped`)
    /// when it is no longer active.
    ///
    /// # Returns
    ///
    /// The controller state after the re-evaluation.
    pub async fn observe(&self, stored_status: &ExecutionStatus) -> PollerState {
        let mut inner = self.shared.inner.lock().await;
        let active = match &inner.latest {
            Some(snapshot) => snapshot.status.is_active(),
            None => stored_status.is_active(),
        };

        match (inner.state, active) {
            (PollerState::Polling, true) => PollerState::Polling,
            (PollerState::Polling, false) => {
                self.shared.halt(&mut inner, PollerState::Stopped);
                drop(inner);
                self.shared.emit_stopped(PollerState::Stopped).await;
                PollerState::Stopped
            }
            (_, true) => {
                self.start(&mut inner).await;
                PollerState::Polling
            }
            (state, false) => state,
        }
    }

    /// Tear the controller down, e.g. when the view goes away.
    ///
    /// Clears the timer, the in-flight flag and the last snapshot, and
    /// returns to `Idle` so a later [`observe`](Self::observe) can restart.
    pub async fn stop(&self) {
        let mut inner = self.shared.inner.lock().await;
        let was_polling = inner.state == PollerState::Polling;
        self.shared.halt(&mut inner, PollerState::Idle);
        inner.latest = None;
        drop(inner);

        if was_polling {
            self.shared.emit_stopped(PollerState::Idle).await;
        }
    }

    /// Run one tick by hand, outside the timer.
    pub async fn tick(&self) -> TickOutcome {
        let generation = self.shared.inner.lock().await.generation;
        self.shared.tick(generation).await
    }

    async fn start(&self, inner: &mut Inner) {
        inner.generation += 1;
        inner.state = PollerState::Polling;
        self.shared.in_flight.store(false, Ordering::Release);

        let generation = inner.generation;
        let shared = Arc::clone(&self.shared);
        let period = self.interval;
        inner.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                // The first tick completes immediately.
                ticker.tick().await;
                if shared.tick(generation).await == TickOutcome::NotPolling {
                    break;
                }
            }
        }));

        tracing::info!(
            run_id = %self.shared.run_id,
            interval_ms = period.as_millis() as u64,
            "polling started"
        );
        // Sent while the lock is held so it precedes any update of this
        // session.
        let _ = self
            .shared
            .events_tx
            .send(PollEvent::PollingStarted {
                run_id: self.shared.run_id,
            })
            .await;
    }
}

impl Shared {
    async fn tick(self: &Arc<Self>, generation: u64) -> TickOutcome {
        let mut inner = self.inner.lock().await;
        if self.closed.load(Ordering::Acquire)
            || inner.state != PollerState::Polling
            || inner.generation != generation
        {
            return TickOutcome::NotPolling;
        }

        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!(run_id = %self.run_id, "refresh still in flight, skipping tick");
            return TickOutcome::SkippedInFlight;
        }

        let shared = Arc::clone(self);
        inner.fetch = Some(tokio::spawn(async move {
            let result = shared.fetcher.fetch(shared.run_id).await;
            shared.complete(generation, result).await;
        }));
        tracing::debug!(run_id = %self.run_id, "refresh issued");

        TickOutcome::Issued
    }

    async fn complete(&self, generation: u64, result: Result<ProgressSnapshot, FetchError>) {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            tracing::debug!(run_id = %self.run_id, "discarding response from a stopped session");
            return;
        }
        // This task is finishing on its own; halting must not abort it.
        inner.fetch = None;

        match result {
            Ok(snapshot) => {
                let still_active = snapshot.status.is_active();
                inner.latest = Some(snapshot.clone());
                if !still_active {
                    self.halt(&mut inner, PollerState::Stopped);
                }
                drop(inner);

                let _ = self
                    .events_tx
                    .send(PollEvent::SnapshotUpdated {
                        run_id: self.run_id,
                        snapshot,
                    })
                    .await;

                if still_active {
                    self.release(generation).await;
                } else {
                    self.emit_stopped(PollerState::Stopped).await;
                }
            }
            Err(error) => {
                drop(inner);
                tracing::warn!(run_id = %self.run_id, %error, "refresh failed, keeping previous snapshot");
                let _ = self
                    .events_tx
                    .send(PollEvent::RefreshFailed {
                        run_id: self.run_id,
                        error: error.to_string(),
                    })
                    .await;
                self.release(generation).await;
            }
        }
    }

    /// Clear the in-flight flag if the session that set it is still live.
    ///
    /// Done after the update was delivered, so the next refresh cannot
    /// overtake it.
    async fn release(&self, generation: u64) {
        let inner = self.inner.lock().await;
        if inner.generation == generation {
            self.in_flight.store(false, Ordering::Release);
        }
    }

    fn halt(&self, inner: &mut Inner, next: PollerState) {
        inner.generation += 1;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        if let Some(fetch) = inner.fetch.take() {
            fetch.abort();
        }
        self.in_flight.store(false, Ordering::Release);

        if inner.state != next {
            tracing::info!(run_id = %self.run_id, from = ?inner.state, to = ?next, "polling halted");
        }
        inner.state = next;
    }

    async fn emit_stopped(&self, state: PollerState) {
        let _ = self
            .events_tx
            .send(PollEvent::PollingStopped {
                run_id: self.run_id,
                state,
            })
            .await;
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        // If the lock is busy the timer exits on its next tick instead.
        self.shared.closed.store(true, Ordering::Release);
        if let Ok(mut inner) = self.shared.inner.try_lock() {
            self.shared.halt(&mut inner, PollerState::Idle);
        }
    }
}
