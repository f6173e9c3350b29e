//! Scripted snapshot fetchers for deterministic polling tests.

use async_trait::async_trait;
use rb_core::polling::{FetchError, SnapshotFetcher};
use rb_protocol::progress_models::ProgressSnapshot;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

/// A fetcher that replays a script of responses.
///
/// Once the script is exhausted the last response is repeated. When a gate
/// is installed every fetch waits for one `release()` before answering,
/// which keeps a request in flight for as long as a test needs.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<ProgressSnapshot, FetchError>>>,
    last: Mutex<Option<Result<ProgressSnapshot, FetchError>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Result<ProgressSnapshot, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Make every fetch wait for [`release`](Self::release).
    #[allow(dead_code)]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one pending (or the next) fetch answer.
    #[allow(dead_code)]
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotFetcher for ScriptedFetcher {
    async fn fetch(&self, _run_id: Uuid) -> Result<ProgressSnapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.script.lock().await.pop_front();
        let mut last = self.last.lock().await;
        match next {
            Some(response) => {
                *last = Some(response.clone());
                response
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(FetchError::Transport("empty script".to_string()))),
        }
    }
}
