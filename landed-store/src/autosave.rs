//! Debounced write-back of calculator state.
//!
//! Every state change schedules a write; scheduling cancels the previous
//! pending write, so at most one write is ever pending and only the newest
//! state reaches the store. A superseded intermediate state is never
//! written.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use landed_core::state::CalculatorState;
use tokio::task::JoinHandle;

use crate::hydrate::persist;
use crate::kv::KeyValueStore;

/// Delay between the last state change and the actual write.
pub const WRITE_DEBOUNCE: Duration = Duration::from_millis(800);

pub struct Autosaver<S: KeyValueStore + Send + 'static> {
    store: Arc<Mutex<S>>,
    pending: Option<JoinHandle<()>>,
    debounce: Duration,
}

impl<S: KeyValueStore + Send + 'static> Autosaver<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            pending: None,
            debounce: WRITE_DEBOUNCE,
        }
    }

    pub fn with_debounce(
        mut self,
        debounce: Duration,
    ) -> Self {
        self.debounce = debounce;
        self
    }

    /// Shared handle to the underlying store, for reads and for the rate
    /// snapshot writes that bypass the debounce.
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Schedules a write of `state` after the debounce window, replacing
    /// any write still pending.
    pub fn schedule(
        &mut self,
        state: CalculatorState,
    ) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let store = Arc::clone(&self.store);
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let now_ms = chrono::Utc::now().timestamp_millis();
            let mut guard = store.lock().expect("store lock poisoned");
            if let Err(error) = persist(&mut *guard, &state, now_ms) {
                tracing::warn!(?error, "debounced state write failed");
            }
        }));
    }

    /// Writes `state` immediately, canceling any pending write. Used on
    /// teardown so the latest state is never lost to the debounce window.
    pub fn flush(
        &mut self,
        state: &CalculatorState,
    ) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let now_ms = chrono::Utc::now().timestamp_millis();
        let mut guard = self.store.lock().expect("store lock poisoned");
        persist(&mut *guard, state, now_ms)
    }
}
