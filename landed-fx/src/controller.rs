//! Scheduled exchange-rate refresh.
//!
//! One background task owns the whole refresh lifecycle. At any moment it
//! is in exactly one phase: idle (not running), fetching, or sleeping until
//! a known next fire time. Because fetching happens inline in the loop,
//! there is never more than one fetch in flight; a manual trigger that
//! arrives mid-fetch finds no waiter and is dropped, which is the
//! re-entrancy guard. Teardown mid-fetch abandons the in-flight result
//! without applying it.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

use crate::backoff::backoff_delay;
use crate::source::{RateQuote, RateSource, fetch_or_fallback};

/// Where the refresh task currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Fetching,
    /// Sleeping until the contained epoch-millisecond fire time.
    Scheduled(i64),
}

/// Hook through which fetched quotes reach the state model. Implementations
/// dispatch the standard rate actions; the controller never mutates state
/// any other way.
pub type ApplyRates = Box<dyn Fn(RateQuote) + Send + Sync>;

pub struct RefreshController {
    phase: Arc<Mutex<RefreshPhase>>,
    trigger: Arc<Notify>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshController {
    /// Spawns the refresh loop. The first fetch fires immediately; each
    /// later one after the backoff delay for the current failure streak.
    pub fn spawn(
        source: Arc<dyn RateSource>,
        apply: ApplyRates,
    ) -> Self {
        let phase = Arc::new(Mutex::new(RefreshPhase::Idle));
        let trigger = Arc::new(Notify::new());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            source,
            apply,
            Arc::clone(&phase),
            Arc::clone(&trigger),
            shutdown_rx,
        ));
        Self {
            phase,
            trigger,
            shutdown,
            task,
        }
    }

    pub fn phase(&self) -> RefreshPhase {
        *self.phase.lock().expect("phase lock poisoned")
    }

    /// Requests an immediate refresh. Ignored while a fetch is already in
    /// flight; otherwise the pending sleep is cut short.
    pub fn trigger(&self) {
        self.trigger.notify_waiters();
    }

    /// Stops the loop and waits for it to finish. An in-flight fetch is
    /// abandoned and its result is never applied.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

async fn run_loop(
    source: Arc<dyn RateSource>,
    apply: ApplyRates,
    phase: Arc<Mutex<RefreshPhase>>,
    trigger: Arc<Notify>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut consecutive_failures: u32 = 0;
    loop {
        set_phase(&phase, RefreshPhase::Fetching);
        let now_ms = Utc::now().timestamp_millis();
        let quote = tokio::select! {
            _ = shutdown.changed() => break,
            quote = fetch_or_fallback(source.as_ref(), now_ms) => quote,
        };

        apply(quote);
        consecutive_failures = if quote.is_fallback {
            consecutive_failures + 1
        } else {
            0
        };

        let delay = backoff_delay(consecutive_failures);
        let next_fire = Utc::now().timestamp_millis() + delay.as_millis() as i64;
        set_phase(&phase, RefreshPhase::Scheduled(next_fire));
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = tokio::time::sleep(delay) => {}
            _ = trigger.notified() => {}
        }
    }
    set_phase(&phase, RefreshPhase::Idle);
}

fn set_phase(
    phase: &Mutex<RefreshPhase>,
    next: RefreshPhase,
) {
    *phase.lock().expect("phase lock poisoned") = next;
}
