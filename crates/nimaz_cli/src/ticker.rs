//! Once-per-interval countdown refresh on a tokio task.

use std::ops::ControlFlow;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Owns at most one ticking task. Starting again aborts the previous one;
/// dropping the ticker aborts it too.
#[derive(Debug, Default)]
pub struct CountdownTicker {
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_tick` with the wall clock every `period` until it breaks
    /// or the ticker is stopped. The first tick fires immediately.
    pub fn start<F>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut(DateTime<Utc>) -> ControlFlow<()> + Send + 'static,
    {
        self.stop();
        debug!("starting countdown ticker every {:?}", period);
        self.handle = Some(tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if on_tick(Utc::now()).is_break() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("stopping countdown ticker");
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait until the task ends on its own. Returns at once if idle.
    pub async fn finished(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            let _ = handle.await;
        }
        self.handle = None;
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
