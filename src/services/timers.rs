//! Scoped one-shot timers
//!
//! Timers post a `TimerEvent` back to the view after a delay. They are
//! owned by the `TimerService`; dropping the service (view teardown)
//! aborts every timer that has not fired yet.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::LayerRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Clear editor undo history once a layer's style has settled
    ClearHistory { layer: LayerRef },
}

pub struct TimerService {
    tx: mpsc::UnboundedSender<TimerEvent>,
    handles: Vec<JoinHandle<()>>,
}

impl TimerService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                handles: Vec::new(),
            },
            rx,
        )
    }

    pub fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.handles.retain(|handle| !handle.is_finished());

        debug!(?event, ?delay, "scheduling timer");
        let tx = self.tx.clone();
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        }));
    }

    /// Number of timers that have not fired yet
    pub fn pending(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(name: &str) -> TimerEvent {
        TimerEvent::ClearHistory {
            layer: LayerRef {
                workspace: "ws1".to_string(),
                name: name.to_string(),
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay() {
        let (mut timers, mut rx) = TimerService::new();
        let start = tokio::time::Instant::now();
        timers.schedule(Duration::from_secs(5), clear("roads"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, clear("roads"));
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timers() {
        let (mut timers, mut rx) = TimerService::new();
        timers.schedule(Duration::from_secs(5), clear("roads"));
        assert_eq!(timers.pending(), 1);
        drop(timers);

        tokio::time::sleep(Duration::from_secs(10)).await;
        // Sender side is gone with the service and the task was aborted
        assert!(rx.recv().await.is_none());
    }
}
