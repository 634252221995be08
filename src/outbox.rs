//! Outbound engagement event queue
//!
//! Like/play bookkeeping is optimistic: the local state commits first and an
//! event is pushed here for delivery to the engagement store. A background
//! task drains the queue with bounded retry; an event that exhausts its
//! retries is logged and dropped, never surfaced to the user.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::engagement::EngagementStore;

#[derive(Clone, Debug, PartialEq)]
pub enum EngagementEvent {
    LikeIncrement(String),
    LikeDecrement(String),
    PlayRecorded(String),
}

impl EngagementEvent {
    fn track_id(&self) -> &str {
        match self {
            EngagementEvent::LikeIncrement(id)
            | EngagementEvent::LikeDecrement(id)
            | EngagementEvent::PlayRecorded(id) => id,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            EngagementEvent::LikeIncrement(_) => "like_increment",
            EngagementEvent::LikeDecrement(_) => "like_decrement",
            EngagementEvent::PlayRecorded(_) => "play_recorded",
        }
    }
}

/// Cloneable producer handle; the drain task runs for the session lifetime.
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<EngagementEvent>,
}

impl Outbox {
    /// Spawn the drain task and return the producer handle alongside the
    /// task handle (held for teardown).
    pub fn spawn(
        store: Arc<dyn EngagementStore>,
        retry_limit: u32,
        retry_base: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(drain(rx, store, retry_limit, retry_base));
        (Self { tx }, task)
    }

    /// Queue an event for best-effort delivery. Never blocks, never fails
    /// the caller.
    pub fn push(&self, event: EngagementEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Engagement outbox closed, dropping event");
        }
    }
}

async fn drain(
    mut rx: mpsc::UnboundedReceiver<EngagementEvent>,
    store: Arc<dyn EngagementStore>,
    retry_limit: u32,
    retry_base: Duration,
) {
    while let Some(event) = rx.recv().await {
        deliver(&event, store.as_ref(), retry_limit, retry_base).await;
    }
    tracing::debug!("Engagement outbox drained and closed");
}

async fn deliver(
    event: &EngagementEvent,
    store: &dyn EngagementStore,
    retry_limit: u32,
    retry_base: Duration,
) {
    let mut backoff = retry_base;
    for attempt in 1..=retry_limit.max(1) {
        let result = match event {
            EngagementEvent::LikeIncrement(id) => store.increment_like_count(id).await,
            EngagementEvent::LikeDecrement(id) => store.decrement_like_count(id).await,
            EngagementEvent::PlayRecorded(id) => store.record_play_start(id).await,
        };

        match result {
            Ok(()) => {
                tracing::debug!(
                    kind = event.kind(),
                    track_id = event.track_id(),
                    attempt,
                    "Engagement event delivered"
                );
                return;
            }
            Err(e) if attempt < retry_limit.max(1) => {
                tracing::debug!(
                    kind = event.kind(),
                    track_id = event.track_id(),
                    attempt,
                    error = %e,
                    "Engagement delivery failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => {
                tracing::warn!(
                    kind = event.kind(),
                    track_id = event.track_id(),
                    attempts = attempt,
                    error = %e,
                    "Engagement event dropped after retries"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Mutex;

    /// Store that fails the first `failures` calls, then succeeds.
    struct FlakyStore {
        failures: AtomicU32,
        delivered: Mutex<Vec<String>>,
    }

    impl FlakyStore {
        fn failing(failures: u32) -> Arc<Self> {
            Arc::new(Self {
                failures: AtomicU32::new(failures),
                delivered: Mutex::new(Vec::new()),
            })
        }

        async fn record(&self, call: String) -> Result<()> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(anyhow!("transient failure"));
            }
            self.delivered.lock().await.push(call);
            Ok(())
        }
    }

    #[async_trait]
    impl EngagementStore for FlakyStore {
        async fn increment_like_count(&self, track_id: &str) -> Result<()> {
            self.record(format!("inc:{track_id}")).await
        }
        async fn decrement_like_count(&self, track_id: &str) -> Result<()> {
            self.record(format!("dec:{track_id}")).await
        }
        async fn record_play_start(&self, track_id: &str) -> Result<()> {
            self.record(format!("play:{track_id}")).await
        }
    }

    #[tokio::test]
    async fn delivers_in_order() {
        let store = FlakyStore::failing(0);
        let (outbox, _task) = Outbox::spawn(store.clone(), 3, Duration::from_millis(1));

        outbox.push(EngagementEvent::LikeIncrement("a".into()));
        outbox.push(EngagementEvent::PlayRecorded("a".into()));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(*store.delivered.lock().await, vec!["inc:a", "play:a"]);
    }

    #[tokio::test]
    async fn retries_transient_failures() {
        let store = FlakyStore::failing(2);
        let (outbox, _task) = Outbox::spawn(store.clone(), 3, Duration::from_millis(1));

        outbox.push(EngagementEvent::LikeDecrement("b".into()));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(*store.delivered.lock().await, vec!["dec:b"]);
    }

    #[tokio::test]
    async fn drops_after_retry_exhaustion() {
        let store = FlakyStore::failing(10);
        let (outbox, _task) = Outbox::spawn(store.clone(), 3, Duration::from_millis(1));

        outbox.push(EngagementEvent::LikeIncrement("c".into()));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(store.delivered.lock().await.is_empty());
        // Three attempts were burned on the dropped event
        assert_eq!(store.failures.load(Ordering::SeqCst), 7);
    }
}
