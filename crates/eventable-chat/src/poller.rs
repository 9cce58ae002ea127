//! The chat polling task.
//!
//! One task per open chat view. While visible it fetches messages newer
//! than the last one seen on a fixed interval and publishes the merged,
//! ordered sequence over a watch channel. Hiding the view pauses the
//! fetches; showing it again triggers an immediate catch-up. Stopping (or
//! dropping) the poller ends the task: no orphaned timers. A failed poll
//! leaves the published state unchanged until the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use eventable_api::EventableApi;
use eventable_core::{EventId, Message};

use crate::merge::merge_messages;

/// Default poll interval while the chat view is open and visible.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Page size for the initial load.
const INITIAL_LIMIT: u32 = 50;

/// Handle to a running chat poll task.
pub struct ChatPoller {
    messages: watch::Receiver<Vec<Message>>,
    visible: watch::Sender<bool>,
    local: mpsc::UnboundedSender<Message>,
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ChatPoller {
    /// Spawn the poll task for one event's chat.
    pub fn spawn(api: Arc<dyn EventableApi>, event: EventId, interval: Duration) -> Self {
        let (messages_tx, messages_rx) = watch::channel(Vec::new());
        let (visible_tx, visible_rx) = watch::channel(true);
        let (local_tx, local_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(poll_loop(
            api,
            event,
            interval,
            messages_tx,
            visible_rx,
            local_rx,
            shutdown_rx,
        ));

        Self {
            messages: messages_rx,
            visible: visible_tx,
            local: local_tx,
            shutdown: shutdown_tx,
            handle,
        }
    }

    /// Subscribe to the merged, ordered message sequence.
    pub fn messages(&self) -> watch::Receiver<Vec<Message>> {
        self.messages.clone()
    }

    /// Gate polling on view visibility. Becoming visible triggers an
    /// immediate catch-up fetch.
    pub fn set_visible(&self, visible: bool) {
        let _ = self.visible.send(visible);
    }

    /// Merge a message the caller just sent, without waiting for the next
    /// poll to observe it.
    pub fn record_sent(&self, message: Message) {
        let _ = self.local.send(message);
    }

    /// Stop the task and wait for it to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        let _ = (&mut self.handle).await;
    }
}

impl Drop for ChatPoller {
    fn drop(&mut self) {
        // stop() awaits the task; a bare drop still must not leak it
        self.handle.abort();
    }
}

async fn poll_loop(
    api: Arc<dyn EventableApi>,
    event: EventId,
    interval: Duration,
    messages: watch::Sender<Vec<Message>>,
    mut visible: watch::Receiver<bool>,
    mut local: mpsc::UnboundedReceiver<Message>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut initial_loaded = false;

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            changed = visible.changed() => {
                if changed.is_err() {
                    break;
                }
                if *visible.borrow() {
                    // catch up right away after returning to the foreground
                    fetch_and_publish(api.as_ref(), event, &messages, &mut initial_loaded).await;
                }
            }
            Some(message) = local.recv() => {
                let merged = merge_messages(&messages.borrow(), vec![message]);
                let _ = messages.send(merged);
            }
            _ = ticker.tick() => {
                if *visible.borrow() {
                    fetch_and_publish(api.as_ref(), event, &messages, &mut initial_loaded).await;
                }
            }
        }
    }
    debug!(%event, "chat poller stopped");
}

async fn fetch_and_publish(
    api: &dyn EventableApi,
    event: EventId,
    messages: &watch::Sender<Vec<Message>>,
    initial_loaded: &mut bool,
) {
    let (since, limit) = if *initial_loaded {
        let last_seen = messages.borrow().last().map(|m| m.created_at);
        (last_seen, None)
    } else {
        (None, Some(INITIAL_LIMIT))
    };

    match api.event_messages(event, since, limit).await {
        Ok(batch) => {
            *initial_loaded = true;
            let incoming: Vec<Message> = batch.into_iter().map(Message::from).collect();
            let current = messages.borrow().clone();
            let merged = merge_messages(&current, incoming);
            if merged != current {
                let _ = messages.send(merged);
            }
        }
        Err(err) => {
            // state stays as-is until the next tick
            warn!(%event, error = %err, "chat poll failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use eventable_api::{ApiError, MessageDto, MockEventableApi};
    use eventable_core::{MessageId, UserId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn dto(nth: u128, at: i64, event: EventId) -> MessageDto {
        MessageDto {
            id: MessageId(Uuid::from_u128(nth)),
            event_id: event,
            sender_id: UserId(Uuid::from_u128(9)),
            content: format!("message {nth}"),
            created_at: Utc.timestamp_opt(at, 0).unwrap(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_then_incremental_merge() {
        let event = EventId(Uuid::from_u128(7));
        let calls = Arc::new(AtomicUsize::new(0));
        let call_counter = calls.clone();

        let mut api = MockEventableApi::new();
        api.expect_event_messages().returning(move |event, since, _| {
            match call_counter.fetch_add(1, Ordering::SeqCst) {
                0 => {
                    assert!(since.is_none());
                    Ok(vec![dto(1, 10, event), dto(3, 30, event)])
                }
                _ => {
                    assert!(since.is_some());
                    Ok(vec![dto(2, 20, event), dto(3, 30, event)])
                }
            }
        });

        let poller = ChatPoller::spawn(Arc::new(api), event, Duration::from_secs(5));
        let mut rx = poller.messages();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 2);

        rx.changed().await.unwrap();
        let ids: Vec<u128> = rx.borrow().iter().map(|m| m.id.0.as_u128()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        poller.stop().await;
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_leaves_state_unchanged() {
        let event = EventId(Uuid::from_u128(7));
        let calls = Arc::new(AtomicUsize::new(0));
        let call_counter = calls.clone();

        let mut api = MockEventableApi::new();
        api.expect_event_messages().returning(move |event, _, _| {
            match call_counter.fetch_add(1, Ordering::SeqCst) {
                0 => Err(ApiError::Transport("connection refused".to_string())),
                _ => Ok(vec![dto(1, 10, event)]),
            }
        });

        let poller = ChatPoller::spawn(Arc::new(api), event, Duration::from_secs(5));
        let mut rx = poller.messages();

        // first publish only happens once a poll succeeds
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
        assert!(calls.load(Ordering::SeqCst) >= 2);

        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_poller_pauses_until_visible() {
        let event = EventId(Uuid::from_u128(7));
        let calls = Arc::new(AtomicUsize::new(0));
        let call_counter = calls.clone();

        let mut api = MockEventableApi::new();
        api.expect_event_messages().returning(move |event, _, _| {
            call_counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![dto(1, 10, event)])
        });

        let poller = ChatPoller::spawn(Arc::new(api), event, Duration::from_secs(5));
        poller.set_visible(false);
        // allow the hidden period to elapse several intervals
        tokio::time::sleep(Duration::from_secs(30)).await;

        let fetched_while_hidden = calls.load(Ordering::SeqCst);

        let mut rx = poller.messages();
        poller.set_visible(true);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
        assert!(calls.load(Ordering::SeqCst) > fetched_while_hidden);

        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_sent_merges_immediately() {
        let event = EventId(Uuid::from_u128(7));
        let mut api = MockEventableApi::new();
        api.expect_event_messages()
            .returning(move |event, _, _| Ok(vec![dto(1, 10, event)]));

        let poller = ChatPoller::spawn(Arc::new(api), event, Duration::from_secs(5));
        let mut rx = poller.messages();
        rx.changed().await.unwrap();

        poller.record_sent(Message::from(dto(2, 20, event)));
        rx.changed().await.unwrap();
        let ids: Vec<u128> = rx.borrow().iter().map(|m| m.id.0.as_u128()).collect();
        assert_eq!(ids, vec![1, 2]);

        poller.stop().await;
    }
}
