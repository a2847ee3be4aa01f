//! Broadcast channel for view events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. The controller
//! publishes every [`ViewEvent`] here; renderers subscribe and redraw.

use tokio::sync::broadcast;

use super::ViewEvent;

/// Broadcast bus for [`ViewEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers. A renderer that lags should re-read the controller snapshot
/// instead of replaying events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ViewEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; [`crate::config::ExplorerConfig`]
    /// rejects that value before it reaches here.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event. With no
    /// active receivers the event is silently dropped.
    pub fn publish(&self, event: ViewEvent) -> usize {
        tracing::trace!(ticket = ?event.ticket(), "publishing view event");
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn make_event(visible: bool) -> ViewEvent {
        ViewEvent::SuggestionsChanged {
            suggestions: vec!["paneer tikka".to_string()],
            visible,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(make_event(true)), 0);
    }

    #[tokio::test]
    async fn subscriber_receives_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(make_event(false));

        let Ok(ViewEvent::SuggestionsChanged { visible, .. }) = rx.recv().await else {
            panic!("expected suggestion event");
        };
        assert!(!visible);
    }

    #[test]
    fn publish_counts_live_subscribers() {
        let bus = EventBus::new(16);
        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.publish(make_event(true)), 2);
        drop(rx1);
        assert_eq!(bus.publish(make_event(false)), 1);
    }
}
