use std::fmt;
use std::sync::mpsc::{Receiver, Sender, TryIter, channel};
use std::sync::{Arc, Mutex, MutexGuard};

use super::messages::CrosshairEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeError {
    /// The chart surface already has a live listener
    AlreadySubscribed,
}

impl fmt::Display for SubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscribeError::AlreadySubscribed => {
                write!(f, "Chart surface already has a cross-hair listener")
            }
        }
    }
}

impl std::error::Error for SubscribeError {}

type Slot = Arc<Mutex<Option<Sender<CrosshairEvent>>>>;

/// Cross-hair event source for one chart surface. Holds at most one listener.
#[derive(Debug, Clone, Default)]
pub struct CrosshairHub {
    slot: Slot,
}

impl CrosshairHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Sender<CrosshairEvent>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Acquire the listener. Released when the returned subscription is dropped.
    pub fn subscribe(&self) -> Result<CrosshairSubscription, SubscribeError> {
        let mut slot = self.slot();
        if slot.is_some() {
            return Err(SubscribeError::AlreadySubscribed);
        }
        let (tx, rx) = channel();
        *slot = Some(tx);
        Ok(CrosshairSubscription {
            slot: Arc::clone(&self.slot),
            rx,
        })
    }

    pub fn has_listener(&self) -> bool {
        self.slot().is_some()
    }

    /// Deliver an event to the listener. Returns `false` if nobody listens.
    pub fn publish(&self, event: CrosshairEvent) -> bool {
        match self.slot().as_ref() {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

/// A live cross-hair listener.
#[derive(Debug)]
pub struct CrosshairSubscription {
    slot: Slot,
    rx: Receiver<CrosshairEvent>,
}

impl CrosshairSubscription {
    /// Pending events in arrival order, without blocking.
    pub fn pending(&self) -> TryIter<'_, CrosshairEvent> {
        self.rx.try_iter()
    }
}

impl Drop for CrosshairSubscription {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_subscription_is_refused() {
        let hub = CrosshairHub::new();
        let _first = hub.subscribe().unwrap();
        assert_eq!(hub.subscribe().unwrap_err(), SubscribeError::AlreadySubscribed);
    }

    #[test]
    fn drop_releases_listener() {
        let hub = CrosshairHub::new();
        let first = hub.subscribe().unwrap();
        assert!(hub.has_listener());

        drop(first);
        assert!(!hub.has_listener());
        assert!(!hub.publish(CrosshairEvent { time: Some(1) }));
        assert!(hub.subscribe().is_ok());
    }

    #[test]
    fn events_arrive_in_order() {
        let hub = CrosshairHub::new();
        let sub = hub.subscribe().unwrap();
        assert!(hub.publish(CrosshairEvent { time: Some(1) }));
        assert!(hub.publish(CrosshairEvent { time: None }));

        let events: Vec<_> = sub.pending().collect();
        assert_eq!(
            events,
            vec![CrosshairEvent { time: Some(1) }, CrosshairEvent { time: None }]
        );
        assert_eq!(sub.pending().count(), 0);
    }
}
