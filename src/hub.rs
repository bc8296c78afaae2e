//! Notification Hub
//!
//! In-process publish/subscribe keyed by (channel, topic, label).
//!
//! A `Hub` is one named channel. Publishing is synchronous: every live
//! subscriber for the exact (topic, label) runs, in subscription order, before
//! `publish` returns. Dropping the returned [`Subscription`] deregisters the
//! handler immediately, even in the middle of a publish.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Handler = Rc<dyn Fn(&dyn Any) -> bool>;

struct Entry {
    topic: String,
    label: String,
    live: Arc<AtomicBool>,
    handler: Handler,
}

impl Entry {
    fn matches(&self, topic: &str, label: &str) -> bool {
        self.topic == topic && self.label == label && self.live.load(Ordering::Relaxed)
    }
}

struct HubInner {
    channel: String,
    entries: Vec<Entry>,
}

/// A named notification channel. Clones share the same registry.
#[derive(Clone)]
pub struct Hub {
    inner: Rc<RefCell<HubInner>>,
}

impl Hub {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                channel: channel.into(),
                entries: Vec::new(),
            })),
        }
    }

    pub fn channel(&self) -> String {
        self.inner.borrow().channel.clone()
    }

    /// Register `handler` for payloads of type `T` published on (topic, label)
    pub fn subscribe<T, F>(&self, topic: &str, label: &str, handler: F) -> Subscription
    where
        T: 'static,
        F: Fn(&T) + 'static,
    {
        let live = Arc::new(AtomicBool::new(true));
        let handler: Handler = Rc::new(move |payload: &dyn Any| match payload.downcast_ref::<T>() {
            Some(value) => {
                handler(value);
                true
            }
            None => false,
        });

        let mut inner = self.inner.borrow_mut();
        inner.entries.retain(|e| e.live.load(Ordering::Relaxed));
        inner.entries.push(Entry {
            topic: topic.to_string(),
            label: label.to_string(),
            live: live.clone(),
            handler,
        });
        tracing::debug!(channel = %inner.channel, topic, label, "hub subscribe");

        Subscription { live }
    }

    /// Deliver `payload` to every live subscriber of (topic, label).
    ///
    /// Returns how many handlers ran.
    pub fn publish<T: 'static>(&self, topic: &str, label: &str, payload: &T) -> usize {
        // Snapshot so handlers can subscribe or publish without a borrow held.
        let targets: Vec<(Arc<AtomicBool>, Handler)> = {
            let inner = self.inner.borrow();
            tracing::debug!(channel = %inner.channel, topic, label, "hub publish");
            inner
                .entries
                .iter()
                .filter(|e| e.matches(topic, label))
                .map(|e| (e.live.clone(), e.handler.clone()))
                .collect()
        };

        let mut delivered = 0;
        for (live, handler) in targets {
            if !live.load(Ordering::Relaxed) {
                continue;
            }
            if handler(payload as &dyn Any) {
                delivered += 1;
            } else {
                tracing::warn!(topic, label, "hub payload type mismatch, handler skipped");
            }
        }
        delivered
    }

    pub fn subscriber_count(&self, topic: &str, label: &str) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.matches(topic, label))
            .count()
    }
}

/// Registration handle. The handler stops receiving once this is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    live: Arc<AtomicBool>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.live.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_publish_reaches_exact_key_in_order() {
        let hub = Hub::new("dataHub");
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        let _a = hub.subscribe("Grocery", "update", move |v: &i32| l1.borrow_mut().push(("a", *v)));
        let l2 = log.clone();
        let _b = hub.subscribe("Grocery", "update", move |v: &i32| l2.borrow_mut().push(("b", *v)));
        let l3 = log.clone();
        let _c = hub.subscribe("Grocery", "create", move |v: &i32| l3.borrow_mut().push(("c", *v)));

        assert_eq!(hub.publish("Grocery", "update", &5), 2);
        assert_eq!(*log.borrow(), vec![("a", 5), ("b", 5)]);
        assert_eq!(hub.publish("Other", "update", &1), 0);
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let hub = Hub::new("dataHub");
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let sub = hub.subscribe("Grocery", "create", move |_: &i32| h.set(h.get() + 1));
        hub.publish("Grocery", "create", &1);
        assert_eq!(hub.subscriber_count("Grocery", "create"), 1);

        sub.unsubscribe();
        hub.publish("Grocery", "create", &2);
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.subscriber_count("Grocery", "create"), 0);
    }

    #[test]
    fn test_unsubscribe_during_publish() {
        let hub = Hub::new("dataHub");
        let second_hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let s = slot.clone();
        let _first = hub.subscribe("Grocery", "delete", move |_: &i32| {
            s.borrow_mut().take();
        });
        let h = second_hits.clone();
        *slot.borrow_mut() = Some(hub.subscribe("Grocery", "delete", move |_: &i32| h.set(h.get() + 1)));

        assert_eq!(hub.publish("Grocery", "delete", &1), 1);
        assert_eq!(second_hits.get(), 0);
    }

    #[test]
    fn test_reentrant_subscribe_and_publish() {
        let hub = Hub::new("dataHub");
        let inner_hits = Rc::new(Cell::new(0));
        let keep = Rc::new(RefCell::new(Vec::new()));

        let (hub2, hits, keep2) = (hub.clone(), inner_hits.clone(), keep.clone());
        let _outer = hub.subscribe("Grocery", "create", move |_: &i32| {
            let h = hits.clone();
            keep2.borrow_mut().push(hub2.subscribe("Grocery", "update", move |_: &i32| h.set(h.get() + 1)));
            hub2.publish("Grocery", "update", &0);
        });

        hub.publish("Grocery", "create", &0);
        assert_eq!(inner_hits.get(), 1);
    }

    #[test]
    fn test_type_mismatch_is_skipped() {
        let hub = Hub::new("dataHub");
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let _sub = hub.subscribe("Grocery", "update", move |_: &String| h.set(h.get() + 1));

        assert_eq!(hub.publish("Grocery", "update", &42_i64), 0);
        assert_eq!(hits.get(), 0);
    }
}
