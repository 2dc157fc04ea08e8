//! Last-value-wins observable cells with scoped subscriptions.
//!
//! An [`Observable`] holds the latest published value and a version counter.
//! [`Observable::subscribe`] hands out a [`Subscription`] that yields each new
//! value once; dropping the subscription deregisters it, so a view that owns its
//! subscriptions cannot leak listeners past its own lifetime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Slot<T> {
    value: T,
    version: u64,
    subscribers: usize,
}

/// A shared, last-value-wins cell.
#[derive(Debug)]
pub struct Observable<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                value,
                version: 0,
                subscribers: 0,
            })),
        }
    }

    /// Replaces the current value and notifies subscribers.
    pub fn publish(&self, value: T) {
        let mut slot = lock(&self.slot);
        slot.value = value;
        slot.version = slot.version.wrapping_add(1);
    }

    /// Returns a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        lock(&self.slot).value.clone()
    }

    /// Registers a subscriber.
    ///
    /// The first call to [`Subscription::changed`] returns the current value.
    ///
    /// # Examples
    ///
    /// ```
    /// use apidex::search::Observable;
    ///
    /// let results = Observable::new(0);
    /// let mut sub = results.subscribe();
    /// assert_eq!(sub.changed(), Some(0));
    /// assert_eq!(sub.changed(), None);
    ///
    /// results.publish(3);
    /// results.publish(5);
    /// assert_eq!(sub.changed(), Some(5));
    ///
    /// drop(sub);
    /// assert_eq!(results.subscriber_count(), 0);
    /// ```
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        let mut slot = lock(&self.slot);
        slot.subscribers += 1;
        Subscription {
            slot: Arc::clone(&self.slot),
            seen: None,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.slot).subscribers
    }
}

/// A handle observing an [`Observable`]; deregisters on drop.
#[derive(Debug)]
pub struct Subscription<T> {
    slot: Arc<Mutex<Slot<T>>>,
    seen: Option<u64>,
}

impl<T: Clone> Subscription<T> {
    /// Returns the latest value if it was published since the last call.
    pub fn changed(&mut self) -> Option<T> {
        let slot = lock(&self.slot);
        if self.seen == Some(slot.version) {
            return None;
        }
        self.seen = Some(slot.version);
        Some(slot.value.clone())
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.subscribers = slot.subscribers.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intermediate_values_are_skipped() {
        let cell = Observable::new(vec![1]);
        let mut sub = cell.subscribe();
        let _ = sub.changed();

        cell.publish(vec![2]);
        cell.publish(vec![3]);
        assert_eq!(sub.changed(), Some(vec![3]));
        assert_eq!(sub.changed(), None);
    }

    #[test]
    fn subscribers_are_counted_independently() {
        let cell = Observable::new("idle");
        let mut a = cell.subscribe();
        let mut b = cell.subscribe();
        assert_eq!(cell.subscriber_count(), 2);

        cell.publish("loading");
        assert_eq!(a.changed(), Some("loading"));
        assert_eq!(b.changed(), Some("loading"));

        drop(a);
        assert_eq!(cell.subscriber_count(), 1);
        drop(b);
        assert_eq!(cell.subscriber_count(), 0);
    }
}
