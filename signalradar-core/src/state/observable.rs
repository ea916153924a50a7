//! Observable value with explicit subscriptions.
//!
//! Replaces implicit re-render: whoever owns the value calls `set`/`update`,
//! and every subscriber is called with the new value, in subscription order.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T) + Send>;

pub struct Observable<T> {
    value: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and notify subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutate in place and notify subscribers.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.notify();
        out
    }

    /// Register a listener. It is not called for the current value.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let value = &self.value;
        for (_, listener) in self.listeners.iter_mut() {
            listener(value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
