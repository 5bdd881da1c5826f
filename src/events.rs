//! Minimal event source with explicit unsubscribe handles.
//!
//! Replaces ad-hoc callback returns for auth-state and progress-change
//! notifications. Delivery is synchronous in subscription order while the
//! registry lock is held; callbacks must not emit or subscribe reentrantly.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

type Callback<T> = Box<dyn Fn(&T) + Send>;

struct Registry<T> {
    next_id: u64,
    callbacks: BTreeMap<u64, Callback<T>>,
}

pub struct EventSource<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for EventSource<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: 'static> Default for EventSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Registrations are held behind `'static` cancel closures, so event payload
// types must not borrow.
impl<T: 'static> EventSource<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                callbacks: BTreeMap::new(),
            })),
        }
    }

    /// Registers a callback. Dropping the returned handle without calling
    /// [`Subscription::unsubscribe`] leaves the callback registered.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + 'static) -> Subscription {
        let mut registry = self.registry.lock().expect("event registry poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.insert(id, Box::new(callback));
        drop(registry);

        let handle = Arc::clone(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Ok(mut registry) = handle.lock() {
                    registry.callbacks.remove(&id);
                }
            })),
        }
    }

    pub fn emit(&self, event: &T) {
        let registry = self.registry.lock().expect("event registry poisoned");
        for callback in registry.callbacks.values() {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .expect("event registry poisoned")
            .callbacks
            .len()
    }
}

/// Handle that detaches a callback from its [`EventSource`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
