//! Settable values with synchronous change notification.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};

/// A value that other parts of the application can read and watch.
///
/// `set` stores the new value and delivers a copy to every live
/// subscriber before returning. Subscribers receive one notification per
/// `set`, including sets that leave the value unchanged.
pub struct ObservableValue<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<Sender<T>>>,
}

impl<T> Clone for ObservableValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> ObservableValue<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(initial),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Stores `value` and notifies every subscriber before returning.
    /// Subscribers whose receiving end has been dropped are pruned.
    pub fn set(&self, value: T) {
        *self.inner.value.write() = value.clone();
        let mut subscribers = self.inner.subscribers.lock();
        subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// Change stream for this value. The receiver sees every `set` made
    /// after this call, in order.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        self.inner.subscribers.lock().push(tx);
        rx
    }
}

#[cfg(test)]
#[path = "tests/observable_tests.rs"]
mod tests;
