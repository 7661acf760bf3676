//! Listener lists and subscription handles.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered listener list shared between a reactive node and its subscriptions.
pub(crate) struct Listeners<T> {
    inner: Arc<ListenersInner<T>>,
}

struct ListenersInner<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener<T>)>>,
}

impl<T: 'static> Listeners<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(ListenersInner {
                next_id: AtomicU64::new(0),
                entries: Mutex::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn add(&self, listener: Listener<T>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, listener));

        let weak: Weak<ListenersInner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .entries
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Call every listener with `value`. No lock is held during the calls,
    /// so listeners may subscribe, unsubscribe or write other nodes.
    pub(crate) fn notify(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .inner
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// Handle returned by `subscribe`.
///
/// The listener stays registered while the handle lives. Dropping the handle
/// or calling [`dispose`](Self::dispose) releases it.
#[must_use = "dropping a Subscription immediately releases the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub(crate) fn new(release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release the listener now.
    pub fn dispose(mut self) {
        self.release_now();
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
