use std::sync::{Arc, RwLock};

use super::subscription::{Listeners, Subscription};
use super::tracking::{self, ChangeListener, NodeId, Source};

struct ObservableInner<T> {
    id: NodeId,
    value: RwLock<T>,
    listeners: Listeners<T>,
}

impl<T: Send + Sync + 'static> Source for ObservableInner<T> {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn on_change(&self, listener: ChangeListener) -> Subscription {
        self.listeners.add(Arc::new(move |_: &T| listener()))
    }
}

/// A writable reactive cell.
///
/// `Observable<T>` is cheap to clone; clones share the same value and the
/// same subscribers. Every write notifies, whether or not the value changed.
///
/// # Example
///
/// ```ignore
/// let name = Observable::new(String::new());
/// let _sub = name.subscribe(|v| println!("name is now {v}"));
/// name.set("Ada".to_string());
/// ```
pub struct Observable<T> {
    inner: Arc<ObservableInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Create a new cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(ObservableInner {
                id: NodeId::next(),
                value: RwLock::new(value),
                listeners: Listeners::new(),
            }),
        }
    }

    /// Get a clone of the current value and record it as a dependency.
    pub fn get(&self) -> T {
        self.track();
        self.peek()
    }

    /// Get a clone of the current value without recording a dependency.
    pub fn peek(&self) -> T {
        self.inner
            .value
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Borrow the current value and record it as a dependency.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.track();
        let guard = self
            .inner
            .value
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        {
            let mut guard = self
                .inner
                .value
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = value.clone();
        }
        self.inner.listeners.notify(&value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let value = {
            let mut guard = self
                .inner
                .value
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut guard);
            guard.clone()
        };
        self.inner.listeners.notify(&value);
    }

    /// Call `listener` with the new value after every write.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.inner.listeners.add(Arc::new(listener))
    }

    /// Number of active subscribers, derived values included.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Whether two handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn track(&self) {
        tracking::track(Arc::clone(&self.inner) as Arc<dyn Source>);
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug + Send + Sync + 'static> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.peek())
            .finish()
    }
}
