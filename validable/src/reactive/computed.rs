use std::sync::{Arc, Mutex, RwLock};

use super::subscription::{Listeners, Subscription};
use super::tracking::{self, ChangeListener, NodeId, Source};

type Compute<T> = Box<dyn Fn() -> T + Send + Sync>;

struct ComputedInner<T> {
    id: NodeId,
    value: RwLock<T>,
    compute: Compute<T>,
    /// Subscriptions to whatever the last evaluation read.
    dependencies: Mutex<Vec<Subscription>>,
    listeners: Listeners<T>,
}

impl<T> Source for ComputedInner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn on_change(&self, listener: ChangeListener) -> Subscription {
        self.listeners.add(Arc::new(move |_: &T| listener()))
    }
}

impl<T> ComputedInner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Replace the dependency subscriptions with ones on `sources`.
    ///
    /// Listeners hold the node weakly: a computed that nobody holds any more
    /// stops recomputing and its subscriptions are released with it.
    fn bind(self: &Arc<Self>, sources: Vec<Arc<dyn Source>>) {
        let subscriptions: Vec<Subscription> = sources
            .iter()
            .map(|source| {
                let weak = Arc::downgrade(self);
                source.on_change(Arc::new(move || {
                    if let Some(node) = weak.upgrade() {
                        node.recompute();
                    }
                }))
            })
            .collect();

        let previous = {
            let mut guard = self
                .dependencies
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *guard, subscriptions)
        };
        drop(previous);
    }

    fn recompute(self: &Arc<Self>) {
        let (next, sources) = tracking::collect(|| (self.compute)());
        self.bind(sources);

        let changed = {
            let mut guard = self
                .value
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *guard != next {
                *guard = next.clone();
                true
            } else {
                false
            }
        };

        if changed {
            log::trace!("[reactive] computed {:?} changed", self.id);
            self.listeners.notify(&next);
        }
    }
}

/// A derived reactive value.
///
/// The closure is evaluated once on creation and again, synchronously,
/// whenever one of the values it read notifies. Subscribers are only told
/// about evaluations that produced a different value.
///
/// # Example
///
/// ```ignore
/// let first = Observable::new("Ada".to_string());
/// let last = Observable::new("Lovelace".to_string());
/// let full = Computed::new({
///     let (first, last) = (first.clone(), last.clone());
///     move || format!("{} {}", first.get(), last.get())
/// });
/// ```
pub struct Computed<T> {
    inner: Arc<ComputedInner<T>>,
}

impl<T> Computed<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let (value, sources) = tracking::collect(&compute);
        let inner = Arc::new(ComputedInner {
            id: NodeId::next(),
            value: RwLock::new(value),
            compute: Box::new(compute),
            dependencies: Mutex::new(Vec::new()),
            listeners: Listeners::new(),
        });
        inner.bind(sources);
        Self { inner }
    }

    /// Get the current value and record it as a dependency.
    pub fn get(&self) -> T {
        tracking::track(Arc::clone(&self.inner) as Arc<dyn Source>);
        self.peek()
    }

    /// Get the current value without recording a dependency.
    pub fn peek(&self) -> T {
        self.inner
            .value
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Call `listener` with the new value whenever it changes.
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

    /// Number of sources the last evaluation read.
    pub fn dependency_count(&self) -> usize {
        self.inner
            .dependencies
            .lock()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Computed<T>
where
    T: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed")
            .field("value", &self.peek())
            .finish()
    }
}
