//! Dependency tracking for derived values.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::subscription::Subscription;

/// Identity of a reactive node, used to de-duplicate dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Callback invoked when a source changed.
pub(crate) type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Anything a derived value can depend on.
pub(crate) trait Source: Send + Sync {
    fn node_id(&self) -> NodeId;

    /// Subscribe to change notifications without caring about the value.
    fn on_change(&self, listener: ChangeListener) -> Subscription;
}

thread_local! {
    /// One frame per evaluation in progress. `None` frames suppress tracking.
    static FRAMES: RefCell<Vec<Option<Vec<Arc<dyn Source>>>>> = const { RefCell::new(Vec::new()) };
}

/// Pops the frame it pushed, even if the evaluation panics.
struct FrameGuard;

impl FrameGuard {
    fn push(frame: Option<Vec<Arc<dyn Source>>>) -> Self {
        FRAMES.with(|frames| frames.borrow_mut().push(frame));
        Self
    }

    fn pop(self) -> Option<Vec<Arc<dyn Source>>> {
        let frame = FRAMES.with(|frames| frames.borrow_mut().pop()).flatten();
        std::mem::forget(self);
        frame
    }
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        FRAMES.with(|frames| {
            frames.borrow_mut().pop();
        });
    }
}

/// Record `source` as a dependency of the evaluation in progress, if any.
pub(crate) fn track(source: Arc<dyn Source>) {
    FRAMES.with(|frames| {
        if let Some(Some(frame)) = frames.borrow_mut().last_mut() {
            let id = source.node_id();
            if !frame.iter().any(|s| s.node_id() == id) {
                frame.push(source);
            }
        }
    });
}

/// Run `f` and return its result with every source it read.
pub(crate) fn collect<R>(f: impl FnOnce() -> R) -> (R, Vec<Arc<dyn Source>>) {
    let guard = FrameGuard::push(Some(Vec::new()));
    let result = f();
    let sources = guard.pop().unwrap_or_default();
    (result, sources)
}

/// Run `f` without recording any dependency for the enclosing evaluation.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    let guard = FrameGuard::push(None);
    let result = f();
    drop(guard);
    result
}
