use super::{Computed, Observable, Subscription};

/// Read-only view over a reactive value.
///
/// Validators expose their state through `ReadSignal` so that synchronous
/// checks (derived values) and asynchronous checks (cells written by a
/// completion callback) look the same to the container that aggregates them.
pub enum ReadSignal<T> {
    Cell(Observable<T>),
    Derived(Computed<T>),
}

impl<T> ReadSignal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// A signal that never changes.
    pub fn constant(value: T) -> Self {
        Self::Cell(Observable::new(value))
    }

    /// Get the current value and record it as a dependency.
    pub fn get(&self) -> T {
        match self {
            Self::Cell(cell) => cell.get(),
            Self::Derived(derived) => derived.get(),
        }
    }

    /// Get the current value without recording a dependency.
    pub fn peek(&self) -> T {
        match self {
            Self::Cell(cell) => cell.peek(),
            Self::Derived(derived) => derived.peek(),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        match self {
            Self::Cell(cell) => cell.subscribe(listener),
            Self::Derived(derived) => derived.subscribe(listener),
        }
    }
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Cell(cell) => Self::Cell(cell.clone()),
            Self::Derived(derived) => Self::Derived(derived.clone()),
        }
    }
}

impl<T> From<Observable<T>> for ReadSignal<T> {
    fn from(cell: Observable<T>) -> Self {
        Self::Cell(cell)
    }
}

impl<T> From<Computed<T>> for ReadSignal<T> {
    fn from(derived: Computed<T>) -> Self {
        Self::Derived(derived)
    }
}

impl<T> std::fmt::Debug for ReadSignal<T>
where
    T: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cell(cell) => f.debug_tuple("Cell").field(&cell.peek()).finish(),
            Self::Derived(derived) => f.debug_tuple("Derived").field(&derived.peek()).finish(),
        }
    }
}
