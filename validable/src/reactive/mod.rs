//! Reactive values for validation state.
//!
//! - [`Observable<T>`]: a writable cell that notifies subscribers on every write
//! - [`Computed<T>`]: a derived value, recomputed when anything it read changes
//! - [`ReadSignal<T>`]: a read-only view over either of the above
//!
//! Dependencies are discovered automatically: reading an `Observable` or a
//! `Computed` with `get()` while a `Computed` is evaluating registers it as a
//! dependency. Dependencies are re-discovered on every evaluation, so a scan
//! that stops early only depends on what it actually read.
//!
//! # Example
//!
//! ```ignore
//! let count = Observable::new(1);
//! let doubled = Computed::new({
//!     let count = count.clone();
//!     move || count.get() * 2
//! });
//!
//! count.set(5);
//! assert_eq!(doubled.get(), 10);
//! ```

mod computed;
mod observable;
mod signal;
mod subscription;
mod tracking;

pub use computed::Computed;
pub use observable::Observable;
pub use signal::ReadSignal;
pub use subscription::Subscription;
pub use tracking::untracked;
