//! The validator record attached to a validable value.

use std::sync::{Arc, Mutex};

use crate::reactive::{Computed, ReadSignal, Subscription};

/// A single check attached to a [`Validable`](super::Validable).
///
/// `error_message` is `None` (or empty) when the check passes. `validating`
/// is only present for checks that can be in flight, such as a remote call;
/// read it before trusting `error_message`.
///
/// Validators are immutable once built. Clones share the same signals.
#[derive(Clone)]
pub struct Validator {
    error_message: ReadSignal<Option<String>>,
    validating: Option<ReadSignal<bool>>,
    /// Subscriptions that must live as long as the validator.
    guards: Arc<Mutex<Vec<Subscription>>>,
}

impl Validator {
    pub fn new(error_message: impl Into<ReadSignal<Option<String>>>) -> Self {
        Self {
            error_message: error_message.into(),
            validating: None,
            guards: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Build a validator whose message is derived from whatever `check` reads.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self::new(Computed::new(check))
    }

    /// Attach an in-flight flag.
    pub fn with_validating(mut self, validating: impl Into<ReadSignal<bool>>) -> Self {
        self.validating = Some(validating.into());
        self
    }

    /// Keep `subscription` alive for as long as this validator exists.
    pub fn with_guard(self, subscription: Subscription) -> Self {
        self.guards
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(subscription);
        self
    }

    /// Current error, `None` when the check passes. Tracked.
    pub fn error_message(&self) -> Option<String> {
        self.error_message.get().filter(|message| !message.is_empty())
    }

    /// Whether the check is still running. Tracked.
    pub fn is_validating(&self) -> bool {
        self.validating.as_ref().is_some_and(ReadSignal::get)
    }

    pub fn error_signal(&self) -> &ReadSignal<Option<String>> {
        &self.error_message
    }

    pub fn validating_signal(&self) -> Option<&ReadSignal<bool>> {
        self.validating.as_ref()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("error_message", &self.error_message.peek())
            .field(
                "validating",
                &self.validating.as_ref().map(ReadSignal::peek),
            )
            .finish()
    }
}
