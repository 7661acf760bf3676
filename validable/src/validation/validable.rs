//! A reactive value with attached validators.

use crate::reactive::{untracked, Computed, Observable, Subscription};

use super::Validator;

/// A reactive value augmented with an ordered list of validators.
///
/// The container derives three values from its validators:
///
/// - `error_message`: the first non-empty error, in attachment order
/// - `validating`: true while any validator is in flight
/// - `valid`: no error and nothing in flight
///
/// Validators can only be added. Clones share the value, the validators
/// and the derived state.
///
/// # Example
///
/// ```ignore
/// use validable::validation::{has_min_length, is_required, Validable};
///
/// let name = Validable::new(String::new())
///     .with_validator(is_required)
///     .with_validator(has_min_length(3));
///
/// assert_eq!(name.error_message().as_deref(), Some("Required field"));
/// name.set("Ada".to_string());
/// assert!(name.is_valid());
/// ```
pub struct Validable<T> {
    value: Observable<T>,
    validators: Observable<Vec<Validator>>,
    error_message: Computed<Option<String>>,
    validating: Computed<bool>,
    valid: Computed<bool>,
}

impl<T: Clone + Send + Sync + 'static> Validable<T> {
    pub fn new(initial: T) -> Self {
        let validators: Observable<Vec<Validator>> = Observable::new(Vec::new());

        let error_message = Computed::new({
            let validators = validators.clone();
            move || {
                validators.with(|validators| {
                    validators
                        .iter()
                        .find_map(Validator::error_message)
                })
            }
        });

        let validating = Computed::new({
            let validators = validators.clone();
            move || validators.with(|validators| validators.iter().any(Validator::is_validating))
        });

        let valid = Computed::new({
            let error_message = error_message.clone();
            let validating = validating.clone();
            move || !validating.get() && error_message.get().is_none()
        });

        Self {
            value: Observable::new(initial),
            validators,
            error_message,
            validating,
            valid,
        }
    }

    /// Build a validator with `factory` and append it. Returns `self` so
    /// calls can be chained.
    pub fn add_validator<F>(&self, factory: F) -> &Self
    where
        F: FnOnce(&Self) -> Validator,
    {
        let validator = untracked(|| factory(self));
        self.validators.update(|validators| validators.push(validator));
        log::debug!(
            "[validation] validator attached ({} total)",
            self.validator_count()
        );
        self
    }

    /// Owned variant of [`add_validator`](Self::add_validator) for builders.
    pub fn with_validator<F>(self, factory: F) -> Self
    where
        F: FnOnce(&Self) -> Validator,
    {
        self.add_validator(factory);
        self
    }

    /// The attached validators, in attachment order.
    pub fn validators(&self) -> Vec<Validator> {
        self.validators.peek()
    }

    pub fn validator_count(&self) -> usize {
        self.validators.with(Vec::len)
    }

    /// The underlying value cell.
    pub fn observable(&self) -> &Observable<T> {
        &self.value
    }

    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn peek(&self) -> T {
        self.value.peek()
    }

    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.value.update(f);
    }

    /// Call `listener` with the new value after every write.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.value.subscribe(listener)
    }

    /// First error in attachment order. Tracked.
    pub fn error_message(&self) -> Option<String> {
        self.error_message.get()
    }

    /// Whether any validator is in flight. Tracked.
    pub fn validating(&self) -> bool {
        self.validating.get()
    }

    /// No error and nothing in flight. Tracked.
    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    pub fn error_message_signal(&self) -> &Computed<Option<String>> {
        &self.error_message
    }

    pub fn validating_signal(&self) -> &Computed<bool> {
        &self.validating
    }

    pub fn valid_signal(&self) -> &Computed<bool> {
        &self.valid
    }
}

impl<T> Clone for Validable<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            validators: self.validators.clone(),
            error_message: self.error_message.clone(),
            validating: self.validating.clone(),
            valid: self.valid.clone(),
        }
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Validable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + std::fmt::Debug + Send + Sync + 'static> std::fmt::Debug for Validable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validable")
            .field("value", &self.value.peek())
            .field("validators", &self.validators.peek().len())
            .field("error_message", &self.error_message.peek())
            .field("validating", &self.validating.peek())
            .finish()
    }
}
