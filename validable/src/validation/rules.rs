//! Built-in synchronous validators.
//!
//! Each rule is a validator factory: a function from the target
//! [`Validable`] to a [`Validator`] whose message is recomputed whenever the
//! target's value (or any other value the rule reads) changes. Messages come
//! from the [`ErrorMessages`] table as it stands when the validator is built.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

use super::messages::{ErrorMessages, MessageKind};
use super::{FieldValue, Validable, Validator};
use crate::reactive::Observable;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid e-mail pattern"));

/// Build a validator from a rule over the target's current value.
fn check<T, F>(target: &Validable<T>, rule: F) -> Validator
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> Option<String> + Send + Sync + 'static,
{
    let value = target.observable().clone();
    Validator::from_fn(move || value.with(&rule))
}

/// Numeric reading of a value. Text is parsed, so string-backed inputs can
/// use the range rules.
fn numeric<T: FieldValue>(value: &T) -> Option<f64> {
    value
        .as_number()
        .or_else(|| value.as_text().and_then(|text| text.trim().parse().ok()))
}

/// A validator factory from a custom rule returning the error message.
///
/// ```ignore
/// let age = Validable::new(0u32).with_validator(custom(|v: &u32| {
///     (*v > 150).then(|| "Really?".to_string())
/// }));
/// ```
pub fn custom<T, F>(rule: F) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> Option<String> + Send + Sync + 'static,
{
    move |target| check(target, rule)
}

/// Checks that the value looks like an e-mail address: something, `@`,
/// something, `.`, something, with no whitespace.
pub fn is_email<T>(target: &Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
{
    let message = ErrorMessages::current().email;
    check(target, move |value| {
        let matches = value.as_text().is_some_and(|text| EMAIL.is_match(text));
        (!matches).then(|| message.clone())
    })
}

/// Checks that the value is neither missing nor the empty string.
pub fn is_required<T>(target: &Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
{
    let message = ErrorMessages::current().required;
    check(target, move |value| {
        value.is_empty_value().then(|| message.clone())
    })
}

/// Checks that a text value has at least `min_length` characters.
///
/// An empty value counts as too short.
pub fn has_min_length<T>(min_length: usize) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
{
    move |target| {
        let message = ErrorMessages::current().format(MessageKind::MinLength, min_length);
        check(target, move |value| {
            let too_short =
                !value.is_truthy() || value.char_len().is_some_and(|len| len < min_length);
            too_short.then(|| message.clone())
        })
    }
}

/// Checks that a text value has at most `max_length` characters.
///
/// An empty value never fails this rule.
pub fn has_max_length<T>(max_length: usize) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
{
    move |target| {
        let message = ErrorMessages::current().format(MessageKind::MaxLength, max_length);
        check(target, move |value| {
            let too_long =
                value.is_truthy() && value.char_len().is_some_and(|len| len > max_length);
            too_long.then(|| message.clone())
        })
    }
}

/// Checks that a number lies between `min` and `max`, inclusive.
///
/// Missing values and zero are reported as below the minimum.
pub fn is_in_range<T, N>(min: N, max: N) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
    N: Into<f64> + Display + Copy,
{
    move |target| {
        let messages = ErrorMessages::current();
        let below = messages.format(MessageKind::MinValue, min);
        let above = messages.format(MessageKind::MaxValue, max);
        let (min, max): (f64, f64) = (min.into(), max.into());
        check(target, move |value| {
            let number = numeric(value);
            if !value.is_truthy() || number.is_none_or(|n| n < min) {
                Some(below.clone())
            } else if number.is_some_and(|n| n > max) {
                Some(above.clone())
            } else {
                None
            }
        })
    }
}

/// Checks that a number is at least `min`. Missing values and zero fail.
pub fn is_at_least<T, N>(min: N) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
    N: Into<f64> + Display + Copy,
{
    move |target| {
        let message = ErrorMessages::current().format(MessageKind::MinValue, min);
        let min: f64 = min.into();
        check(target, move |value| {
            let below = !value.is_truthy() || numeric(value).is_none_or(|n| n < min);
            below.then(|| message.clone())
        })
    }
}

/// Checks that a number is at most `max`. Missing values pass.
pub fn is_at_most<T, N>(max: N) -> impl FnOnce(&Validable<T>) -> Validator
where
    T: FieldValue + Clone + Send + Sync + 'static,
    N: Into<f64> + Display + Copy,
{
    move |target| {
        let message = ErrorMessages::current().format(MessageKind::MaxValue, max);
        let max: f64 = max.into();
        check(target, move |value| {
            let above = !value.is_missing() && numeric(value).is_some_and(|n| n > max);
            above.then(|| message.clone())
        })
    }
}

/// Checks that the value equals the current value of `other`, typically a
/// password confirmation. Changing either side re-evaluates.
pub fn are_same<T>(other: &Observable<T>) -> impl FnOnce(&Validable<T>) -> Validator + use<T>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    let other = other.clone();
    move |target| {
        let message = ErrorMessages::current().are_same;
        let value = target.observable().clone();
        Validator::from_fn(move || (value.get() != other.get()).then(|| message.clone()))
    }
}
