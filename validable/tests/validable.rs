use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use validable::reactive::{Computed, Observable};
use validable::validation::{
    has_min_length, is_email, is_required, Form, ValidationResult, Validable, Validator,
};

fn always(message: &'static str) -> impl FnOnce(&Validable<String>) -> Validator {
    move |_| Validator::from_fn(move || Some(message.to_string()))
}

// ============================================================================
// Aggregated error message
// ============================================================================

#[test]
fn test_no_validators_means_no_error() {
    let field = Validable::new("anything".to_string());
    assert_eq!(field.error_message(), None);
    assert!(!field.validating());
    assert!(field.is_valid());
}

#[test]
fn test_first_attached_error_wins() {
    let field = Validable::new(String::new())
        .with_validator(always("E1"))
        .with_validator(always("E2"));

    assert_eq!(field.error_message().as_deref(), Some("E1"));
}

#[test]
fn test_error_moves_to_next_failing_validator() {
    let field = Validable::new(String::new())
        .with_validator(is_required)
        .with_validator(has_min_length(5))
        .with_validator(is_email);

    assert_eq!(field.error_message().as_deref(), Some("Required field"));

    field.set("ab".to_string());
    assert_eq!(
        field.error_message().as_deref(),
        Some("At least 5 characters long")
    );

    field.set("abcdef".to_string());
    assert_eq!(field.error_message().as_deref(), Some("Wrong e-mail format"));

    field.set("ab@cd.ef".to_string());
    assert_eq!(field.error_message(), None);
    assert!(field.is_valid());
}

#[test]
fn test_empty_message_counts_as_no_error() {
    let field = Validable::new(0)
        .with_validator(|_: &Validable<i32>| Validator::from_fn(|| Some(String::new())))
        .with_validator(|_: &Validable<i32>| Validator::from_fn(|| Some("real".to_string())));

    assert_eq!(field.error_message().as_deref(), Some("real"));
}

#[test]
fn test_attaching_a_validator_recomputes() {
    let field = Validable::new(String::new());
    assert!(field.is_valid());

    field.add_validator(is_required);
    assert_eq!(field.error_message().as_deref(), Some("Required field"));
    assert!(!field.is_valid());
}

// ============================================================================
// Attachment
// ============================================================================

#[test]
fn test_add_validator_chains_and_preserves_order() {
    let field = Validable::new(String::new());
    field
        .add_validator(always("one"))
        .add_validator(always("two"))
        .add_validator(always("three"));

    let messages: Vec<_> = field
        .validators()
        .iter()
        .map(|v| v.error_message().unwrap())
        .collect();
    assert_eq!(messages, vec!["one", "two", "three"]);
}

#[test]
fn test_each_call_attaches_exactly_one_validator() {
    let field = Validable::new(String::new());
    for n in 1..=4 {
        field.add_validator(is_required);
        assert_eq!(field.validator_count(), n);
    }
}

#[test]
fn test_factory_receives_the_container() {
    let seen = Arc::new(Mutex::new(None));
    let field = Validable::new("hello".to_string()).with_validator({
        let seen = Arc::clone(&seen);
        move |target: &Validable<String>| {
            *seen.lock().unwrap() = Some(target.peek());
            Validator::new(Observable::new(None::<String>))
        }
    });

    assert_eq!(seen.lock().unwrap().as_deref(), Some("hello"));
    assert_eq!(field.validator_count(), 1);
}

// ============================================================================
// Validating flag
// ============================================================================

#[test]
fn test_validating_is_the_or_of_validators() {
    let in_flight = Observable::new(false);
    let field = Validable::new(String::new())
        .with_validator(always("E1"))
        .with_validator({
            let in_flight = in_flight.clone();
            move |_: &Validable<String>| {
                Validator::new(Observable::new(None::<String>)).with_validating(in_flight)
            }
        });

    assert!(!field.validating());

    in_flight.set(true);
    assert!(field.validating());
    assert!(!field.is_valid());

    in_flight.set(false);
    assert!(!field.validating());
}

#[test]
fn test_valid_requires_no_error_and_nothing_in_flight() {
    let in_flight = Observable::new(true);
    let field = Validable::new("ok".to_string())
        .with_validator(is_required)
        .with_validator({
            let in_flight = in_flight.clone();
            move |_: &Validable<String>| {
                Validator::new(Observable::new(None::<String>)).with_validating(in_flight)
            }
        });

    assert_eq!(field.error_message(), None);
    assert!(!field.is_valid());

    in_flight.set(false);
    assert!(field.is_valid());
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_error_signal_notifies_on_change_only() {
    let field = Validable::new(String::new()).with_validator(is_required);
    let hits = Arc::new(AtomicUsize::new(0));

    let _sub = field.error_message_signal().subscribe({
        let hits = Arc::clone(&hits);
        move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        }
    });

    field.set("a".to_string());
    field.set("ab".to_string());
    field.set(String::new());

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn test_valid_signal_notifies_on_flips() {
    let field = Validable::new(String::new()).with_validator(is_required);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let _sub = field.valid_signal().subscribe({
        let seen = Arc::clone(&seen);
        move |valid: &bool| seen.lock().unwrap().push(*valid)
    });

    field.set("a".to_string());
    field.set("ab".to_string());
    field.set(String::new());

    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    assert_eq!(field.valid_signal().peek(), field.is_valid());
}

#[test]
fn test_derived_value_over_a_field() {
    let field = Validable::new(String::new()).with_validator(is_required);
    let banner = Computed::new({
        let field = field.clone();
        move || field.error_message().unwrap_or_else(|| "ok".to_string())
    });

    assert_eq!(banner.get(), "Required field");
    field.set("x".to_string());
    assert_eq!(banner.get(), "ok");
}

// ============================================================================
// Form
// ============================================================================

#[test]
fn test_form_collects_errors_in_field_order() {
    let email = Validable::new(String::new()).with_validator(is_required);
    let name = Validable::new("Ada".to_string()).with_validator(is_required);
    let password = Validable::new("abc".to_string()).with_validator(has_min_length(8));

    let form = Form::new()
        .field("email", &email)
        .field("name", &name)
        .field("password", &password);

    let result = form.result();
    assert!(result.is_invalid());
    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.first_invalid_field(), Some("email"));
    assert_eq!(result.errors()[1].message, "At least 8 characters long");

    email.set("ada@example.com".to_string());
    password.set("long enough".to_string());
    assert_eq!(form.result(), ValidationResult::Valid);
    assert!(form.is_valid());
}

#[test]
fn test_form_validity_is_reactive() {
    let email = Validable::new(String::new()).with_validator(is_required);
    let form = Form::new().field("email", &email);

    let submit_enabled = Computed::new({
        let form = form.clone();
        move || form.is_valid()
    });

    assert!(!submit_enabled.get());
    email.set("x".to_string());
    assert!(submit_enabled.get());
}
