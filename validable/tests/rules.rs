use validable::validation::{
    are_same, custom, has_max_length, has_min_length, is_at_least, is_at_most, is_email,
    is_in_range, is_required, Validable,
};

fn text(value: &str) -> Validable<String> {
    Validable::new(value.to_string())
}

// ============================================================================
// is_email
// ============================================================================

#[test]
fn test_email_accepts_simple_address() {
    let field = text("a@b.co").with_validator(is_email);
    assert_eq!(field.error_message(), None);
}

#[test]
fn test_email_rejects_embedded_space() {
    let field = text("a b@c.com").with_validator(is_email);
    assert_eq!(field.error_message().as_deref(), Some("Wrong e-mail format"));
}

#[test]
fn test_email_rejects_missing_at_and_dot() {
    let field = text("abc").with_validator(is_email);
    assert!(field.error_message().is_some());

    field.set("abc@example".to_string());
    assert!(field.error_message().is_some());

    field.set("abc@example.org".to_string());
    assert!(field.error_message().is_none());
}

#[test]
fn test_email_on_missing_value_is_an_error() {
    let field = Validable::new(None::<String>).with_validator(is_email);
    assert!(field.error_message().is_some());
}

// ============================================================================
// is_required
// ============================================================================

#[test]
fn test_required_rejects_empty_and_missing() {
    let empty = text("").with_validator(is_required);
    assert_eq!(empty.error_message().as_deref(), Some("Required field"));

    let missing = Validable::new(None::<String>).with_validator(is_required);
    assert_eq!(missing.error_message().as_deref(), Some("Required field"));
}

#[test]
fn test_required_accepts_zero_and_text() {
    let zero = Validable::new(0i32).with_validator(is_required);
    assert_eq!(zero.error_message(), None);

    let x = text("x").with_validator(is_required);
    assert_eq!(x.error_message(), None);
}

// ============================================================================
// Lengths
// ============================================================================

#[test]
fn test_min_length() {
    let field = text("ab").with_validator(has_min_length(3));
    assert_eq!(
        field.error_message().as_deref(),
        Some("At least 3 characters long")
    );

    field.set("abc".to_string());
    assert_eq!(field.error_message(), None);

    field.set(String::new());
    assert!(field.error_message().is_some());
}

#[test]
fn test_max_length() {
    let field = text("abcd").with_validator(has_max_length(3));
    assert_eq!(
        field.error_message().as_deref(),
        Some("At most 3 characters long")
    );

    field.set("abc".to_string());
    assert_eq!(field.error_message(), None);

    field.set(String::new());
    assert_eq!(field.error_message(), None);
}

#[test]
fn test_lengths_count_characters_not_bytes() {
    let field = text("éé").with_validator(has_max_length(2));
    assert_eq!(field.error_message(), None);
}

// ============================================================================
// Numeric bounds
// ============================================================================

#[test]
fn test_in_range() {
    let field = Validable::new(0i32).with_validator(is_in_range(1, 10));
    assert_eq!(field.error_message().as_deref(), Some("At least 1"));

    field.set(11);
    assert_eq!(field.error_message().as_deref(), Some("At most 10"));

    field.set(5);
    assert_eq!(field.error_message(), None);
}

#[test]
fn test_in_range_missing_is_below_minimum() {
    let field = Validable::new(None::<f64>).with_validator(is_in_range(1.5, 2.5));
    assert_eq!(field.error_message().as_deref(), Some("At least 1.5"));
}

#[test]
fn test_in_range_parses_text() {
    let field = text("7").with_validator(is_in_range(1, 10));
    assert_eq!(field.error_message(), None);

    field.set("70".to_string());
    assert_eq!(field.error_message().as_deref(), Some("At most 10"));
}

#[test]
fn test_at_least_treats_zero_as_missing() {
    let field = Validable::new(0i32).with_validator(is_at_least(-5));
    assert_eq!(field.error_message().as_deref(), Some("At least -5"));

    field.set(-1);
    assert_eq!(field.error_message(), None);
}

#[test]
fn test_at_most_is_strict() {
    let field = Validable::new(None::<i32>).with_validator(is_at_most(3));
    assert_eq!(field.error_message(), None);

    field.set(Some(0));
    assert_eq!(field.error_message(), None);

    field.set(Some(4));
    assert_eq!(field.error_message().as_deref(), Some("At most 3"));
}

// ============================================================================
// are_same
// ============================================================================

#[test]
fn test_are_same_follows_both_sides() {
    let password = text("x");
    let confirm = text("x").with_validator(are_same(password.observable()));
    assert_eq!(confirm.error_message(), None);

    password.set("y".to_string());
    assert_eq!(
        confirm.error_message().as_deref(),
        Some("The two fields must be identical")
    );

    confirm.set("y".to_string());
    assert_eq!(confirm.error_message(), None);
}

// ============================================================================
// Custom rules and purity
// ============================================================================

#[test]
fn test_custom_rule() {
    let field = Validable::new(200u32)
        .with_validator(custom(|v: &u32| (*v > 150).then(|| "Really?".to_string())));
    assert_eq!(field.error_message().as_deref(), Some("Really?"));

    field.set(30);
    assert!(field.is_valid());
}

#[test]
fn test_repeated_reads_are_stable() {
    let field = text("ab")
        .with_validator(has_min_length(3))
        .with_validator(is_email);

    let first = field.error_message();
    for _ in 0..5 {
        assert_eq!(field.error_message(), first);
        assert_eq!(field.validators()[1].error_message(), field.validators()[1].error_message());
    }
}
