//! Sign-up Form Example
//!
//! Builds a small sign-up form in a `formdom::Document`, attaches
//! validators to each field, binds error labels next to the inputs and
//! prints the document as the user "types".
//!
//! The login field is checked by a fake remote service that takes 50ms.

use std::fs::File;
use std::time::Duration;

use formdom::{Document, Element};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use validable::prelude::*;

// ============================================================================
// Fake remote service
// ============================================================================

async fn login_taken(request: ServiceRequest<String>) -> ServiceResult {
    tokio::time::sleep(Duration::from_millis(50)).await;
    if request.value == "admin" {
        Ok(Some("This login is already used".to_string()))
    } else {
        Ok(None)
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    validable::validation::update_error_messages(|messages| {
        messages.required = "Please fill in this field".to_string();
    });

    let login = Validable::new(String::new())
        .with_validator(is_required)
        .with_validator(validate_service(login_taken));
    let email = Validable::new(String::new())
        .with_validator(is_required)
        .with_validator(is_email);
    let password = Validable::new(String::new())
        .with_validator(has_min_length(8))
        .with_validator(has_max_length(64));
    let confirm = Validable::new(String::new()).with_validator(are_same(password.observable()));
    let age = Validable::new(None::<u32>).with_validator(is_in_range(18, 130));

    let doc = Document::new();
    doc.mount(
        doc.root(),
        Element::form().id("signup").children([
            Element::input().id("login"),
            Element::input().id("email"),
            Element::input().id("password"),
            Element::input().id("confirm"),
            Element::input().id("age"),
        ]),
    )?;

    let registry = BindingRegistry::new();
    let _registration = register_in(&registry);

    let fields: [(&str, &dyn Bindable); 5] = [
        ("login", &login),
        ("email", &email),
        ("password", &password),
        ("confirm", &confirm),
        ("age", &age),
    ];
    for (id, field) in fields {
        let input = doc.get_by_id(id).ok_or("missing input")?;
        registry.bind(VALIDATE, &doc, input, field)?;
    }

    let form = Form::new()
        .field("login", &login)
        .field("email", &email)
        .field("password", &password)
        .field("confirm", &confirm)
        .field("age", &age);

    login.set("admin".to_string());
    email.set("ada@example".to_string());
    password.set("hunter2".to_string());
    confirm.set("hunter3".to_string());
    age.set(Some(12));

    println!("validating: {}", form.is_validating());
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("{}\n", doc.to_html());
    for error in form.result().errors() {
        println!("{}: {}", error.field_name, error.message);
    }

    login.set("ada".to_string());
    email.set("ada@example.com".to_string());
    password.set("correct horse".to_string());
    confirm.set("correct horse".to_string());
    age.set(Some(36));
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("\n{}", doc.to_html());
    println!("valid: {}", form.is_valid());
    Ok(())
}
