//! Reactive field validation.
//!
//! A [`Validable`] wraps a value and aggregates the validators attached to
//! it into a single error message, a "validating" flag for checks still in
//! flight, and an overall validity flag.
//!
//! # Example
//!
//! ```ignore
//! use validable::validation::*;
//!
//! let email = Validable::new(String::new())
//!     .with_validator(is_required)
//!     .with_validator(is_email);
//! let password = Validable::new(String::new()).with_validator(has_min_length(8));
//! let confirm = Validable::new(String::new())
//!     .with_validator(are_same(password.observable()));
//!
//! email.set("ada@example.com".to_string());
//! assert!(email.is_valid());
//! ```

mod form;
mod messages;
mod result;
mod rules;
mod service;
mod validable;
mod validator;
mod value;

pub use form::{FieldStatus, Form};
pub use messages::{
    format_message, reset_error_messages, set_error_messages, update_error_messages,
    ErrorMessages, MessageKind,
};
pub use result::{FieldError, ValidationResult};
pub use rules::{
    are_same, custom, has_max_length, has_min_length, is_at_least, is_at_most, is_email,
    is_in_range, is_required,
};
pub use service::{validate_service, ServiceRequest, ServiceResult};
pub use validable::Validable;
pub use validator::Validator;
pub use value::FieldValue;
