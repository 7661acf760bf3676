//! Rendering validation errors into a [`formdom::Document`].
//!
//! The `validate` binding inserts a hidden `<label class="error">` right
//! after an input and keeps it in sync with the bound value's error message.
//!
//! # Example
//!
//! ```ignore
//! let registry = BindingRegistry::new();
//! let _registration = register_in(&registry);
//!
//! let input = doc.get_by_id("email").unwrap();
//! registry.bind(VALIDATE, &doc, input, &email)?;
//! ```

mod handler;
mod registry;

pub use handler::{Bindable, BindingHandler, LabelContent, ValidateHandler};
pub use registry::{register, register_in, BindingRegistry, Registration, VALIDATE};
