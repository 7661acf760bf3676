//! Summaries over several validable fields.

use std::sync::Arc;

use super::result::{FieldError, ValidationResult};
use super::Validable;

/// Read access to the aggregated state of a field.
pub trait FieldStatus: Send + Sync {
    /// First error of the field, if any.
    fn error_message(&self) -> Option<String>;

    /// Whether a check on the field is still running.
    fn is_validating(&self) -> bool;
}

impl<T: Clone + Send + Sync + 'static> FieldStatus for Validable<T> {
    fn error_message(&self) -> Option<String> {
        Validable::error_message(self)
    }

    fn is_validating(&self) -> bool {
        self.validating()
    }
}

/// A named set of fields checked together, typically before submission.
///
/// Reads are tracked, so a `Computed` over [`Form::is_valid`] follows every
/// field.
///
/// # Example
///
/// ```ignore
/// let form = Form::new()
///     .field("email", &self.email)
///     .field("password", &self.password);
///
/// match form.result() {
///     ValidationResult::Valid => submit(),
///     ValidationResult::Invalid(errors) => show(errors),
/// }
/// ```
#[derive(Clone, Default)]
pub struct Form {
    fields: Vec<(String, Arc<dyn FieldStatus>)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Fields are reported in the order they were added.
    pub fn field<F>(mut self, name: impl Into<String>, field: &F) -> Self
    where
        F: FieldStatus + Clone + 'static,
    {
        self.fields.push((name.into(), Arc::new(field.clone())));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Collect the current error of every failing field.
    pub fn result(&self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|(name, field)| {
                field.error_message().map(|message| FieldError {
                    field_name: name.clone(),
                    message,
                })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    /// No field has an error and no check is running.
    pub fn is_valid(&self) -> bool {
        !self.is_validating() && self.result().is_valid()
    }

    pub fn is_validating(&self) -> bool {
        self.fields.iter().any(|(_, field)| field.is_validating())
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(name, _)| name))
            .finish()
    }
}
