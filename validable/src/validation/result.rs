/// Information about a single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (from `.field()` call).
    pub field_name: String,
    /// Error message.
    pub message: String,
}

/// Result of validating one or more fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the name of the first invalid field (for focusing).
    pub fn first_invalid_field(&self) -> Option<&str> {
        self.first_error().map(|e| e.field_name.as_str())
    }
}
