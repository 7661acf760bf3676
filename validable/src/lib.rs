pub mod binding;
pub mod error;
pub mod reactive;
pub mod validation;

pub use binding::{register, register_in, BindingRegistry, Registration};
pub use error::{BindError, ConfigError, ServiceError};
pub use reactive::{Computed, Observable, ReadSignal, Subscription};
pub use validation::{Validable, Validator};

pub mod prelude {
    pub use crate::binding::{
        register, register_in, Bindable, BindingHandler, BindingRegistry, LabelContent,
        Registration, ValidateHandler, VALIDATE,
    };
    pub use crate::error::{BindError, ConfigError, ServiceError};
    pub use crate::reactive::{untracked, Computed, Observable, ReadSignal, Subscription};
    pub use crate::validation::{
        are_same, custom, has_max_length, has_min_length, is_at_least, is_at_most, is_email,
        is_in_range, is_required, validate_service, ErrorMessages, FieldError, FieldStatus,
        FieldValue, Form, MessageKind, ServiceRequest, ServiceResult, Validable,
        ValidationResult, Validator,
    };
}
