//! Error message templates.
//!
//! Templates use a single `{0}` placeholder for the bound being checked.
//! The process-wide table can be replaced by the host application; a
//! validator takes a snapshot of the table when it is constructed, so a
//! change only affects validators created afterwards.

use std::path::Path;
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

static MESSAGES: LazyLock<RwLock<ErrorMessages>> =
    LazyLock::new(|| RwLock::new(ErrorMessages::default()));

/// Which template a validator reports with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Email,
    Required,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    AreSame,
}

/// The table of message templates.
///
/// Deserializes from a (possibly partial) JSON object with camelCase keys:
///
/// ```json
/// { "required": "Please fill in this field", "minLength": "{0}+ characters" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorMessages {
    pub email: String,
    pub required: String,
    pub min_length: String,
    pub max_length: String,
    pub min_value: String,
    pub max_value: String,
    pub are_same: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            email: "Wrong e-mail format".to_string(),
            required: "Required field".to_string(),
            min_length: "At least {0} characters long".to_string(),
            max_length: "At most {0} characters long".to_string(),
            min_value: "At least {0}".to_string(),
            max_value: "At most {0}".to_string(),
            are_same: "The two fields must be identical".to_string(),
        }
    }
}

impl ErrorMessages {
    /// Snapshot of the process-wide table.
    pub fn current() -> Self {
        MESSAGES
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Parse a JSON object. Keys that are absent keep their default.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn template(&self, kind: MessageKind) -> &str {
        match kind {
            MessageKind::Email => &self.email,
            MessageKind::Required => &self.required,
            MessageKind::MinLength => &self.min_length,
            MessageKind::MaxLength => &self.max_length,
            MessageKind::MinValue => &self.min_value,
            MessageKind::MaxValue => &self.max_value,
            MessageKind::AreSame => &self.are_same,
        }
    }

    /// Render the template for `kind` with `arg` in place of `{0}`.
    pub fn format(&self, kind: MessageKind, arg: impl std::fmt::Display) -> String {
        format_message(self.template(kind), arg)
    }
}

/// Replace the first `{0}` in `template` with `arg`.
pub fn format_message(template: &str, arg: impl std::fmt::Display) -> String {
    template.replacen("{0}", &arg.to_string(), 1)
}

/// Replace the process-wide table. Last write wins.
pub fn set_error_messages(messages: ErrorMessages) {
    let mut guard = MESSAGES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = messages;
    log::debug!("[validation] error message table replaced");
}

/// Edit the process-wide table in place.
pub fn update_error_messages<F>(f: F)
where
    F: FnOnce(&mut ErrorMessages),
{
    let mut guard = MESSAGES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard);
}

/// Restore the built-in templates.
pub fn reset_error_messages() {
    set_error_messages(ErrorMessages::default());
}
