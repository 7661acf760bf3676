//! Error types.
//!
//! Validation failures are not errors: they are reported as error messages
//! on the field. The types here cover configuration, remote checks and
//! binding setup.

use std::path::PathBuf;

use formdom::{DomError, NodeId};

/// Errors loading an error message table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The message file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The message table is not valid JSON or has the wrong shape.
    #[error("invalid message table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure of a remote validation service.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    /// Error message
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for ServiceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ServiceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Errors raised while installing a binding. These indicate a setup bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The element must be attached to a parent so the label can follow it.
    #[error("element {0} must be attached to the document before binding")]
    Detached(NodeId),

    /// No handler is registered under this name.
    #[error("no binding handler registered as '{0}'")]
    UnknownHandler(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
