//! Error types for the maestro workspace.

use thiserror::Error;

/// A shared error type for the entire maestro workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum MaestroError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Durable store error (file system operations)
    #[error("Durable store error: {0}")]
    Store(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML"
        message: String,
    },

    /// Reply generation error
    #[error("Reply generation failed: {0}")]
    Generator(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MaestroError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates a Generator error
    pub fn generator(message: impl Into<String>) -> Self {
        Self::Generator(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Generator error
    pub fn is_generator(&self) -> bool {
        matches!(self, Self::Generator(_))
    }

    /// Check if this error means the durable store could not be read or
    /// written.
    ///
    /// Returns true for:
    /// - `Store` errors (I/O level failures)
    /// - `Serialization` errors (a corrupt or unreadable blob)
    ///
    /// Callers that degrade to an in-memory store key off this predicate
    /// rather than matching individual variants.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Serialization { .. })
    }
}

impl From<std::io::Error> for MaestroError {
    fn from(err: std::io::Error) -> Self {
        Self::Store(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for MaestroError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MaestroError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MaestroError>`.
pub type Result<T> = std::result::Result<T, MaestroError>;
