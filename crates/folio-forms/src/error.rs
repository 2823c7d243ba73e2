//! Error types for forms.

use thiserror::Error;

use crate::attempt::AttemptId;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// An event referenced a field the form does not contain.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Two fields were declared with the same name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A form was built without any constrained field.
    #[error("form has no fields")]
    EmptyForm,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by a submission transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The transport could not deliver the data.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The receiving side refused the data.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// A settlement arrived for an attempt that is no longer in flight.
    #[error("stale submission attempt {0}")]
    Stale(AttemptId),
}

/// A single field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Field name.
    pub field: String,
    /// User-facing reason.
    pub message: String,
}

/// Validation failures of a whole form, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// One entry per invalid field.
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Returns the first invalid field in document order.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in &self.errors {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
