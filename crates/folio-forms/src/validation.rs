//! Field validators.
//!
//! A field is checked against its declared constraints in a fixed priority
//! order: required, email format, minimum length. The first failing rule
//! wins, so a field never reports more than one reason.

use std::sync::LazyLock;

use regex::Regex;

use crate::field::{Field, FieldConstraints, FieldKind};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The field satisfies every constraint.
    #[default]
    Valid,
    /// The field violates a constraint; carries the user-facing reason.
    Invalid(String),
}

impl ValidationResult {
    /// Returns whether the result is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the reason if invalid.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

impl From<Result<(), String>> for ValidationResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(reason) => Self::Invalid(reason),
        }
    }
}

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a RequiredValidator whose message names the field.
    pub fn new(label: &str) -> Self {
        Self {
            message: format!("{label} is required"),
        }
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a minimum length on the trimmed value.
///
/// Length is counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min_length: usize,
    message: String,
}

impl MinLengthValidator {
    /// Creates a MinLengthValidator whose message names the field.
    pub fn new(label: &str, min_length: usize) -> Self {
        Self {
            min_length,
            message: format!("{label} must be at least {min_length} characters"),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().chars().count() < self.min_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for email addresses.
///
/// Accepts `local@domain.tld` where no part contains whitespace or `@`.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    /// Creates a new EmailValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "Please enter a valid email address".to_string(),
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if EMAIL_PATTERN.is_match(value.trim()) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Builds the validator chain for a set of constraints, in priority order.
pub fn validators_for(label: &str, constraints: &FieldConstraints) -> Vec<Box<dyn Validator>> {
    let mut chain: Vec<Box<dyn Validator>> = Vec::new();
    if constraints.required {
        chain.push(Box::new(RequiredValidator::new(label)));
    }
    if constraints.kind == FieldKind::Email {
        chain.push(Box::new(EmailValidator::new()));
    }
    if let Some(min) = constraints.min_length {
        chain.push(Box::new(MinLengthValidator::new(label, min)));
    }
    chain
}

/// Validates a value against constraints.
///
/// An optional field left blank is valid; the remaining rules only apply
/// to values that were actually entered.
pub fn validate_value(
    label: &str,
    value: &str,
    constraints: &FieldConstraints,
) -> ValidationResult {
    if !constraints.required && value.trim().is_empty() {
        return ValidationResult::Valid;
    }

    validators_for(label, constraints)
        .iter()
        .try_for_each(|validator| validator.validate(value))
        .into()
}

/// Validates a field's current value.
pub fn validate(field: &Field) -> ValidationResult {
    validate_value(&field.label, &field.value, &field.constraints)
}
