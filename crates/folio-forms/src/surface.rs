//! The UI surface a form is displayed on.
//!
//! The orchestrator never touches a document directly. Everything it needs
//! from the page goes through [`FormSurface`], so a browser binding, a
//! terminal and a test fake are interchangeable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Kind of form-level status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// The submission went through.
    Success,
    /// Validation or submission failed.
    Error,
}

impl MessageKind {
    /// Returns the modifier class of the status region.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "form-status form-status--success",
            Self::Error => "form-status form-status--error",
        }
    }
}

/// A form-level status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    /// Message kind.
    pub kind: MessageKind,
    /// Message text.
    pub text: String,
}

impl StatusMessage {
    /// Creates a success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    /// Creates an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Capabilities the orchestrator needs from the page.
pub trait FormSurface {
    /// Reads the current value of a field.
    fn read_value(&self, field: &str) -> String;

    /// Shows (`Some`) or clears (`None`) a field's error.
    ///
    /// Showing an error also flags the field invalid for assistive
    /// technology; clearing removes the flag.
    fn write_error(&mut self, field: &str, error: Option<&str>);

    /// Moves focus to a field.
    fn focus(&mut self, field: &str);

    /// Disables the submit control and shows the busy indicator, or undoes it.
    fn set_busy(&mut self, busy: bool);

    /// Shows or clears the form-level status message.
    fn set_message(&mut self, message: Option<&StatusMessage>);

    /// Clears every field value.
    fn reset_all(&mut self);
}

/// An in-memory surface for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    /// Current field values.
    pub values: HashMap<String, String>,
    /// Displayed field errors.
    pub errors: HashMap<String, String>,
    /// Field that last received focus.
    pub focused: Option<String>,
    /// Whether the submit control is disabled.
    pub busy: bool,
    /// Displayed status message.
    pub message: Option<StatusMessage>,
    /// Number of `write_error` calls received.
    pub error_writes: usize,
}

impl MemorySurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, as if typed by the user.
    pub fn type_value(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Returns the error shown for a field.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field is flagged invalid.
    pub fn is_invalid(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }
}

impl FormSurface for MemorySurface {
    fn read_value(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn write_error(&mut self, field: &str, error: Option<&str>) {
        self.error_writes += 1;
        match error {
            Some(message) => {
                self.errors.insert(field.to_string(), message.to_string());
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    fn focus(&mut self, field: &str) {
        self.focused = Some(field.to_string());
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn set_message(&mut self, message: Option<&StatusMessage>) {
        self.message = message.cloned();
    }

    fn reset_all(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_surface_errors() {
        let mut surface = MemorySurface::new();
        surface.write_error("name", Some("Name is required"));
        assert!(surface.is_invalid("name"));
        assert_eq!(surface.error("name"), Some("Name is required"));

        surface.write_error("name", None);
        assert!(!surface.is_invalid("name"));
        assert_eq!(surface.error_writes, 2);
    }

    #[test]
    fn test_reset_all_clears_values_and_errors() {
        let mut surface = MemorySurface::new();
        surface.type_value("name", "Ada");
        surface.write_error("email", Some("Please enter a valid email address"));
        surface.reset_all();
        assert_eq!(surface.read_value("name"), "");
        assert!(!surface.is_invalid("email"));
    }

    #[test]
    fn test_message_kind_class() {
        assert_eq!(
            MessageKind::Success.css_class(),
            "form-status form-status--success"
        );
    }
}
