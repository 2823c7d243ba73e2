//! Orchestrator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Messages and timings used by the form orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// How long a status message stays visible, in milliseconds.
    pub dismiss_after_ms: u64,
    /// Shown when submit is pressed with invalid fields.
    pub invalid_form_message: String,
    /// Shown when the transport reports success.
    pub success_message: String,
    /// Shown when the transport reports failure.
    pub failure_message: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 5000,
            invalid_form_message: "Please correct the errors above".to_string(),
            success_message: "Thank you! Your message has been sent successfully.".to_string(),
            failure_message: "Sorry, there was an error sending your message. Please try again."
                .to_string(),
        }
    }
}

impl OrchestratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status message lifetime.
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }

    /// Sets the status message lifetime.
    #[must_use]
    pub fn dismiss_after_ms(mut self, ms: u64) -> Self {
        self.dismiss_after_ms = ms;
        self
    }

    /// Sets the invalid-form message.
    #[must_use]
    pub fn invalid_form_message(mut self, text: impl Into<String>) -> Self {
        self.invalid_form_message = text.into();
        self
    }

    /// Sets the success message.
    #[must_use]
    pub fn success_message(mut self, text: impl Into<String>) -> Self {
        self.success_message = text.into();
        self
    }

    /// Sets the failure message.
    #[must_use]
    pub fn failure_message(mut self, text: impl Into<String>) -> Self {
        self.failure_message = text.into();
        self
    }
}
