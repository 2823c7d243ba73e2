//! # folio-forms
//!
//! Contact form validation and submission for the portfolio site.
//!
//! This crate provides:
//! - Field declarations and the canonical contact form layout
//! - Pure field validation (required, email, minimum length)
//! - An error presenter that keeps each field's displayed error in sync
//!   with its last verdict
//! - A form orchestrator driving the submit lifecycle against a pluggable
//!   transport
//! - Markup for the form itself
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_forms::{FormOrchestrator, FormSpec, MemorySurface, Phase, SimulatedTransport};
//!
//! # tokio_test::block_on(async {
//! let mut form = FormOrchestrator::new(
//!     &FormSpec::contact(),
//!     MemorySurface::new(),
//!     SimulatedTransport::new().latency(std::time::Duration::ZERO),
//! )
//! .unwrap();
//!
//! form.surface_mut().type_value("name", "Ada");
//! form.surface_mut().type_value("email", "ada@example.com");
//! form.surface_mut().type_value("message", "Hello, this is long enough.");
//!
//! form.submit().await;
//! assert_eq!(form.phase(), Phase::Succeeded);
//! # });
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use folio_forms::validation::{validate_value, ValidationResult};
//! use folio_forms::{FieldConstraints, FieldKind};
//!
//! let constraints = FieldConstraints {
//!     required: true,
//!     kind: FieldKind::Email,
//!     min_length: None,
//! };
//! assert_eq!(
//!     validate_value("Email", "not-an-email", &constraints),
//!     ValidationResult::Invalid("Please enter a valid email address".into()),
//! );
//! ```

mod attempt;
mod clock;
mod config;
mod control;
mod error;
mod field;
mod orchestrator;
mod presenter;
pub mod render;
mod surface;
pub mod transport;
pub mod validation;

pub use attempt::{AttemptId, AttemptOutcome, SubmissionAttempt};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OrchestratorConfig;
pub use error::{FormError, Result, SubmissionError, ValidationError, ValidationErrors};
pub use field::{error_id, Field, FieldConstraints, FieldKind, FieldSpec, FieldValues, FormSpec};
pub use orchestrator::{
    is_submit_shortcut, FormOrchestrator, InFlight, Phase, SubmitReport, SubmitStart,
};
pub use presenter::ErrorPresenter;
pub use render::{render_contact_form, render_field};
pub use surface::{FormSurface, MemorySurface, MessageKind, StatusMessage};
pub use transport::{FnTransport, SimulatedTransport, Transport};
pub use validation::{validate, ValidationResult};
