//! Form lifecycle: field events, whole-form validation and submission.
//!
//! The orchestrator is driven from a single event loop. Field blur and
//! input revalidate one field; submit validates everything and, when the
//! form is clean, hands a snapshot of the values to the transport. While a
//! submission is in flight the submit control is disabled and further
//! submit actions are ignored.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::attempt::{AttemptId, AttemptOutcome, SubmissionAttempt};
use crate::clock::{Clock, SystemClock};
use crate::config::OrchestratorConfig;
use crate::error::{FormError, Result, SubmissionError, ValidationErrors};
use crate::field::{Field, FieldValues, FormSpec};
use crate::presenter::ErrorPresenter;
use crate::surface::{FormSurface, StatusMessage};
use crate::transport::{BoxFuture, SubmitResult, Transport};
use crate::validation::{self, ValidationResult};

/// Lifecycle phase of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for user input.
    #[default]
    Idle,
    /// Checking every field before a submission.
    Validating,
    /// Waiting on the transport.
    Submitting,
    /// The last submission succeeded; its message is still displayed.
    Succeeded,
    /// The last submit action failed; its message is still displayed.
    Failed,
}

/// A dispatched submission the caller must await and settle.
///
/// Dropping it without settling leaves the form busy; hand its id to
/// [`FormOrchestrator::abandon`] instead.
#[must_use = "an unsettled submission keeps the form busy"]
pub struct InFlight {
    id: AttemptId,
    future: BoxFuture<'static, SubmitResult>,
}

impl InFlight {
    /// Returns the attempt id to pass to [`FormOrchestrator::settle`].
    pub fn id(&self) -> AttemptId {
        self.id
    }

    /// Waits for the transport.
    pub async fn wait(self) -> (AttemptId, SubmitResult) {
        let result = self.future.await;
        (self.id, result)
    }
}

impl std::fmt::Debug for InFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlight")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// What a submit action did.
#[derive(Debug)]
#[must_use]
pub enum SubmitStart {
    /// A submission is already in flight.
    Ignored,
    /// At least one field is invalid; the transport was not called.
    Rejected(ValidationErrors),
    /// The transport was called.
    Dispatched(InFlight),
}

/// Final result of a submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    /// A submission was already in flight.
    Ignored,
    /// Validation failed before submission.
    Rejected(ValidationErrors),
    /// The transport reported success.
    Succeeded(AttemptId),
    /// The transport reported failure.
    Failed {
        /// Attempt id.
        id: AttemptId,
        /// Transport error.
        error: SubmissionError,
    },
}

/// Returns whether a key press submits the form from inside the message box.
pub fn is_submit_shortcut(key: &str, ctrl: bool) -> bool {
    ctrl && key == "Enter"
}

/// Coordinates validation, presentation and submission of one form.
pub struct FormOrchestrator<S, T, C = SystemClock> {
    fields: Vec<Field>,
    phase: Phase,
    message: Option<StatusMessage>,
    dismiss_at: Option<Instant>,
    attempt: Option<SubmissionAttempt>,
    next_attempt: u64,
    presenter: ErrorPresenter,
    config: OrchestratorConfig,
    surface: S,
    transport: T,
    clock: C,
}

impl<S: FormSurface, T: Transport> FormOrchestrator<S, T> {
    /// Creates an orchestrator using the system clock.
    pub fn new(spec: &FormSpec, surface: S, transport: T) -> Result<Self> {
        Self::with_clock(spec, surface, transport, SystemClock)
    }
}

impl<S: FormSurface, T: Transport, C: Clock> FormOrchestrator<S, T, C> {
    /// Creates an orchestrator with an explicit clock.
    pub fn with_clock(spec: &FormSpec, surface: S, transport: T, clock: C) -> Result<Self> {
        Ok(Self {
            fields: spec.build()?,
            phase: Phase::Idle,
            message: None,
            dismiss_at: None,
            attempt: None,
            next_attempt: 1,
            presenter: ErrorPresenter::new(),
            config: OrchestratorConfig::default(),
            surface,
            transport,
            clock,
        })
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the fields in document order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the displayed status message.
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Returns the most recent submission attempt.
    pub fn last_attempt(&self) -> Option<&SubmissionAttempt> {
        self.attempt.as_ref()
    }

    /// Returns the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably, e.g. to feed user input.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns when the status message will be dismissed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dismiss_at
    }

    /// Handles a field losing focus.
    pub fn on_blur(&mut self, name: &str) -> Result<ValidationResult> {
        self.revalidate(name)
    }

    /// Handles a field's value changing.
    pub fn on_input(&mut self, name: &str) -> Result<ValidationResult> {
        self.revalidate(name)
    }

    /// Handles a submit action.
    ///
    /// When the form is valid, returns the in-flight submission; the caller
    /// awaits it and reports back through [`settle`](Self::settle).
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.phase == Phase::Submitting {
            debug!("submit ignored: a submission is already in flight");
            return SubmitStart::Ignored;
        }

        self.transition(Phase::Validating);
        self.clear_message();

        let errors = self.validate_all();
        if let Some(first) = errors.first() {
            info!(invalid = errors.len(), "form has invalid fields");
            self.transition(Phase::Failed);
            let first = first.field.clone();
            self.surface.focus(&first);
            self.show_message(StatusMessage::error(self.config.invalid_form_message.clone()));
            self.transition(Phase::Idle);
            return SubmitStart::Rejected(errors);
        }

        let id = AttemptId(self.next_attempt);
        self.next_attempt += 1;
        let values = FieldValues::from_fields(&self.fields);

        self.transition(Phase::Submitting);
        self.surface.set_busy(true);
        self.attempt = Some(SubmissionAttempt::new(id, values.clone()));
        info!(attempt = %id, "dispatching submission");

        SubmitStart::Dispatched(InFlight {
            id,
            future: self.transport.submit(values),
        })
    }

    /// Applies the transport's verdict for an attempt.
    ///
    /// Settlements for an attempt other than the one in flight are
    /// rejected and leave the form untouched.
    pub fn settle(
        &mut self,
        id: AttemptId,
        result: SubmitResult,
    ) -> std::result::Result<SubmitReport, SubmissionError> {
        if !self.is_pending(id) {
            warn!(attempt = %id, "ignoring settlement of stale attempt");
            return Err(SubmissionError::Stale(id));
        }

        self.surface.set_busy(false);

        match result {
            Ok(()) => {
                self.set_outcome(AttemptOutcome::Succeeded);
                self.transition(Phase::Succeeded);
                self.reset_fields();
                self.show_message(StatusMessage::success(self.config.success_message.clone()));
                info!(attempt = %id, "submission succeeded");
                Ok(SubmitReport::Succeeded(id))
            }
            Err(error) => {
                self.set_outcome(AttemptOutcome::Failed(error.to_string()));
                self.transition(Phase::Failed);
                self.show_message(StatusMessage::error(self.config.failure_message.clone()));
                warn!(attempt = %id, %error, "submission failed");
                Ok(SubmitReport::Failed { id, error })
            }
        }
    }

    /// Handles a submit action and waits for the transport to settle.
    pub async fn submit(&mut self) -> SubmitReport {
        match self.begin_submit() {
            SubmitStart::Ignored => SubmitReport::Ignored,
            SubmitStart::Rejected(errors) => SubmitReport::Rejected(errors),
            SubmitStart::Dispatched(in_flight) => {
                // Cancelling this future mid-wait abandons the attempt.
                let mut guard = AbandonOnDrop {
                    form: self,
                    pending: Some(in_flight.id()),
                };
                let (id, result) = in_flight.wait().await;
                guard.pending = None;
                guard.form.settle(id, result).unwrap_or_else(|err| {
                    warn!(%err, "submission settled out of order");
                    SubmitReport::Ignored
                })
            }
        }
    }

    /// Gives up on an in-flight attempt whose result will never arrive.
    ///
    /// The submit control is re-enabled and the attempt is reported as
    /// failed, exactly as a transport failure would be. A later settlement
    /// of the same attempt is refused as stale.
    pub fn abandon(&mut self, id: AttemptId) -> std::result::Result<(), SubmissionError> {
        if !self.is_pending(id) {
            return Err(SubmissionError::Stale(id));
        }

        warn!(attempt = %id, "submission abandoned");
        self.surface.set_busy(false);
        self.set_outcome(AttemptOutcome::Failed("submission abandoned".to_string()));
        self.transition(Phase::Failed);
        self.show_message(StatusMessage::error(self.config.failure_message.clone()));
        Ok(())
    }

    /// Fires the dismiss timer if it has expired. Returns whether it fired.
    pub fn tick(&mut self) -> bool {
        let Some(deadline) = self.dismiss_at else {
            return false;
        };
        if self.clock.now() < deadline {
            return false;
        }

        self.clear_message();
        if matches!(self.phase, Phase::Succeeded | Phase::Failed) {
            self.transition(Phase::Idle);
        }
        true
    }

    fn is_pending(&self, id: AttemptId) -> bool {
        self.phase == Phase::Submitting
            && self
                .attempt
                .as_ref()
                .is_some_and(|a| a.id == id && a.is_pending())
    }

    fn revalidate(&mut self, name: &str) -> Result<ValidationResult> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        field.value = self.surface.read_value(name);
        let result = validation::validate(field);
        self.presenter.present(field, result.clone(), &mut self.surface);
        Ok(result)
    }

    fn validate_all(&mut self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in &mut self.fields {
            field.value = self.surface.read_value(&field.name);
            let result = validation::validate(field);
            if let Some(reason) = result.reason() {
                errors.add(&field.name, reason);
            }
            self.presenter.present(field, result, &mut self.surface);
        }
        errors
    }

    fn reset_fields(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.validity = ValidationResult::Valid;
        }
        self.surface.reset_all();
    }

    fn set_outcome(&mut self, outcome: AttemptOutcome) {
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.outcome = outcome;
        }
    }

    fn show_message(&mut self, message: StatusMessage) {
        self.surface.set_message(Some(&message));
        self.message = Some(message);
        self.dismiss_at = Some(self.clock.now() + self.config.dismiss_after());
    }

    fn clear_message(&mut self) {
        self.dismiss_at = None;
        if self.message.take().is_some() {
            self.surface.set_message(None);
        }
    }

    fn transition(&mut self, to: Phase) {
        if self.phase != to {
            debug!(from = ?self.phase, to = ?to, "form phase");
            self.phase = to;
        }
    }
}

/// Abandons the pending attempt if `submit` is dropped before it settles.
struct AbandonOnDrop<'a, S: FormSurface, T: Transport, C: Clock> {
    form: &'a mut FormOrchestrator<S, T, C>,
    pending: Option<AttemptId>,
}

impl<S: FormSurface, T: Transport, C: Clock> Drop for AbandonOnDrop<'_, S, T, C> {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.form.abandon(id);
        }
    }
}

impl<S, T, C> std::fmt::Debug for FormOrchestrator<S, T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOrchestrator")
            .field("fields", &self.fields)
            .field("phase", &self.phase)
            .field("message", &self.message)
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;
    use crate::surface::{MemorySurface, MessageKind};
    use crate::transport::FnTransport;

    fn ok_transport() -> FnTransport {
        FnTransport::new(|_values: FieldValues| async { Ok(()) })
    }

    fn orchestrator() -> (
        FormOrchestrator<MemorySurface, FnTransport, ManualClock>,
        ManualClock,
    ) {
        let clock = ManualClock::new();
        let form = FormOrchestrator::with_clock(
            &FormSpec::contact(),
            MemorySurface::new(),
            ok_transport(),
            clock.clone(),
        )
        .unwrap();
        (form, clock)
    }

    #[test]
    fn test_blur_validates_only_that_field() {
        let (mut form, _) = orchestrator();
        let result = form.on_blur("name").unwrap();
        assert_eq!(result, ValidationResult::Invalid("Name is required".into()));
        assert!(form.surface().is_invalid("name"));
        assert!(!form.surface().is_invalid("email"));
        assert_eq!(form.phase(), Phase::Idle);
    }

    #[test]
    fn test_input_clears_stale_error() {
        let (mut form, _) = orchestrator();
        form.on_blur("email").unwrap();
        assert!(form.surface().is_invalid("email"));

        form.surface_mut().type_value("email", "ada@example.com");
        assert!(form.on_input("email").unwrap().is_valid());
        assert!(!form.surface().is_invalid("email"));
        assert!(!form.field("email").unwrap().is_invalid());
    }

    #[test]
    fn test_unknown_field() {
        let (mut form, _) = orchestrator();
        assert!(matches!(
            form.on_blur("phone"),
            Err(FormError::UnknownField(name)) if name == "phone"
        ));
    }

    #[test]
    fn test_begin_submit_ignored_while_submitting() {
        let (mut form, _) = orchestrator();
        form.surface_mut().type_value("name", "Ada");
        form.surface_mut().type_value("email", "ada@example.com");
        form.surface_mut().type_value("message", "Hello, this is long enough.");

        let first = form.begin_submit();
        assert!(matches!(first, SubmitStart::Dispatched(_)));
        assert_eq!(form.phase(), Phase::Submitting);
        assert!(form.surface().busy);
        assert!(matches!(form.begin_submit(), SubmitStart::Ignored));
    }

    #[test]
    fn test_settle_rejects_unknown_attempt() {
        let (mut form, _) = orchestrator();
        assert_eq!(
            form.settle(AttemptId(7), Ok(())),
            Err(SubmissionError::Stale(AttemptId(7)))
        );
        assert_eq!(form.phase(), Phase::Idle);
    }

    #[test]
    fn test_settle_failure_keeps_values() {
        let (mut form, clock) = orchestrator();
        form.surface_mut().type_value("name", "Ada");
        form.surface_mut().type_value("email", "ada@example.com");
        form.surface_mut().type_value("message", "Hello, this is long enough.");

        let SubmitStart::Dispatched(in_flight) = form.begin_submit() else {
            panic!("expected dispatch");
        };
        let report = form
            .settle(
                in_flight.id(),
                Err(SubmissionError::Transport("offline".into())),
            )
            .unwrap();
        assert!(matches!(report, SubmitReport::Failed { .. }));
        assert_eq!(form.phase(), Phase::Failed);
        assert!(!form.surface().busy);
        assert_eq!(form.surface().read_value("name"), "Ada");
        assert_eq!(form.message().map(|m| m.kind), Some(MessageKind::Error));
        assert_eq!(
            form.last_attempt().map(|a| a.outcome.clone()),
            Some(AttemptOutcome::Failed("transport failed: offline".into()))
        );

        clock.advance(Duration::from_millis(5000));
        assert!(form.tick());
        assert_eq!(form.phase(), Phase::Idle);
        assert!(form.surface().message.is_none());
    }

    #[test]
    fn test_tick_before_deadline_does_nothing() {
        let (mut form, clock) = orchestrator();
        assert!(!form.tick());

        assert!(matches!(form.begin_submit(), SubmitStart::Rejected(_)));
        clock.advance(Duration::from_millis(4999));
        assert!(!form.tick());
        assert!(form.message().is_some());
        clock.advance(Duration::from_millis(1));
        assert!(form.tick());
        assert!(form.message().is_none());
    }

    #[test]
    fn test_new_message_replaces_dismiss_timer() {
        let (mut form, clock) = orchestrator();
        assert!(matches!(form.begin_submit(), SubmitStart::Rejected(_)));
        let first = form.next_deadline().unwrap();

        clock.advance(Duration::from_millis(3000));
        assert!(matches!(form.begin_submit(), SubmitStart::Rejected(_)));
        let second = form.next_deadline().unwrap();
        assert_eq!(second - first, Duration::from_millis(3000));

        clock.advance(Duration::from_millis(2500));
        assert!(!form.tick());
        assert!(form.message().is_some());
    }

    fn fill_valid(form: &mut FormOrchestrator<MemorySurface, FnTransport, ManualClock>) {
        let surface = form.surface_mut();
        surface.type_value("name", "Ada");
        surface.type_value("email", "ada@example.com");
        surface.type_value("message", "Hello, this is long enough.");
    }

    #[test]
    fn test_dropped_in_flight_can_be_abandoned() {
        let (mut form, clock) = orchestrator();
        fill_valid(&mut form);

        let SubmitStart::Dispatched(in_flight) = form.begin_submit() else {
            panic!("expected dispatch");
        };
        let id = in_flight.id();
        drop(in_flight);
        assert_eq!(form.phase(), Phase::Submitting);
        assert!(form.surface().busy);

        form.abandon(id).unwrap();
        assert!(!form.surface().busy);
        assert_eq!(form.phase(), Phase::Failed);
        assert_eq!(form.surface().read_value("name"), "Ada");
        assert_eq!(
            form.last_attempt().map(|a| a.outcome.clone()),
            Some(AttemptOutcome::Failed("submission abandoned".into()))
        );

        // The abandoned attempt can no longer settle or be abandoned twice.
        assert_eq!(
            form.settle(id, Ok(())),
            Err(SubmissionError::Stale(id))
        );
        assert_eq!(form.abandon(id), Err(SubmissionError::Stale(id)));

        clock.advance(Duration::from_millis(5000));
        assert!(form.tick());
        assert_eq!(form.phase(), Phase::Idle);
        assert!(matches!(form.begin_submit(), SubmitStart::Dispatched(_)));
    }

    #[test]
    fn test_abandon_requires_pending_attempt() {
        let (mut form, _) = orchestrator();
        assert_eq!(
            form.abandon(AttemptId(1)),
            Err(SubmissionError::Stale(AttemptId(1)))
        );
        assert_eq!(form.phase(), Phase::Idle);
    }

    #[test]
    fn test_submit_shortcut() {
        assert!(is_submit_shortcut("Enter", true));
        assert!(!is_submit_shortcut("Enter", false));
        assert!(!is_submit_shortcut("a", true));
    }
}
