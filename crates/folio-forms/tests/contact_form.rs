//! End-to-end tests of the contact form lifecycle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio_forms::transport::{BoxFuture, SubmitResult};
use folio_forms::{
    AttemptOutcome, FieldValues, FormOrchestrator, FormSpec, FormSurface, MemorySurface,
    MessageKind, Phase, SubmissionError, SubmitReport, SubmitStart, Transport, ValidationResult,
};

struct RecordingTransport {
    calls: Mutex<Vec<FieldValues>>,
    outcome: SubmitResult,
    latency: Duration,
}

impl RecordingTransport {
    fn new(outcome: SubmitResult) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            outcome,
            latency: Duration::from_millis(1500),
        })
    }

    fn calls(&self) -> Vec<FieldValues> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn submit(&self, values: FieldValues) -> BoxFuture<'static, SubmitResult> {
        self.calls.lock().unwrap().push(values);
        let outcome = self.outcome.clone();
        let latency = self.latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            outcome
        })
    }
}

type Form = FormOrchestrator<MemorySurface, Arc<RecordingTransport>>;

fn contact_form(transport: &Arc<RecordingTransport>) -> Form {
    FormOrchestrator::new(&FormSpec::contact(), MemorySurface::new(), Arc::clone(transport))
        .unwrap()
}

fn fill(form: &mut Form, name: &str, email: &str, message: &str) {
    let surface = form.surface_mut();
    surface.type_value("name", name);
    surface.type_value("email", email);
    surface.type_value("message", message);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_form_never_reaches_transport() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);
    fill(&mut form, "", "bad", "short");

    let report = form.submit().await;

    let SubmitReport::Rejected(errors) = report else {
        panic!("expected rejection, got {report:?}");
    };
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("name"), Some("Name is required"));
    assert_eq!(
        errors.get("email"),
        Some("Please enter a valid email address")
    );
    assert_eq!(
        errors.get("message"),
        Some("Message must be at least 10 characters")
    );

    assert!(transport.calls().is_empty());
    assert_eq!(form.phase(), Phase::Idle);
    assert_eq!(form.surface().focused.as_deref(), Some("name"));
    assert_eq!(
        form.message().map(|m| (m.kind, m.text.as_str())),
        Some((MessageKind::Error, "Please correct the errors above"))
    );
    assert_eq!(form.surface().error("name"), Some("Name is required"));
    assert!(!form.surface().busy);
}

#[tokio::test(start_paused = true)]
async fn test_focus_targets_first_invalid_field_in_document_order() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);
    fill(&mut form, "Ada", "bad", "short");

    form.submit().await;
    assert_eq!(form.surface().focused.as_deref(), Some("email"));
}

#[tokio::test(start_paused = true)]
async fn test_valid_submission_lifecycle() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);
    fill(&mut form, "Ada", "ada@example.com", "Hello, this is long enough.");

    let report = form.submit().await;
    assert!(matches!(report, SubmitReport::Succeeded(_)));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let sent: Vec<(&str, &str)> = calls[0].iter().collect();
    assert_eq!(
        sent,
        vec![
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("message", "Hello, this is long enough."),
        ]
    );

    assert_eq!(form.phase(), Phase::Succeeded);
    assert!(!form.surface().busy);
    assert!(form.surface().values.is_empty());
    assert!(form.surface().errors.is_empty());
    assert!(form.fields().iter().all(|f| f.value.is_empty()));
    assert_eq!(
        form.surface().message.as_ref().map(|m| m.kind),
        Some(MessageKind::Success)
    );
    assert_eq!(
        form.last_attempt().map(|a| a.outcome.clone()),
        Some(AttemptOutcome::Succeeded)
    );

    tokio::time::advance(Duration::from_millis(4999)).await;
    assert!(!form.tick());
    assert!(form.message().is_some());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(form.tick());
    assert!(form.message().is_none());
    assert!(form.surface().message.is_none());
    assert_eq!(form.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_submit_control_disabled_until_transport_settles() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);
    fill(&mut form, "Ada", "ada@example.com", "Hello, this is long enough.");

    let SubmitStart::Dispatched(in_flight) = form.begin_submit() else {
        panic!("expected dispatch");
    };
    assert!(form.surface().busy);
    assert_eq!(form.phase(), Phase::Submitting);

    // A second click while in flight is ignored.
    assert!(matches!(form.begin_submit(), SubmitStart::Ignored));
    assert_eq!(transport.calls().len(), 1);

    let (id, result) = in_flight.wait().await;
    assert!(form.surface().busy);

    form.settle(id, result).unwrap();
    assert!(!form.surface().busy);
    assert_eq!(form.phase(), Phase::Succeeded);

    assert_eq!(
        form.settle(id, Ok(())),
        Err(SubmissionError::Stale(id))
    );
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_keeps_entered_values() {
    let transport = RecordingTransport::new(Err(SubmissionError::Transport("offline".into())));
    let mut form = contact_form(&transport);
    fill(&mut form, "Ada", "ada@example.com", "Hello, this is long enough.");

    let report = form.submit().await;
    assert!(matches!(
        report,
        SubmitReport::Failed { error: SubmissionError::Transport(_), .. }
    ));
    assert_eq!(form.phase(), Phase::Failed);
    assert!(!form.surface().busy);
    assert_eq!(form.surface().read_value("message"), "Hello, this is long enough.");
    assert_eq!(form.message().map(|m| m.kind), Some(MessageKind::Error));

    let deadline = form.next_deadline().unwrap();
    tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
    assert!(form.tick());
    assert_eq!(form.phase(), Phase::Idle);

    // Retrying is a fresh submit action with its own attempt.
    form.submit().await;
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_submit_releases_the_form() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);
    fill(&mut form, "Ada", "ada@example.com", "Hello, this is long enough.");

    // The transport takes 1500ms; give up well before that.
    let timed_out = tokio::time::timeout(Duration::from_millis(100), form.submit()).await;
    assert!(timed_out.is_err());

    assert!(!form.surface().busy);
    assert_eq!(form.phase(), Phase::Failed);
    assert_eq!(form.surface().read_value("name"), "Ada");
    assert_eq!(form.message().map(|m| m.kind), Some(MessageKind::Error));
    assert!(matches!(
        form.last_attempt().map(|a| &a.outcome),
        Some(AttemptOutcome::Failed(_))
    ));

    // A fresh submit is dispatched rather than ignored.
    let report = form.submit().await;
    assert!(matches!(report, SubmitReport::Succeeded(_)));
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_resubmit_while_success_message_shown() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);
    fill(&mut form, "Ada", "ada@example.com", "Hello, this is long enough.");
    form.submit().await;
    assert_eq!(form.phase(), Phase::Succeeded);

    fill(&mut form, "Grace", "grace@example.com", "Another long enough note.");
    let report = form.submit().await;
    assert!(matches!(report, SubmitReport::Succeeded(_)));
    assert_eq!(transport.calls().len(), 2);
    assert_eq!(transport.calls()[1].get("name"), Some("Grace"));
}

#[tokio::test]
async fn test_blur_and_input_keep_errors_current() {
    let transport = RecordingTransport::new(Ok(()));
    let mut form = contact_form(&transport);

    form.surface_mut().type_value("message", "short");
    assert_eq!(
        form.on_blur("message").unwrap(),
        ValidationResult::Invalid("Message must be at least 10 characters".into())
    );

    form.surface_mut().type_value("message", "");
    form.on_input("message").unwrap();
    assert_eq!(form.surface().error("message"), Some("Message is required"));

    form.surface_mut().type_value("message", "Now it is long enough");
    form.on_input("message").unwrap();
    assert_eq!(form.surface().error("message"), None);
    assert_eq!(form.phase(), Phase::Idle);
    assert!(transport.calls().is_empty());
}
