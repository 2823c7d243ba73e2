//! Submission transports.
//!
//! The orchestrator only needs "submit these values, eventually tell me
//! whether it worked". What performs the delivery is up to the embedder.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::SubmissionError;
use crate::field::FieldValues;

/// A boxed future for async transport operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a submission.
pub type SubmitResult = std::result::Result<(), SubmissionError>;

/// Delivers submitted form values somewhere.
pub trait Transport: Send + Sync {
    /// Submits a snapshot of the field values.
    ///
    /// The returned future must not borrow the transport; it may be polled
    /// after further events have been handled.
    fn submit(&self, values: FieldValues) -> BoxFuture<'static, SubmitResult>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn submit(&self, values: FieldValues) -> BoxFuture<'static, SubmitResult> {
        (**self).submit(values)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn submit(&self, values: FieldValues) -> BoxFuture<'static, SubmitResult> {
        (**self).submit(values)
    }
}

/// A transport that waits, logs the payload and reports a fixed outcome.
///
/// Stands in for a real endpoint on a site without a backend.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedTransport {
    /// Default simulated network latency.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    /// Creates a transport that succeeds after the default latency.
    pub fn new() -> Self {
        Self {
            latency: Self::DEFAULT_LATENCY,
            failure: None,
        }
    }

    /// Sets the simulated latency.
    #[must_use]
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every submission fail with the given reason.
    #[must_use]
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SimulatedTransport {
    fn submit(&self, values: FieldValues) -> BoxFuture<'static, SubmitResult> {
        let latency = self.latency;
        let failure = self.failure.clone();
        Box::pin(async move {
            let fields: Vec<&str> = values.iter().map(|(name, _)| name).collect();
            info!(?fields, "submitting form");
            match values.to_json() {
                Ok(payload) => debug!(%payload, "form data"),
                Err(err) => debug!(%err, "form data is not serializable"),
            }

            tokio::time::sleep(latency).await;

            match failure {
                Some(reason) => Err(SubmissionError::Transport(reason)),
                None => Ok(()),
            }
        })
    }
}

/// A transport backed by an async closure.
#[derive(Clone)]
pub struct FnTransport {
    handler: Arc<dyn Fn(FieldValues) -> BoxFuture<'static, SubmitResult> + Send + Sync>,
}

impl FnTransport {
    /// Wraps a closure.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(FieldValues) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = SubmitResult> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |values| Box::pin(handler(values))),
        }
    }
}

impl std::fmt::Debug for FnTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}

impl Transport for FnTransport {
    fn submit(&self, values: FieldValues) -> BoxFuture<'static, SubmitResult> {
        (self.handler)(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> FieldValues {
        [("name", "Ada")].into_iter().collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_succeeds_after_latency() {
        let transport = SimulatedTransport::new();
        let start = tokio::time::Instant::now();
        assert_eq!(transport.submit(values()).await, Ok(()));
        assert!(start.elapsed() >= SimulatedTransport::DEFAULT_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_transport_failure() {
        let transport = SimulatedTransport::new()
            .latency(Duration::from_millis(10))
            .failing("offline");
        assert_eq!(
            transport.submit(values()).await,
            Err(SubmissionError::Transport("offline".into()))
        );
    }

    #[tokio::test]
    async fn test_fn_transport_receives_values() {
        let transport = FnTransport::new(|values: FieldValues| async move {
            if values.get("name") == Some("Ada") {
                Ok(())
            } else {
                Err(SubmissionError::Rejected("unexpected payload".into()))
            }
        });
        assert_eq!(transport.submit(values()).await, Ok(()));
        assert!(transport.submit(FieldValues::new()).await.is_err());
    }
}
