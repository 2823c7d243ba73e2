//! Submission attempts.

use chrono::{DateTime, Utc};

use crate::field::FieldValues;

/// Identifier of a submission attempt, unique per orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(pub u64);

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The transport has not settled yet.
    Pending,
    /// The transport reported success.
    Succeeded,
    /// The transport reported failure.
    Failed(String),
}

/// One call to the submission transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAttempt {
    /// Attempt identifier.
    pub id: AttemptId,
    /// Values as they were when the attempt started.
    pub values: FieldValues,
    /// When the attempt started.
    pub submitted_at: DateTime<Utc>,
    /// Current outcome.
    pub outcome: AttemptOutcome,
}

impl SubmissionAttempt {
    /// Creates a pending attempt.
    pub fn new(id: AttemptId, values: FieldValues) -> Self {
        Self {
            id,
            values,
            submitted_at: Utc::now(),
            outcome: AttemptOutcome::Pending,
        }
    }

    /// Returns whether the attempt is still waiting on the transport.
    pub fn is_pending(&self) -> bool {
        self.outcome == AttemptOutcome::Pending
    }
}
