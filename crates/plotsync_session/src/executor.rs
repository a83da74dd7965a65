//! Command executor boundary.

use plotsync_protocol::{Command, ExecutionOutcome};
use std::collections::VecDeque;
use thiserror::Error;

/// A failed command execution.
///
/// The `retryable` flag is a hint from the executor implementation:
/// a dropped connection is worth retrying as-is, a downstream
/// rejection of the payload is not. Either way the sequencer leaves
/// the session untouched, so a retry with the same counter is always
/// safe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExecutorFailure {
    /// Human-readable failure description.
    pub message: String,
    /// Whether retrying the same command is likely to succeed.
    pub retryable: bool,
}

impl ExecutorFailure {
    /// Creates a retryable failure (network error, timeout).
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable failure (downstream rejection).
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}

/// Executes accepted commands against the downstream API.
///
/// The sequencer invokes this exactly once per accepted new counter
/// value. Implementations make a single best-effort attempt and report
/// failure synchronously; retry policy belongs to the sequencer's
/// caller, never to this adapter.
pub trait CommandExecutor: Send + Sync {
    /// Performs the command and returns its status and body.
    fn execute(&self, command: &Command) -> Result<ExecutionOutcome, ExecutorFailure>;
}

/// A scriptable executor for testing.
///
/// Outcomes are served in the order they were queued; every invocation
/// is recorded so tests can assert how often (and with what) the
/// executor was actually called.
#[derive(Debug, Default)]
pub struct MockExecutor {
    replies: std::sync::Mutex<VecDeque<Result<ExecutionOutcome, ExecutorFailure>>>,
    calls: std::sync::Mutex<Vec<Command>>,
}

impl MockExecutor {
    /// Creates a new mock executor with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful outcome.
    pub fn push_outcome(&self, outcome: ExecutionOutcome) {
        self.replies.lock().unwrap().push_back(Ok(outcome));
    }

    /// Queues a failure.
    pub fn push_failure(&self, failure: ExecutorFailure) {
        self.replies.lock().unwrap().push_back(Err(failure));
    }

    /// Returns how many times `execute` was called.
    pub fn invocations(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the commands passed to `execute`, in call order.
    pub fn commands(&self) -> Vec<Command> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, command: &Command) -> Result<ExecutionOutcome, ExecutorFailure> {
        self.calls.lock().unwrap().push(command.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExecutorFailure::fatal("no mock outcome queued")))
    }
}
