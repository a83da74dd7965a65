//! Error types for session operations.

use crate::executor::ExecutorFailure;
use plotsync_protocol::ClientId;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while operating on a sync session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A session is already open for this client.
    #[error("a sync session is already active for client {0}")]
    AlreadyActive(ClientId),

    /// No session is open for this client.
    #[error("no active sync session for client {0}")]
    NoActiveSession(ClientId),

    /// Client and server counters have diverged beyond recovery.
    #[error("counter desync: received {received}, expected {expected}")]
    CounterDesync {
        /// The counter the server would have accepted for new work.
        expected: u64,
        /// The counter the client sent.
        received: u64,
    },

    /// The downstream command execution failed; the session was not
    /// advanced, so retrying the same counter re-attempts execution.
    #[error("executor error: {0}")]
    Executor(#[from] ExecutorFailure),

    /// The supplied credential could not be resolved to a client.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}

impl SessionError {
    /// Returns true if the caller can recover without operator help.
    ///
    /// `AlreadyActive` recovers by continuing (or closing) the existing
    /// session, `NoActiveSession` by starting one, and `Executor` by
    /// retrying the same counter. A desync means client and server
    /// state have diverged and the session must be discarded.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            SessionError::CounterDesync { .. } | SessionError::InvalidCredential(_)
        )
    }

    /// Returns true if this error indicates a protocol violation.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, SessionError::CounterDesync { .. })
    }
}
