//! # Plotsync Session
//!
//! Session store and idempotent command sequencer for Plotsync.
//!
//! This crate provides:
//! - Session lifecycle (`start_sync` / `end_sync`, one session per client)
//! - The counter-based sequencer (replay, execute-and-advance, reject)
//! - The `CommandExecutor` adapter boundary
//! - The `IdentityResolver` collaborator boundary
//!
//! # Protocol
//!
//! A client numbers every command it submits. For a session whose
//! stored counter is `n`:
//! 1. A request numbered `n` is a retransmission: the cached response
//!    is returned and nothing executes.
//! 2. A request numbered `n + 1` is new work: it executes exactly once,
//!    then counter and cached response advance together.
//! 3. Anything else is a desynchronization and is rejected without
//!    touching the session.
//!
//! A failed execution leaves the session untouched, so retrying the
//! same number re-attempts the operation; a successful execution makes
//! every later retransmission of that number a pure replay.
//!
//! # Example
//!
//! ```
//! use plotsync_protocol::{ClientId, Command, ExecutionOutcome};
//! use plotsync_session::{MockExecutor, Sequencer, SequencerConfig};
//!
//! let executor = MockExecutor::new();
//! executor.push_outcome(ExecutionOutcome::empty(200));
//!
//! let sequencer = Sequencer::new(SequencerConfig::default(), executor);
//! let client = ClientId::random();
//!
//! sequencer.start_sync(client)?;
//! let response =
//!     sequencer.apply_command(client, 1, Command::delete("/plot/7", "token"))?;
//! assert_eq!(response.counter, 1);
//!
//! sequencer.end_sync(client);
//! # Ok::<(), plotsync_session::SessionError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod executor;
mod sequencer;
mod store;

pub use auth::{IdentityResolver, StaticResolver};
pub use config::SequencerConfig;
pub use error::{SessionError, SessionResult};
pub use executor::{CommandExecutor, ExecutorFailure, MockExecutor};
pub use sequencer::{Sequencer, SequencerStats};
pub use store::{SessionEntry, SessionStore, SyncSession};
