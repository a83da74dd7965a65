//! The command sequencer state machine.

use crate::config::SequencerConfig;
use crate::error::{SessionError, SessionResult};
use crate::executor::CommandExecutor;
use crate::store::SessionStore;
use parking_lot::RwLock;
use plotsync_protocol::{ClientId, Command, SyncResponse};
use std::sync::Arc;

/// Counters describing what the sequencer has done so far.
#[derive(Debug, Clone, Default)]
pub struct SequencerStats {
    /// Sessions opened via `start_sync`.
    pub sessions_started: u64,
    /// Sessions closed via `end_sync`.
    pub sessions_closed: u64,
    /// Sessions removed by idle reaping.
    pub sessions_reaped: u64,
    /// Commands handed to the executor that succeeded.
    pub commands_executed: u64,
    /// Retransmissions answered from the session cache.
    pub replays_served: u64,
    /// Requests rejected for counter desynchronization.
    pub desyncs_rejected: u64,
    /// Executor invocations that failed.
    pub executor_failures: u64,
}

/// Decides, for each incoming numbered command, whether to replay a
/// cached response, execute and advance, or reject.
///
/// For a session whose counter is `n`, a request numbered `n` replays
/// the cached response without executing, a request numbered `n + 1`
/// executes exactly once and advances the session, and anything else
/// is a desynchronization. A failed execution leaves the session
/// untouched so the client's retry re-attempts it; a successful one
/// turns every further retransmission of that number into a replay.
///
/// All operations for one client are serialized by the session entry
/// lock, held across the executor call. Different clients never
/// contend.
pub struct Sequencer<E: CommandExecutor> {
    config: SequencerConfig,
    executor: Arc<E>,
    store: SessionStore,
    stats: RwLock<SequencerStats>,
}

impl<E: CommandExecutor> Sequencer<E> {
    /// Creates a sequencer owning its executor.
    pub fn new(config: SequencerConfig, executor: E) -> Self {
        Self::with_shared_executor(config, Arc::new(executor))
    }

    /// Creates a sequencer over an executor shared with the caller.
    pub fn with_shared_executor(config: SequencerConfig, executor: Arc<E>) -> Self {
        Self {
            config,
            executor,
            store: SessionStore::new(),
            stats: RwLock::new(SequencerStats::default()),
        }
    }

    /// Opens a sync session for the client.
    ///
    /// Fails with `AlreadyActive` if the client already has one; the
    /// caller must not overwrite an in-flight counter.
    pub fn start_sync(&self, client_id: ClientId) -> SessionResult<()> {
        self.store.insert(client_id)?;
        self.stats.write().sessions_started += 1;
        tracing::debug!(client = %client_id, "sync session started");
        Ok(())
    }

    /// Applies the command numbered `requested_counter` for the client.
    ///
    /// Returns the counter-stamped response: freshly produced when the
    /// command was executed, or the cached copy when the request was a
    /// retransmission of already-processed work.
    pub fn apply_command(
        &self,
        client_id: ClientId,
        requested_counter: u64,
        command: Command,
    ) -> SessionResult<SyncResponse> {
        let entry = self
            .store
            .entry(client_id)
            .ok_or(SessionError::NoActiveSession(client_id))?;

        let mut session = entry.lock();
        if session.closed {
            // The session was ended while this request was in flight.
            return Err(SessionError::NoActiveSession(client_id));
        }

        let current = session.counter;

        if requested_counter == current {
            // Retransmission: the client lost our previous reply.
            // Replaying counter 0 is impossible, nothing has executed.
            if let Some(cached) = session.last_response.clone() {
                session.touch();
                self.stats.write().replays_served += 1;
                tracing::debug!(
                    client = %client_id,
                    counter = requested_counter,
                    "replayed cached response"
                );
                return Ok(cached);
            }
        } else if requested_counter == current + 1 {
            match self.executor.execute(&command) {
                Ok(outcome) => {
                    let response = SyncResponse::from_outcome(requested_counter, outcome);
                    // Commit counter and cached response together.
                    session.counter = requested_counter;
                    session.last_response = Some(response.clone());
                    session.touch();
                    self.stats.write().commands_executed += 1;
                    tracing::debug!(
                        client = %client_id,
                        counter = requested_counter,
                        status = response.status,
                        "command executed"
                    );
                    return Ok(response);
                }
                Err(failure) => {
                    // No mutation: the client retries the same counter
                    // and execution is re-attempted.
                    self.stats.write().executor_failures += 1;
                    tracing::warn!(
                        client = %client_id,
                        counter = requested_counter,
                        error = %failure,
                        "command execution failed"
                    );
                    return Err(SessionError::Executor(failure));
                }
            }
        }

        self.stats.write().desyncs_rejected += 1;
        tracing::warn!(
            client = %client_id,
            received = requested_counter,
            expected = current + 1,
            "counter desync"
        );
        Err(SessionError::CounterDesync {
            expected: current + 1,
            received: requested_counter,
        })
    }

    /// Closes the client's session.
    ///
    /// No-op when no session exists, so a client may safely retry a
    /// close whose acknowledgment was lost. Waits for an in-flight
    /// apply to finish before the session is tombstoned.
    pub fn end_sync(&self, client_id: ClientId) {
        if let Some(entry) = self.store.remove(client_id) {
            entry.lock().closed = true;
            self.stats.write().sessions_closed += 1;
            tracing::debug!(client = %client_id, "sync session ended");
        }
    }

    /// Returns true if the client has an open session.
    pub fn has_session(&self, client_id: ClientId) -> bool {
        self.store.contains(client_id)
    }

    /// Returns the number of open sessions.
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Returns a snapshot of the sequencer counters.
    pub fn stats(&self) -> SequencerStats {
        self.stats.read().clone()
    }

    /// Removes sessions idle past the configured timeout.
    ///
    /// Does nothing unless `SequencerConfig::idle_timeout` is set.
    /// Returns how many sessions were reaped.
    pub fn reap_idle(&self) -> usize {
        let Some(timeout) = self.config.idle_timeout else {
            return 0;
        };
        let reaped = self.store.reap_idle(timeout);
        if reaped > 0 {
            self.stats.write().sessions_reaped += reaped as u64;
            tracing::info!(count = reaped, "reaped idle sync sessions");
        }
        reaped
    }
}
