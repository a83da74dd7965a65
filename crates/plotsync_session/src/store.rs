//! Session storage.

use crate::error::{SessionError, SessionResult};
use parking_lot::{Mutex, MutexGuard, RwLock};
use plotsync_protocol::{ClientId, SyncResponse};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Mutable state of one sync session.
///
/// `counter` is the highest command sequence number fully processed;
/// `last_response` is the cached response for exactly that counter.
/// The two fields only ever change together, under the entry lock.
#[derive(Debug)]
pub struct SyncSession {
    /// Highest command sequence number fully processed.
    pub counter: u64,
    /// Cached response for `counter`; `None` until the first command.
    pub last_response: Option<SyncResponse>,
    /// When the session last accepted an operation.
    pub last_activity: Instant,
    /// Set when the session has been closed; an apply that raced the
    /// close observes this after acquiring the lock.
    pub closed: bool,
}

impl SyncSession {
    fn new() -> Self {
        Self {
            counter: 0,
            last_response: None,
            last_activity: Instant::now(),
            closed: false,
        }
    }

    /// Marks the session as active now.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// One client's slot in the store.
///
/// The entry-level mutex is the per-client serialization scope: it is
/// held for the whole of one `apply_command`, including the downstream
/// executor call, so a client's operations never interleave.
#[derive(Debug)]
pub struct SessionEntry {
    client_id: ClientId,
    session: Mutex<SyncSession>,
}

impl SessionEntry {
    fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            session: Mutex::new(SyncSession::new()),
        }
    }

    /// Returns the owning client.
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Locks the session state, blocking until any in-flight operation
    /// for this client completes.
    pub fn lock(&self) -> MutexGuard<'_, SyncSession> {
        self.session.lock()
    }

    fn try_lock(&self) -> Option<MutexGuard<'_, SyncSession>> {
        self.session.try_lock()
    }
}

/// Arena of sync sessions, one per client.
///
/// The outer map lock is held only for insert/lookup/remove, never
/// across an executor call, so clients are fully independent of each
/// other. Sessions live in memory only: a restart drops them and
/// clients recover by starting a new session.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<ClientId, Arc<SessionEntry>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session for the client.
    ///
    /// Fails with `AlreadyActive` if one exists; an in-flight counter
    /// must never be silently overwritten.
    pub fn insert(&self, client_id: ClientId) -> SessionResult<()> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(&client_id) {
            return Err(SessionError::AlreadyActive(client_id));
        }
        sessions.insert(client_id, Arc::new(SessionEntry::new(client_id)));
        Ok(())
    }

    /// Returns the client's entry, if a session is open.
    pub fn entry(&self, client_id: ClientId) -> Option<Arc<SessionEntry>> {
        self.sessions.read().get(&client_id).cloned()
    }

    /// Removes the client's entry from the map and returns it.
    ///
    /// The caller is responsible for tombstoning the detached entry
    /// under its lock; see `Sequencer::end_sync`.
    pub fn remove(&self, client_id: ClientId) -> Option<Arc<SessionEntry>> {
        self.sessions.write().remove(&client_id)
    }

    /// Returns true if the client has an open session.
    pub fn contains(&self, client_id: ClientId) -> bool {
        self.sessions.read().contains_key(&client_id)
    }

    /// Returns the number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if no sessions are open.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Removes sessions idle for longer than `timeout` and returns how
    /// many were reaped.
    ///
    /// An entry whose lock is currently held is mid-operation and is
    /// skipped; its activity stamp refreshes when the operation
    /// commits.
    pub fn reap_idle(&self, timeout: Duration) -> usize {
        let candidates: Vec<Arc<SessionEntry>> =
            self.sessions.read().values().cloned().collect();

        let mut reaped = 0;
        for entry in candidates {
            let Some(mut session) = entry.try_lock() else {
                continue;
            };
            if session.closed || session.last_activity.elapsed() < timeout {
                continue;
            }
            session.closed = true;
            drop(session);
            self.sessions.write().remove(&entry.client_id());
            reaped += 1;
        }
        reaped
    }
}
