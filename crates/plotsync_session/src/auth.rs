//! Identity resolution boundary.
//!
//! Credential verification lives outside this crate: some external
//! collaborator (a token service, a reverse proxy, a test fixture)
//! maps each credential to the stable identity its session is keyed
//! by. This module only defines that boundary.

use crate::error::{SessionError, SessionResult};
use plotsync_protocol::ClientId;
use std::collections::HashMap;

/// Maps a caller credential to a stable client identity.
pub trait IdentityResolver: Send + Sync {
    /// Resolves the credential, failing with `InvalidCredential` when
    /// it does not belong to a known client.
    fn resolve(&self, credential: &str) -> SessionResult<ClientId>;
}

/// Resolver over a fixed credential table.
///
/// Useful for tests and single-tenant deployments.
#[derive(Debug, Default)]
pub struct StaticResolver {
    identities: HashMap<String, ClientId>,
}

impl StaticResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a credential-to-identity mapping.
    pub fn with_identity(mut self, credential: impl Into<String>, client_id: ClientId) -> Self {
        self.identities.insert(credential.into(), client_id);
        self
    }
}

impl IdentityResolver for StaticResolver {
    fn resolve(&self, credential: &str) -> SessionResult<ClientId> {
        self.identities
            .get(credential)
            .copied()
            .ok_or_else(|| SessionError::InvalidCredential(credential.to_string()))
    }
}
