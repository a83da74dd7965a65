//! Client identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier for one authenticated client.
///
/// A `ClientId` is produced at the identity-resolution boundary
/// (credential verification is external to this crate) and is the key
/// under which a sync session lives. The sequencer never inspects its
/// contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Creates a client identity from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Creates a client identity from raw bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Generates a fresh random client identity.
    ///
    /// Intended for tests and single-process setups; production
    /// identities come from the identity-resolution collaborator.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ClientId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
