//! Executor outcomes and cached responses.

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one command execution, as reported by the executor.
///
/// The status is an HTTP-style numeric code; the body is whatever the
/// downstream operation returned. The sequencer does not interpret
/// either field, it only stamps them with the session counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    /// Numeric status code of the downstream operation.
    pub status: u16,
    /// Response body, if the operation produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ExecutionOutcome {
    /// Creates an outcome with a body.
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Creates an outcome without a body.
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// The counter-stamped response a session caches and replays.
///
/// The embedded counter is what lets the client confirm that its
/// command was applied: after receiving a `SyncResponse` it advances
/// its local counter to `counter` and composes the next request with
/// `counter + 1`. A replayed response is byte-identical to the
/// original because the whole tuple is stored, not re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Counter value this response corresponds to.
    pub counter: u64,
    /// Status code of the executed command.
    pub status: u16,
    /// Body of the executed command, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl SyncResponse {
    /// Stamps an execution outcome with the counter it was applied at.
    pub fn from_outcome(counter: u64, outcome: ExecutionOutcome) -> Self {
        Self {
            counter,
            status: outcome.status,
            body: outcome.body,
        }
    }

    /// Encodes to JSON bytes.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes from JSON bytes.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        if value.get("counter").is_none() {
            return Err(CodecError::MissingField("counter"));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stamp_outcome() {
        let outcome = ExecutionOutcome::new(200, json!({"id": 7}));
        let response = SyncResponse::from_outcome(1, outcome);

        assert_eq!(response.counter, 1);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"id": 7})));
    }

    #[test]
    fn response_roundtrip() {
        let response = SyncResponse::from_outcome(3, ExecutionOutcome::empty(204));
        let bytes = response.encode().unwrap();
        let decoded = SyncResponse::decode(&bytes).unwrap();

        assert_eq!(decoded, response);
        assert!(decoded.body.is_none());
    }

    #[test]
    fn counter_is_mandatory() {
        let result = SyncResponse::decode(br#"{"status":200}"#);
        assert!(matches!(result, Err(CodecError::MissingField("counter"))));
    }

    #[test]
    fn replay_equality_is_structural() {
        let a = SyncResponse::from_outcome(2, ExecutionOutcome::new(201, json!({"id": 9})));
        let b = a.clone();

        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
    }
}
