//! Client-submitted commands.

use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Verb of a command.
///
/// The set is closed on purpose: the executor adapter has a fixed,
/// testable contract rather than forwarding arbitrary request shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandVerb {
    /// Fetch the target without modifying it.
    Read,
    /// Create a new object at the target.
    Create,
    /// Update the object at the target.
    Update,
    /// Delete the object at the target.
    Delete,
}

impl CommandVerb {
    /// Returns the lowercase wire name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandVerb::Read => "read",
            CommandVerb::Create => "create",
            CommandVerb::Update => "update",
            CommandVerb::Delete => "delete",
        }
    }

    /// Parses a wire name into a verb.
    pub fn parse(name: &str) -> CodecResult<Self> {
        match name {
            "read" => Ok(CommandVerb::Read),
            "create" => Ok(CommandVerb::Create),
            "update" => Ok(CommandVerb::Update),
            "delete" => Ok(CommandVerb::Delete),
            other => Err(CodecError::UnknownVerb(other.to_string())),
        }
    }

    /// Returns true if the verb mutates the target.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, CommandVerb::Read)
    }
}

/// A numbered command submitted inside a sync session.
///
/// The sequencer treats the command as opaque apart from its verb: it
/// is handed to the command executor exactly once per accepted counter
/// value. The credential is forwarded so the downstream operation can
/// perform its own authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// What the command does to the target.
    pub verb: CommandVerb,
    /// Locator of the object the command operates on.
    pub target: String,
    /// Structured request body, if the verb carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Caller credential, forwarded for downstream authorization.
    pub credential: String,
}

impl Command {
    /// Creates a read command.
    pub fn read(target: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            verb: CommandVerb::Read,
            target: target.into(),
            body: None,
            credential: credential.into(),
        }
    }

    /// Creates a create command.
    pub fn create(
        target: impl Into<String>,
        body: Value,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            verb: CommandVerb::Create,
            target: target.into(),
            body: Some(body),
            credential: credential.into(),
        }
    }

    /// Creates an update command.
    pub fn update(
        target: impl Into<String>,
        body: Value,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            verb: CommandVerb::Update,
            target: target.into(),
            body: Some(body),
            credential: credential.into(),
        }
    }

    /// Creates a delete command.
    pub fn delete(target: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            verb: CommandVerb::Delete,
            target: target.into(),
            body: None,
            credential: credential.into(),
        }
    }

    /// Encodes to JSON bytes.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes from JSON bytes.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verb_wire_names() {
        assert_eq!(CommandVerb::Create.as_str(), "create");
        assert_eq!(CommandVerb::parse("delete").unwrap(), CommandVerb::Delete);
        assert!(CommandVerb::parse("patch").is_err());
    }

    #[test]
    fn mutating_verbs() {
        assert!(!CommandVerb::Read.is_mutating());
        assert!(CommandVerb::Create.is_mutating());
        assert!(CommandVerb::Update.is_mutating());
        assert!(CommandVerb::Delete.is_mutating());
    }

    #[test]
    fn create_command_roundtrip() {
        let cmd = Command::create(
            "/plot/12",
            json!({"name": "herb bed", "garden": 3}),
            "token-abc",
        );
        let bytes = cmd.encode().unwrap();
        let decoded = Command::decode(&bytes).unwrap();

        assert_eq!(decoded, cmd);
        assert_eq!(decoded.verb, CommandVerb::Create);
        assert_eq!(decoded.target, "/plot/12");
    }

    #[test]
    fn bodyless_command_omits_body_field() {
        let cmd = Command::delete("/plot/12", "token-abc");
        let bytes = cmd.encode().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(!text.contains("body"));
    }

    #[test]
    fn unknown_verb_rejected() {
        let result = Command::decode(br#"{"verb":"patch","target":"/x","credential":"t"}"#);
        assert!(result.is_err());
    }
}
