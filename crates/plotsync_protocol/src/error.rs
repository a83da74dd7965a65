//! Codec error types.

use thiserror::Error;

/// Result type for protocol encoding and decoding.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding protocol types.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The payload is not valid JSON or does not match the expected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A required field is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// An unknown command verb was supplied.
    #[error("unknown command verb: {0}")]
    UnknownVerb(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::InvalidPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CodecError::MissingField("counter");
        assert_eq!(err.to_string(), "missing field: counter");

        let err = CodecError::UnknownVerb("patch".into());
        assert!(err.to_string().contains("patch"));
    }
}
