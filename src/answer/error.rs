//! Answer service error types

use thiserror::Error;

/// Failed backend call.
///
/// The session treats every kind the same way; the kind only feeds logs.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AnswerError {
    pub kind: AnswerErrorKind,
    pub message: String,
}

impl AnswerError {
    #[must_use]
    pub fn new(kind: AnswerErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Network, message)
    }

    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Timeout, message)
    }

    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::new(AnswerErrorKind::Status(status), format!("HTTP {status}: {body}"))
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(AnswerErrorKind::Decode, message)
    }
}

/// Error classification for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerErrorKind {
    /// Connection refused, reset, DNS
    Network,
    /// No response within the client timeout
    Timeout,
    /// Non-success HTTP status
    Status(u16),
    /// Success status but the body was not the expected JSON
    Decode,
}

impl std::fmt::Display for AnswerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Timeout => f.write_str("timeout"),
            Self::Status(code) => write!(f, "status_{code}"),
            Self::Decode => f.write_str("decode"),
        }
    }
}
