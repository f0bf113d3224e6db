//! API request and response types

use crate::state_machine::ChatMode;
use serde::{Deserialize, Serialize};

/// Request to pick a chat mode
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: ChatMode,
}

/// Request to replace the draft
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

/// Request to submit; without `text` the current draft is sent
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Request for an Enter key press
#[derive(Debug, Deserialize)]
pub struct EnterRequest {
    #[serde(default)]
    pub shift: bool,
}

/// Response for session actions
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// One entry of the mode picker
#[derive(Debug, Serialize)]
pub struct ModeInfo {
    pub id: ChatMode,
    pub title: &'static str,
    pub description: &'static str,
}

impl From<ChatMode> for ModeInfo {
    fn from(mode: ChatMode) -> Self {
        Self {
            id: mode,
            title: mode.title(),
            description: mode.description(),
        }
    }
}

/// Response for the mode list
#[derive(Debug, Serialize)]
pub struct ModesResponse {
    pub modes: Vec<ModeInfo>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
