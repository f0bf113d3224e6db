//! Presentation view of a session

use super::mode::ChatMode;
use super::state::{ChatMessage, SessionState};
use serde::Serialize;

/// Everything a front end needs to render the widget
#[allow(clippy::struct_excessive_bools)] // each flag drives its own control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub open: bool,
    pub mode: Option<ChatMode>,
    pub title: &'static str,
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub pending_request: bool,
    pub input_visible: bool,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub placeholder: &'static str,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(session_id: &str, state: &SessionState) -> Self {
        Self {
            session_id: session_id.to_string(),
            open: state.is_open(),
            mode: state.mode(),
            title: state.header_title(),
            messages: state.history().to_vec(),
            draft: state.draft().to_string(),
            pending_request: state.pending_request(),
            input_visible: state.input_visible(),
            input_enabled: state.input_enabled(),
            send_enabled: state.send_enabled(),
            placeholder: state.input_placeholder(),
        }
    }
}
