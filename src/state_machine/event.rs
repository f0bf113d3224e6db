//! Events that can occur in a session

use super::mode::ChatMode;
use super::state::RequestTicket;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Widget events
    Open,
    Close,

    // User events
    ModeSelected(ChatMode),
    DraftEdited {
        text: String,
    },
    Submit {
        text: String,
    },
    /// Submit whatever is in the draft
    SubmitDraft,
    /// Enter submits the draft, Shift+Enter inserts a newline
    EnterPressed {
        shift: bool,
    },
    Back,

    // Backend events
    AnswerReceived {
        ticket: RequestTicket,
        /// `answer` field of the response, if present
        answer: Option<String>,
    },
    AnswerFailed {
        ticket: RequestTicket,
        message: String,
    },
}

impl Event {
    #[must_use]
    pub fn submit(text: impl Into<String>) -> Self {
        Event::Submit { text: text.into() }
    }

    #[must_use]
    pub fn draft(text: impl Into<String>) -> Self {
        Event::DraftEdited { text: text.into() }
    }

    /// Short name for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Open => "open",
            Event::Close => "close",
            Event::ModeSelected(_) => "mode_selected",
            Event::DraftEdited { .. } => "draft_edited",
            Event::Submit { .. } => "submit",
            Event::SubmitDraft => "submit_draft",
            Event::EnterPressed { .. } => "enter_pressed",
            Event::Back => "back",
            Event::AnswerReceived { .. } => "answer_received",
            Event::AnswerFailed { .. } => "answer_failed",
        }
    }
}
