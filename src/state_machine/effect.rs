//! Effects produced by state transitions

use super::state::{ChatMessage, RequestTicket};
use crate::answer::AnswerRequest;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the answering service; the completion comes back as an event
    /// carrying `ticket`
    RequestAnswer {
        ticket: RequestTicket,
        request: AnswerRequest,
    },

    /// A message was appended to the transcript
    NotifyMessage { message: ChatMessage },

    /// Mode, draft, visibility or gating flags changed
    NotifyStateChange,

    /// The transcript was emptied
    NotifyCleared,
}

impl Effect {
    #[must_use]
    pub fn notify_message(message: ChatMessage) -> Self {
        Effect::NotifyMessage { message }
    }

    #[must_use]
    pub fn request_answer(ticket: RequestTicket, request: AnswerRequest) -> Self {
        Effect::RequestAnswer { ticket, request }
    }
}
