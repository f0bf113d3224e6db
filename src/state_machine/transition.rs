//! Pure state transition function

use super::literals::{EMPTY_ANSWER_FALLBACK, REQUEST_FAILED};
use super::mode::SubmitRoute;
use super::state::{ChatMessage, RequestTicket, SessionContext, SessionState};
use super::{Effect, Event};
use crate::answer::AnswerRequest;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

}

/// Reasons an event leaves the session untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("No conversation mode selected")]
    NoModeSelected,
    #[error("Message is empty")]
    EmptyInput,
    #[error("A request is already in flight")]
    RequestInFlight,
    #[error("Dropping completion for abandoned request {ticket}")]
    StaleResponse { ticket: RequestTicket },
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; all I/O is
/// described by the returned effects. `now` stamps any message appended.
///
/// # Errors
///
/// Returns a [`TransitionError`] when the event does not apply; the caller
/// keeps the old state.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
    now: DateTime<Utc>,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Widget visibility
        // ============================================================
        Event::Open => {
            let mut next = state.clone();
            next.open = true;
            Ok(TransitionResult::new(next).with_effect(Effect::NotifyStateChange))
        }

        // Closing forgets the conversation; the draft survives
        Event::Close => {
            let mut next = state.clone();
            next.open = false;
            next.clear_conversation();
            Ok(TransitionResult::new(next)
                .with_effect(Effect::NotifyCleared)
                .with_effect(Effect::NotifyStateChange))
        }

        // ============================================================
        // Mode selection
        // ============================================================

        // Re-selecting the current mode also reseeds the history
        Event::ModeSelected(mode) => {
            let mut next = state.clone();
            next.clear_conversation();
            next.selector.select(mode);
            let welcome = ChatMessage::assistant(mode.welcome(), now);
            next.history.push(welcome.clone());
            Ok(TransitionResult::new(next)
                .with_effect(Effect::NotifyCleared)
                .with_effect(Effect::notify_message(welcome))
                .with_effect(Effect::NotifyStateChange))
        }

        Event::Back => {
            let mut next = state.clone();
            next.clear_conversation();
            next.draft.clear();
            Ok(TransitionResult::new(next)
                .with_effect(Effect::NotifyCleared)
                .with_effect(Effect::NotifyStateChange))
        }

        // ============================================================
        // Draft and submission
        // ============================================================
        Event::DraftEdited { text } => {
            let mut next = state.clone();
            next.draft = text;
            Ok(TransitionResult::new(next).with_effect(Effect::NotifyStateChange))
        }

        Event::EnterPressed { shift: true } => {
            let mut next = state.clone();
            next.draft.push('\n');
            Ok(TransitionResult::new(next).with_effect(Effect::NotifyStateChange))
        }

        Event::EnterPressed { shift: false } | Event::SubmitDraft => {
            submit(state, context, &state.draft, now)
        }

        Event::Submit { text } => submit(state, context, &text, now),

        // ============================================================
        // Backend completions
        // ============================================================
        Event::AnswerReceived { ticket, answer } => {
            ensure_current(state, ticket)?;
            let reply_text = answer
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| EMPTY_ANSWER_FALLBACK.to_string());
            Ok(complete_request(state, ChatMessage::assistant(reply_text, now)))
        }

        Event::AnswerFailed { ticket, .. } => {
            ensure_current(state, ticket)?;
            Ok(complete_request(
                state,
                ChatMessage::assistant(REQUEST_FAILED, now),
            ))
        }
    }
}

fn submit(
    state: &SessionState,
    context: &SessionContext,
    raw_text: &str,
    now: DateTime<Utc>,
) -> Result<TransitionResult, TransitionError> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Err(TransitionError::EmptyInput);
    }
    if state.pending_request() {
        return Err(TransitionError::RequestInFlight);
    }
    let mode = state.mode().ok_or(TransitionError::NoModeSelected)?;

    // The user's own turn is always recorded first
    let mut next = state.clone();
    let user_message = ChatMessage::user(text, now);
    next.history.push(user_message.clone());
    next.draft.clear();

    match mode.submit_route() {
        SubmitRoute::ShortCircuit(reply) => {
            let reply = ChatMessage::assistant(reply, now);
            next.history.push(reply.clone());
            Ok(TransitionResult::new(next)
                .with_effect(Effect::notify_message(user_message))
                .with_effect(Effect::notify_message(reply))
                .with_effect(Effect::NotifyStateChange))
        }
        SubmitRoute::Backend => {
            let request = AnswerRequest::for_turn(mode, text, &context.article);
            let ticket = next.take_ticket();
            Ok(TransitionResult::new(next)
                .with_effect(Effect::notify_message(user_message))
                .with_effect(Effect::NotifyStateChange)
                .with_effect(Effect::request_answer(ticket, request)))
        }
    }
}

fn ensure_current(state: &SessionState, ticket: RequestTicket) -> Result<(), TransitionError> {
    if state.in_flight() == Some(ticket) {
        Ok(())
    } else {
        Err(TransitionError::StaleResponse { ticket })
    }
}

fn complete_request(state: &SessionState, reply: ChatMessage) -> TransitionResult {
    let mut next = state.clone();
    next.in_flight = None;
    next.history.push(reply.clone());
    TransitionResult::new(next)
        .with_effect(Effect::notify_message(reply))
        .with_effect(Effect::NotifyStateChange)
}
