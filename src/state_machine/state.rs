//! Session state types

use super::literals::{ASK_PLACEHOLDER, DEFAULT_HEADER, EXPERIMENT_PLACEHOLDER};
use super::mode::{ChatMode, ModeSelector};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Transcript
// ============================================================================

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp,
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

// ============================================================================
// Request Tickets
// ============================================================================

/// Identifies one dispatched backend request.
///
/// A completion is applied only while its ticket is the session's in-flight
/// ticket; anything else belongs to an abandoned conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Session State
// ============================================================================

/// State of one open widget.
///
/// Only `transition` changes it; everything else reads through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) open: bool,
    pub(crate) selector: ModeSelector,
    pub(crate) history: Vec<ChatMessage>,
    pub(crate) draft: String,
    /// Request whose completion will be applied, if any
    pub(crate) in_flight: Option<RequestTicket>,
    /// Last ticket handed out; only grows
    pub(crate) ticket_counter: u64,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn mode(&self) -> Option<ChatMode> {
        self.selector.selected()
    }

    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    /// Single source of truth for input-disable and duplicate-submit checks
    #[must_use]
    pub fn pending_request(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Experiment mode stops accepting input once anything beyond the
    /// welcome has been shown.
    fn experiment_exhausted(&self) -> bool {
        self.mode() == Some(ChatMode::Experiment) && self.history.len() > 1
    }

    /// Whether the input area is shown at all
    #[must_use]
    pub fn input_visible(&self) -> bool {
        match self.mode() {
            None => false,
            Some(ChatMode::Experiment) => self.history.len() > 1,
            Some(_) => true,
        }
    }

    /// Whether the input control accepts text
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.mode().is_some() && !self.pending_request() && !self.experiment_exhausted()
    }

    /// Whether the send action is available for the current draft
    #[must_use]
    pub fn send_enabled(&self) -> bool {
        self.input_enabled() && !self.draft.trim().is_empty()
    }

    #[must_use]
    pub fn header_title(&self) -> &'static str {
        self.mode().map_or(DEFAULT_HEADER, ChatMode::title)
    }

    #[must_use]
    pub fn input_placeholder(&self) -> &'static str {
        match self.mode() {
            Some(ChatMode::Experiment) => EXPERIMENT_PLACEHOLDER,
            _ => ASK_PLACEHOLDER,
        }
    }

    pub(crate) fn take_ticket(&mut self) -> RequestTicket {
        self.ticket_counter += 1;
        let ticket = RequestTicket(self.ticket_counter);
        self.in_flight = Some(ticket);
        ticket
    }

    /// Forget the mode, the transcript and any in-flight request
    pub(crate) fn clear_conversation(&mut self) {
        self.selector.reset();
        self.history.clear();
        self.in_flight = None;
    }
}

// ============================================================================
// Session Context
// ============================================================================

/// The article the widget is attached to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub content: String,
}

impl Article {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub article: Article,
}

impl SessionContext {
    #[must_use]
    pub fn new(session_id: impl Into<String>, article: Article) -> Self {
        Self {
            session_id: session_id.into(),
            article,
        }
    }
}
