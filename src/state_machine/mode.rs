//! Conversation modes and the selector that picks one

use super::literals::{
    DIRECT_WELCOME, EXPERIMENT_UNAVAILABLE, REAL_WORLD_PREFIX, REAL_WORLD_WELCOME,
};
use serde::{Deserialize, Serialize};

/// One of the three mutually exclusive ways to talk about the article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatMode {
    /// Questions go straight to the backend
    Direct,
    /// Questions are reframed toward real-world phenomena
    RealWorld,
    /// Closed feature: every turn gets the same canned reply
    Experiment,
}

/// Where a user turn goes once it has been recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRoute {
    /// Answer locally with a fixed reply, no network
    ShortCircuit(&'static str),
    /// Ask the answering service
    Backend,
}

impl ChatMode {
    pub const ALL: [ChatMode; 3] = [ChatMode::Direct, ChatMode::RealWorld, ChatMode::Experiment];

    /// Wire name, also sent as the request `mode` field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::Direct => "direct",
            ChatMode::RealWorld => "real-world",
            ChatMode::Experiment => "experiment",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChatMode::Direct => "Direct Chat",
            ChatMode::RealWorld => "Real-World Phenomena",
            ChatMode::Experiment => "Practical Experiment",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ChatMode::Direct => {
                "Ask questions directly about the article's content, methodology, and findings"
            }
            ChatMode::RealWorld => {
                "Explore practical applications and real-life examples related to this research"
            }
            ChatMode::Experiment => "Design and conduct experiments based on the research findings",
        }
    }

    /// Assistant message seeded into a fresh history
    #[must_use]
    pub fn welcome(self) -> &'static str {
        match self {
            ChatMode::Direct => DIRECT_WELCOME,
            ChatMode::RealWorld => REAL_WORLD_WELCOME,
            ChatMode::Experiment => EXPERIMENT_UNAVAILABLE,
        }
    }

    #[must_use]
    pub fn submit_route(self) -> SubmitRoute {
        match self {
            ChatMode::Direct | ChatMode::RealWorld => SubmitRoute::Backend,
            ChatMode::Experiment => SubmitRoute::ShortCircuit(EXPERIMENT_UNAVAILABLE),
        }
    }

    /// Question text sent to the backend for a user turn.
    ///
    /// The transcript always keeps the user's own text; only the payload is
    /// reshaped.
    #[must_use]
    pub fn outbound_question(self, text: &str) -> String {
        match self {
            ChatMode::RealWorld => format!("{REAL_WORLD_PREFIX}{text}"),
            ChatMode::Direct | ChatMode::Experiment => text.to_string(),
        }
    }

    /// Value of the request `mode` field, if the backend needs one
    #[must_use]
    pub fn request_tag(self) -> Option<&'static str> {
        match self {
            ChatMode::RealWorld => Some(self.as_str()),
            ChatMode::Direct | ChatMode::Experiment => None,
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the chosen mode; unset until the reader picks one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSelector {
    selected: Option<ChatMode>,
}

impl ModeSelector {
    /// Modes in display order
    #[must_use]
    pub fn options() -> &'static [ChatMode] {
        &ChatMode::ALL
    }

    pub fn select(&mut self, mode: ChatMode) -> ChatMode {
        self.selected = Some(mode);
        mode
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<ChatMode> {
        self.selected
    }
}
