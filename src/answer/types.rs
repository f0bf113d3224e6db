//! Wire types for the answering service

use crate::state_machine::{Article, ChatMode};
use serde::{Deserialize, Serialize};

/// Body of the POST sent for one user turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub article_title: String,
    pub article_context: String,
    /// Only present for modes that need backend-side handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl AnswerRequest {
    /// Build the request for a user turn in `mode`
    #[must_use]
    pub fn for_turn(mode: ChatMode, text: &str, article: &Article) -> Self {
        Self {
            question: mode.outbound_question(text),
            article_title: article.title.clone(),
            article_context: article.content.clone(),
            mode: mode.request_tag().map(str::to_string),
        }
    }
}

/// Success body; a missing `answer` is not an error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AnswerResponse {
    #[must_use]
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}
