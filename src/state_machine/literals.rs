//! Fixed transcript texts
//!
//! Front ends and backend tests match on these strings, so they must stay
//! byte-for-byte stable.

/// Welcome message seeded when the Direct mode is chosen
pub const DIRECT_WELCOME: &str = "Hello! I can help you understand this research article better. Feel free to ask me any questions about the content, methodology, or findings.";

/// Welcome message seeded when the Real-World mode is chosen
pub const REAL_WORLD_WELCOME: &str = "Hello! I'll help you explore real-world phenomena related to this research article. Ask me about practical applications, real-life examples, or how these findings manifest in everyday situations.";

/// Welcome message and every reply of the Experiment mode
pub const EXPERIMENT_UNAVAILABLE: &str = "This experiment cannot be performed at this time. When it is completed, I will notify you immediately. Thank you for your understanding.";

/// Substituted when the backend answers without usable content
pub const EMPTY_ANSWER_FALLBACK: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

/// Shown when the backend call fails for any reason
pub const REQUEST_FAILED: &str =
    "Sorry, I encountered an error. Please make sure the backend is running and try again.";

/// Prepended to the outbound question in Real-World mode
pub const REAL_WORLD_PREFIX: &str = "Relate this to real-world phenomena: ";

/// Header shown before a mode has been chosen
pub const DEFAULT_HEADER: &str = "Article Assistant";

pub const ASK_PLACEHOLDER: &str = "Ask about the article...";
pub const EXPERIMENT_PLACEHOLDER: &str = "Feature coming soon...";
