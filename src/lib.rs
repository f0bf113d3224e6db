//! Article chat widget backend
//!
//! A session controller for a chat widget attached to a research article.
//! Users pick a conversation mode, ask questions, and the answers come from
//! an external answering service.

pub mod answer;
pub mod api;
pub mod config;
pub mod runtime;
pub mod state_machine;
