//! Core session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod literals;
mod mode;
mod snapshot;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use mode::{ChatMode, ModeSelector, SubmitRoute};
pub use snapshot::SessionSnapshot;
pub use state::{Article, ChatMessage, RequestTicket, Role, SessionContext, SessionState};
pub use transition::{transition, TransitionError, TransitionResult};
