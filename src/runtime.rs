//! Runtime for executing sessions
//!
//! One tokio task owns the session state and applies events in arrival
//! order. Hosts talk to it through a [`SessionHandle`].

mod executor;


pub use executor::SessionRuntime;

use crate::answer::AnswerService;
use crate::state_machine::{
    ChatMessage, ChatMode, Event, SessionContext, SessionSnapshot, SessionState,
};
use tokio::sync::{broadcast, mpsc, watch};

/// Updates pushed to subscribers (SSE clients)
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    Message { message: ChatMessage },
    StateChange { snapshot: SessionSnapshot },
    Cleared,
}

/// Cloneable entry point to a running session
#[derive(Clone)]
pub struct SessionHandle {
    session_id: String,
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<SessionUpdate>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Start a runtime for a fresh session and return its handle
    #[must_use]
    pub fn spawn<S>(context: SessionContext, answer_service: S) -> Self
    where
        S: AnswerService + 'static,
    {
        let session_id = context.session_id.clone();
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) =
            watch::channel(SessionSnapshot::capture(&session_id, &SessionState::new()));

        let runtime = SessionRuntime::new(
            context,
            SessionState::new(),
            answer_service,
            event_rx,
            event_tx.downgrade(),
            broadcast_tx.clone(),
            snapshot_tx,
        );

        let id = session_id.clone();
        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %id, "Session runtime finished");
        });

        Self {
            session_id,
            event_tx,
            broadcast_tx,
            snapshot_rx,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send an event to the session
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn send_event(&self, event: Event) -> Result<(), String> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Show the widget
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn open(&self) -> Result<(), String> {
        self.send_event(Event::Open).await
    }

    /// Hide the widget and forget the conversation
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn close(&self) -> Result<(), String> {
        self.send_event(Event::Close).await
    }

    /// Pick a mode and seed its welcome message
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn select_mode(&self, mode: ChatMode) -> Result<(), String> {
        self.send_event(Event::ModeSelected(mode)).await
    }

    /// Replace the draft
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn edit_draft(&self, text: impl Into<String>) -> Result<(), String> {
        self.send_event(Event::draft(text)).await
    }

    /// Submit `text` as a user turn
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), String> {
        self.send_event(Event::submit(text)).await
    }

    /// Submit the current draft
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn submit_draft(&self) -> Result<(), String> {
        self.send_event(Event::SubmitDraft).await
    }

    /// Enter key; Shift+Enter adds a newline instead
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn press_enter(&self, shift: bool) -> Result<(), String> {
        self.send_event(Event::EnterPressed { shift }).await
    }

    /// Return to the mode picker
    ///
    /// # Errors
    ///
    /// Fails once the session runtime has stopped.
    pub async fn back(&self) -> Result<(), String> {
        self.send_event(Event::Back).await
    }

    /// State after the last processed event
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that observes every snapshot change
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to incremental session updates
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.broadcast_tx.subscribe()
    }
}
