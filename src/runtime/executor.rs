//! Session runtime executor

use super::SessionUpdate;

use crate::answer::{AnswerRequest, AnswerService};
use crate::state_machine::{
    transition, Effect, Event, RequestTicket, SessionContext, SessionSnapshot, SessionState,
    TransitionError,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Owns one session's state and applies its events serially
pub struct SessionRuntime<S>
where
    S: AnswerService + 'static,
{
    context: SessionContext,
    state: SessionState,
    answer_service: Arc<S>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every handle is dropped
    event_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<SessionUpdate>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<S> SessionRuntime<S>
where
    S: AnswerService + 'static,
{
    #[must_use]
    pub fn new(
        context: SessionContext,
        state: SessionState,
        answer_service: S,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        broadcast_tx: broadcast::Sender<SessionUpdate>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
    ) -> Self {
        Self {
            context,
            state,
            answer_service: Arc::new(answer_service),
            event_rx,
            event_tx,
            broadcast_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting session runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!(session_id = %self.context.session_id, "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        // Effects may produce follow-up events; handle them before the next message
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let kind = current_event.kind();
            let result = match transition(&self.state, &self.context, current_event, Utc::now())
            {
                Ok(r) => r,
                Err(TransitionError::StaleResponse { ticket }) => {
                    tracing::debug!(
                        session_id = %self.context.session_id,
                        %ticket,
                        "Discarding stale answer"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %self.context.session_id,
                        event = kind,
                        reason = %e,
                        "Event ignored"
                    );
                    continue;
                }
            };

            self.state = result.new_state;
            self.snapshot_tx
                .send_replace(SessionSnapshot::capture(&self.context.session_id, &self.state));

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect) {
                    events_to_process.push(generated_event);
                }
            }
        }
    }

    /// Execute an effect and optionally return a generated event
    fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RequestAnswer { ticket, request } => {
                return self.spawn_request(ticket, request);
            }
            Effect::NotifyMessage { message } => {
                let _ = self.broadcast_tx.send(SessionUpdate::Message { message });
            }
            Effect::NotifyStateChange => {
                let _ = self.broadcast_tx.send(SessionUpdate::StateChange {
                    snapshot: self.snapshot_tx.borrow().clone(),
                });
            }
            Effect::NotifyCleared => {
                let _ = self.broadcast_tx.send(SessionUpdate::Cleared);
            }
        }
        None
    }

    /// Run the backend call off the event loop; its outcome comes back as an event.
    ///
    /// Once every handle is gone the request is not sent and the failure is
    /// returned directly, so the ticket never stays in flight.
    fn spawn_request(&self, ticket: RequestTicket, request: AnswerRequest) -> Option<Event> {
        let Some(event_tx) = self.event_tx.upgrade() else {
            tracing::warn!(%ticket, "Session is shutting down, request not sent");
            return Some(Event::AnswerFailed {
                ticket,
                message: "Session is shutting down".to_string(),
            });
        };
        let service = self.answer_service.clone();
        let session_id = self.context.session_id.clone();

        tokio::spawn(async move {
            tracing::info!(%session_id, %ticket, "Requesting answer (background)");

            let event = match service.ask(&request).await {
                Ok(response) => Event::AnswerReceived {
                    ticket,
                    answer: response.answer,
                },
                Err(e) => {
                    tracing::warn!(%session_id, %ticket, error = %e, kind = %e.kind, "Answer request failed");
                    Event::AnswerFailed {
                        ticket,
                        message: e.to_string(),
                    }
                }
            };

            let _ = event_tx.send(event).await;
        });
        None
    }
}
