//! Server-Sent Events support

use crate::runtime::SessionUpdate;
use crate::state_machine::SessionSnapshot;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Snapshot first, then live updates
#[must_use]
pub fn sse_stream(
    init: SessionSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionUpdate>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move {
        Ok(Event::default()
            .event("init")
            .data(json!({ "type": "init", "session": init }).to_string()))
    });

    let updates = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(update) => Some(Ok(update_to_axum(update))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(init.chain(updates)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn update_to_axum(update: SessionUpdate) -> Event {
    let (event_type, data) = match update {
        SessionUpdate::Message { message } => (
            "message",
            json!({
                "type": "message",
                "message": message
            }),
        ),
        SessionUpdate::StateChange { snapshot } => (
            "state_change",
            json!({
                "type": "state_change",
                "session": snapshot
            }),
        ),
        SessionUpdate::Cleared => ("cleared", json!({ "type": "cleared" })),
    };

    Event::default().event(event_type).data(data.to_string())
}
