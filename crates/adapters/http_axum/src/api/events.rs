//! Server-Sent Events (SSE) stream of device state changes.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

use crate::state::AppState;

/// `GET /events`: one SSE event per device state change.
///
/// The stream opens with the current state of every registered device, in
/// registry order. Each event is named after the device's domain and carries
/// the device record as its data. The connection is dropped by the
/// broadcaster when the client falls too far behind.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = ReceiverStream::new(state.gateway.subscribe())
        .map(|event| Ok(Event::default().event(event.domain.as_str()).data(event.data)));

    Sse::new(events).keep_alive(KeepAlive::default())
}
