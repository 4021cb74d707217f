//! Fan-out of state records to open event-stream connections.
//!
//! Every connection is the sending half of a bounded [`mpsc`] channel whose
//! receiver is owned by the transport. Writes use [`mpsc::Sender::try_send`],
//! so a broadcast never waits on a slow client: a connection whose buffer
//! is full or whose receiver is gone is dropped on the spot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use nodeweb_domain::domain::Domain;
use nodeweb_domain::record::Record;

/// One framed event: the event type is the domain, the data the record JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    pub domain: Domain,
    pub data: String,
}

impl StreamEvent {
    /// Serialize `record` into an event of type `domain`.
    ///
    /// Returns `None` (and logs) if the record cannot be serialized.
    #[must_use]
    pub fn encode(domain: Domain, record: &Record) -> Option<Self> {
        match record.to_json() {
            Ok(data) => Some(Self { domain, data }),
            Err(err) => {
                tracing::warn!(%err, %domain, id = %record.id, "failed to serialize state record");
                None
            }
        }
    }
}

/// Receiving half handed to the transport for one client.
pub type EventStream = mpsc::Receiver<StreamEvent>;

/// Set of open event-stream connections.
#[derive(Debug)]
pub struct EventBroadcaster {
    connections: Mutex<Vec<mpsc::Sender<StreamEvent>>>,
    buffer: usize,
}

impl EventBroadcaster {
    /// Create a broadcaster whose connections buffer up to `buffer` live
    /// events on top of their initial snapshot. A zero buffer is raised to 1.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            buffer: buffer.max(1),
        }
    }

    /// Open a new connection.
    ///
    /// `snapshot` is evaluated while the connection set is locked and its
    /// records are queued before the connection joins the set, so the client
    /// sees the full current state before any later change.
    pub fn subscribe<F>(&self, snapshot: F) -> EventStream
    where
        F: FnOnce() -> Vec<(Domain, Record)>,
    {
        let mut connections = self.lock();
        connections.retain(|tx| !tx.is_closed());

        let initial: Vec<StreamEvent> = snapshot()
            .iter()
            .filter_map(|(domain, record)| StreamEvent::encode(*domain, record))
            .collect();

        let (tx, rx) = mpsc::channel(self.buffer + initial.len());
        for event in initial {
            // capacity covers the whole snapshot
            let _ = tx.try_send(event);
        }
        connections.push(tx);

        tracing::debug!(connections = connections.len(), "event stream opened");
        rx
    }

    /// Push `record` as an event of type `domain` to every open connection.
    ///
    /// Connections that cannot take the event right now are dropped; there
    /// is no retry.
    pub fn broadcast(&self, domain: Domain, record: &Record) {
        let Some(event) = StreamEvent::encode(domain, record) else {
            return;
        };

        let mut connections = self.lock();
        let before = connections.len();
        connections.retain(|tx| tx.try_send(event.clone()).is_ok());

        let dropped = before - connections.len();
        if dropped > 0 {
            tracing::debug!(dropped, %domain, "dropped event stream connections");
        }
    }

    /// Forget connections whose receivers have been dropped.
    pub fn prune(&self) {
        self.lock().retain(|tx| !tx.is_closed());
    }

    /// Number of connections currently in the set.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<mpsc::Sender<StreamEvent>>> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
