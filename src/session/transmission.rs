//! Transmission multiplexer: three output streams onto one connection.
//!
//! Each cycle checks the queues in fixed priority order (assistant text,
//! user text, audio) and forwards at most one item from each. Within a
//! stream FIFO order holds; across streams there is no ordering guarantee
//! (audio for one sentence may land after assistant text for the next).
//!
//! The idle sleep fires only when the assistant-text queue was empty at
//! the start of the cycle, even if the other queues yielded data. See
//! DESIGN.md before changing that asymmetry.

use crate::defaults;
use crate::session::signal::Shutdown;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// One message queued for delivery to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientPayload {
    /// Text message, already carrying its one-character tag.
    Text(String),
    /// Raw synthesized audio bytes.
    Binary(Vec<u8>),
}

/// Worker that serializes the three output streams onto the delivery queue.
///
/// It never touches the network: messages are queued for the connection
/// handler to deliver, not awaited.
pub struct TransmissionStation;

impl TransmissionStation {
    /// Creates a transmission worker.
    pub fn new() -> Self {
        Self
    }

    /// Runs the worker until the shutdown signal fires.
    pub async fn run(
        self,
        mut assistant_rx: UnboundedReceiver<String>,
        mut user_rx: UnboundedReceiver<String>,
        mut audio_rx: UnboundedReceiver<Vec<u8>>,
        outbound_tx: UnboundedSender<ClientPayload>,
        shutdown: Shutdown,
    ) {
        loop {
            if shutdown.is_triggered() {
                break;
            }

            let mut idle = true;

            if let Ok(token) = assistant_rx.try_recv() {
                let _ = outbound_tx.send(ClientPayload::Text(format!("A{token}")));
                idle = false;
            }
            if let Ok(text) = user_rx.try_recv() {
                let _ = outbound_tx.send(ClientPayload::Text(format!("U{text}")));
            }
            if let Ok(audio) = audio_rx.try_recv() {
                let _ = outbound_tx.send(ClientPayload::Binary(audio));
            }

            if idle {
                tokio::time::sleep(defaults::IDLE_POLL).await;
            }
        }
    }
}

impl Default for TransmissionStation {
    fn default() -> Self {
        Self::new()
    }
}
