//! WebSocket transport adapter for the board relay.
//!
//! DESIGN
//! ======
//! [`Transport::connect`] opens the socket and splits it behind a pair of
//! unbounded channels, so callers see plain envelope values and never touch
//! the socket. Outbound sends are fire-and-forget: [`Transport::send`]
//! reports only whether the envelope was handed to the writer task. Inbound
//! frames that fail to parse as envelopes are logged and dropped, keeping
//! one bad peer from wedging the stream. Reconnection is the host's job,
//! not this adapter's.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;

use crate::protocol::Envelope;
use crate::session::Session;

/// Failures while establishing the relay connection.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("websocket connect failed: {0}")]
    Connect(Box<tokio_tungstenite::tungstenite::Error>),
}

/// Derive the relay endpoint from the session's HTTP base URL.
///
/// # Errors
///
/// Returns [`TransportError::InvalidBaseUrl`] when the base URL carries
/// neither an `http://` nor an `https://` scheme.
pub fn ws_url(session: &Session) -> Result<String, TransportError> {
    let base = session.base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws/whiteboard/{}/", session.board_id));
    }
    if let Some(rest) = base.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws/whiteboard/{}/", session.board_id));
    }
    Err(TransportError::InvalidBaseUrl(session.base_url.clone()))
}

/// A connected relay adapter: envelopes in, envelopes out.
#[derive(Debug)]
pub struct Transport {
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl Transport {
    /// Connect to the relay for `session`'s board.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the URL cannot be derived or the
    /// websocket handshake fails.
    pub async fn connect(session: &Session) -> Result<Self, TransportError> {
        Self::connect_url(&ws_url(session)?).await
    }

    /// Connect to an explicit websocket URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connect`] if the handshake fails.
    pub async fn connect_url(url: &str) -> Result<Self, TransportError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|error| TransportError::Connect(Box::new(error)))?;
        let (mut ws_write, mut ws_read) = stream.split();

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Envelope>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<Envelope>();

        // Writer task: serialize and forward until the channel or socket
        // closes.
        tokio::spawn(async move {
            while let Some(envelope) = out_rx.recv().await {
                let Ok(json) = serde_json::to_string(&envelope) else {
                    continue;
                };
                if ws_write.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        });

        // Reader task: parse text frames into envelopes, drop everything
        // else.
        tokio::spawn(async move {
            while let Some(frame) = ws_read.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<Envelope>(text.as_str()) {
                            Ok(envelope) => {
                                if in_tx.send(envelope).is_err() {
                                    break;
                                }
                            }
                            Err(error) => {
                                warn!(%error, "dropping unparseable frame");
                            }
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(error) => {
                        warn!(%error, "websocket receive failed");
                        break;
                    }
                }
            }
        });

        Ok(Self { tx: out_tx, rx: in_rx })
    }

    /// Hand an envelope to the writer task.
    ///
    /// Returns `false` if the connection is gone; the caller decides whether
    /// that matters.
    pub fn send(&self, envelope: Envelope) -> bool {
        self.tx.send(envelope).is_ok()
    }

    /// Next inbound envelope, or `None` once the connection has closed and
    /// the buffer has drained.
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }
}
