//! Top-level board client: hydrate, connect, then pump events.
//!
//! [`BoardClient::join`] performs the two-step join — REST hydration for the
//! initial snapshot, then the websocket connect — and hands back a value
//! that owns the engine and the transport. Hosts feed UI events through
//! [`BoardClient::submit`], or hand the whole client to [`BoardClient::run`]
//! with an event channel and let the select loop interleave local events
//! with relay traffic.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::api::{ApiError, fetch_board};
use crate::engine::{Engine, Event};
use crate::session::Session;
use crate::transport::{Transport, TransportError};

/// Failures while joining a board.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// One participant's live connection to a board.
#[derive(Debug)]
pub struct BoardClient {
    engine: Engine,
    transport: Transport,
}

impl BoardClient {
    /// Join the board named by `session`: fetch the hydration snapshot,
    /// connect to the relay, and seed the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the snapshot fetch or the websocket
    /// handshake fails.
    pub async fn join(session: &Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::new();
        let board = fetch_board(&http, session).await?;
        let transport = Transport::connect(session).await?;

        let mut engine = Engine::new(session.user.clone());
        engine.load_elements(board.elements);
        info!(board = %board.name, user = %session.user, "joined board");

        Ok(Self { engine, transport })
    }

    /// Assemble a client from already-built parts. Used by hosts that manage
    /// their own hydration or connection lifecycle.
    #[must_use]
    pub fn from_parts(engine: Engine, transport: Transport) -> Self {
        Self { engine, transport }
    }

    /// Dispatch one local event and forward whatever it produced to the
    /// relay. Send failures are logged, not fatal: the local edit already
    /// applied.
    pub fn submit(&mut self, event: Event) {
        for envelope in self.engine.dispatch(event) {
            if !self.transport.send(envelope) {
                warn!("relay connection gone; envelope not sent");
            }
        }
    }

    /// The engine, for rendering store and chat state.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Pump events until the relay connection or the event channel closes.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        loop {
            tokio::select! {
                inbound = self.transport.recv() => {
                    let Some(envelope) = inbound else {
                        info!("relay connection closed");
                        break;
                    };
                    self.engine.dispatch(Event::Envelope(envelope));
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.submit(event);
                }
            }
        }
    }
}
