//! Game drivers: the session with the server and the [`Game`] seam.

mod error;
mod params;
mod remote;
mod session;
mod transport;

pub use error::{ConnectionError, DriverError, MoveRejection};
pub use params::{ConnectParams, DriverOptions};
pub use remote::RemoteDriver;
pub use session::Session;
pub use transport::{HttpTransport, Reply};

use crate::model::{GameState, Move};
use async_trait::async_trait;
use std::sync::Arc;

/// What the view layer needs from a game.
#[async_trait]
pub trait Game: Send + Sync {
    /// The last synchronized state. Never blocks on the network.
    fn state(&self) -> Arc<GameState>;

    /// Submits one move; `Ok(true)` once the server accepted it and the
    /// refreshed state is installed.
    async fn take_turn(&self, mv: &Move) -> Result<bool, DriverError>;

    /// Starts a fresh game on the same server.
    async fn restart(&self) -> Result<bool, DriverError> {
        Err(DriverError::RestartUnsupported)
    }

    /// True if [`restart`](Game::restart) can succeed.
    fn supports_restart(&self) -> bool {
        false
    }
}

/// Observable driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum DriverPhase {
    /// A restart handshake is in flight.
    Connecting,
    /// Synchronized and waiting for a move.
    Ready,
    /// A move submission is in flight.
    Submitting,
    /// The server reported a result.
    Ended,
}
