//! Driver error types.

use crate::protocol::ProtocolError;
use derive_more::{Display, Error};
use tracing::instrument;

/// Transport failure, timeout or refused handshake.
#[derive(Debug, Clone, Display, Error)]
#[display("Connection error: {} at {}:{}", message, file, line)]
pub struct ConnectionError {
    /// Error message.
    pub message: String,
    /// HTTP status, when the server answered.
    pub status: Option<u16>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConnectionError {
    /// Creates a new connection error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            status: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an error for a request the server refused with `status`.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn refused(status: u16, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            status: Some(status),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for ConnectionError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let mut error = Self::new(format!("HTTP request failed: {}", err));
        error.status = status;
        error
    }
}

/// The server refused a submitted move.
///
/// Not an error: `take_turn` reports it as `Ok(false)` and keeps it for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("move rejected ({}): {}", status, message)]
pub struct MoveRejection {
    /// HTTP status of the refusal.
    pub status: u16,
    /// Server-supplied reason.
    pub message: String,
}

/// Everything a [`Game`](super::Game) operation can fail with.
#[derive(Debug, Clone, Display, Error)]
pub enum DriverError {
    /// The server could not be reached or refused the session.
    #[display("{}", _0)]
    Connection(ConnectionError),
    /// The server answered with something undecodable.
    #[display("{}", _0)]
    Protocol(ProtocolError),
    /// Another submission is still waiting for its response.
    #[display("a move submission is already pending")]
    SubmissionPending,
    /// This game cannot be restarted.
    #[display("restart is not supported by this game")]
    RestartUnsupported,
}

impl From<ConnectionError> for DriverError {
    fn from(err: ConnectionError) -> Self {
        DriverError::Connection(err)
    }
}

impl From<ProtocolError> for DriverError {
    fn from(err: ProtocolError) -> Self {
        DriverError::Protocol(err)
    }
}

impl From<reqwest::Error> for DriverError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        DriverError::Connection(err.into())
    }
}

impl From<serde_json::Error> for DriverError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        DriverError::Protocol(err.into())
    }
}
