//! Checkmate client library - chess against a remote authoritative server
//!
//! The server owns the rules. This library translates its wire formats,
//! round-trips every move, and resolves pointer gestures into legal moves.
//!
//! # Architecture
//!
//! - **Model**: squares, pieces, moves, board and game state
//! - **Protocol**: one translator per server revision, picked by configuration
//! - **Driver**: the HTTP session behind the [`Game`] trait
//! - **Interaction**: drag-and-drop state machine and its controller
//!
//! # Example
//!
//! ```no_run
//! use checkmate_client::{BoardController, ClientConfig, RemoteDriver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default();
//! let driver = RemoteDriver::connect(&config.connect_params(), config.driver_options()).await?;
//! let controller = BoardController::new(driver);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod interaction;
mod model;
mod preferences;
pub mod protocol;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Driver
pub use driver::{
    ConnectParams, ConnectionError, DriverError, DriverOptions, DriverPhase, Game, HttpTransport,
    MoveRejection, RemoteDriver, Reply, Session,
};

// Crate-level exports - Interaction
pub use interaction::{
    BoardController, BoardInteraction, Drag, GesturePhase, Offset, Outcome, Resolution, candidates,
    move_targets,
};

// Crate-level exports - Model
pub use model::{
    Board, Color, EndCondition, FILES, GameResult, GameState, InvalidSquare, Move, Piece, PieceId,
    PieceKind, Players, RANKS, Square,
};

// Crate-level exports - Preferences
pub use preferences::{Preferences, Theme};

// Crate-level exports - Protocol
pub use protocol::{Protocol, ProtocolError, ProtocolErrorKind, Revision, Translator};
