//! Per-connection session: handshake, routes and credentials.

use super::transport::{HttpTransport, Reply};
use super::{ConnectionError, DriverOptions};
use crate::protocol::{ProtocolError, ProtocolErrorKind, Revision};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
struct AuthReply {
    token: String,
}

#[derive(Debug, Deserialize)]
struct LobbyReply {
    id: Value,
}

/// One server-side game as seen by a driver.
///
/// Replaced wholesale on restart; `generation` tells sessions apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    generation: u64,
    revision: Revision,
    token: Option<String>,
    game_id: Option<String>,
}

impl Session {
    /// Performs the revision's handshake and returns the new session.
    #[instrument(skip(transport, options), fields(revision = %options.revision()))]
    pub async fn open(
        transport: &HttpTransport,
        options: &DriverOptions,
        generation: u64,
    ) -> Result<Self, super::DriverError> {
        let revision = *options.revision();
        let mut session = Self {
            generation,
            revision,
            token: None,
            game_id: None,
        };
        match revision {
            Revision::Prototype => {}
            Revision::Envelope | Revision::Unified => {
                let body = json!({ "white": options.white(), "black": options.black() });
                let reply = transport
                    .request(Method::POST, "/game", None, Some(&body))
                    .await?;
                accepted(&reply, "new game")?;
            }
            Revision::Compact => {
                let body = json!({ "name": options.white() });
                let reply = transport
                    .request(Method::POST, "/v1/auth", None, Some(&body))
                    .await?;
                accepted(&reply, "auth")?;
                let auth: AuthReply = serde_json::from_str(&reply.body)?;
                debug!("Authenticated");

                let body = json!({ "game": "new" });
                let reply = transport
                    .request(Method::POST, "/v1/lobby", Some(&auth.token), Some(&body))
                    .await?;
                accepted(&reply, "lobby")?;
                let lobby: LobbyReply = serde_json::from_str(&reply.body)?;
                session.token = Some(auth.token);
                session.game_id = Some(game_id(&lobby.id)?);
            }
        }
        info!(game_id = ?session.game_id, "Session opened");
        Ok(session)
    }

    /// Distinguishes this session from its predecessors.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bearer token, when the revision authenticates.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Path of the state resource.
    pub fn state_path(&self) -> String {
        match (&self.revision, &self.game_id) {
            (Revision::Compact, Some(id)) => format!("/v1/games/{}", id),
            _ => "/game".to_string(),
        }
    }

    /// Method and path of the move submission.
    pub fn submit_route(&self) -> (Method, String) {
        match self.revision {
            Revision::Prototype => (Method::POST, self.state_path()),
            _ => (Method::PUT, self.state_path()),
        }
    }
}

fn accepted(reply: &Reply, step: &str) -> Result<(), ConnectionError> {
    match reply.rejection() {
        Some(rejection) => Err(ConnectionError::refused(
            rejection.status,
            format!("Server refused {}: {}", step, rejection.message),
        )),
        None => Ok(()),
    }
}

fn game_id(id: &Value) -> Result<String, ProtocolError> {
    match id {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        _ => Err(ProtocolError::new(ProtocolErrorKind::MissingField("id"))),
    }
}
