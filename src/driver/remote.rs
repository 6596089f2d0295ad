//! HTTP-backed [`Game`] implementation.

use super::session::Session;
use super::transport::HttpTransport;
use super::{
    ConnectParams, ConnectionError, DriverError, DriverOptions, DriverPhase, Game, MoveRejection,
};
use crate::model::{GameState, Move};
use crate::protocol::Protocol;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Session and state, always swapped together.
#[derive(Debug)]
struct Live {
    session: Arc<Session>,
    state: Arc<GameState>,
}

/// Clears the restarting flag when a restart finishes or is dropped.
struct Restarting<'a>(&'a AtomicBool);

impl Drop for Restarting<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A game played against a remote authoritative server.
///
/// Exists only after a successful connect. Every move is round-tripped;
/// the held state advances only on a decoded server response, taken from
/// the submit reply when it carries one and from a fresh fetch otherwise.
#[derive(Debug)]
pub struct RemoteDriver {
    transport: HttpTransport,
    protocol: Protocol,
    options: DriverOptions,
    live: RwLock<Live>,
    last_rejection: RwLock<Option<MoveRejection>>,
    submit_slot: tokio::sync::Mutex<()>,
    restart_slot: tokio::sync::Mutex<()>,
    restarting: AtomicBool,
    generations: AtomicU64,
}

impl RemoteDriver {
    /// Connects with explicit options.
    ///
    /// Performs the revision's handshake and the initial fetch. No driver is
    /// returned on any failure.
    #[instrument(skip_all, fields(host = %params.host(), port = params.port(), revision = %options.revision()))]
    pub async fn connect(
        params: &ConnectParams,
        options: DriverOptions,
    ) -> Result<Self, DriverError> {
        info!("Connecting to game server");
        let base = params
            .base_url()
            .map_err(|e| ConnectionError::new(e.message))?;
        let transport = HttpTransport::new(base, *options.timeout())?;
        let protocol = Protocol::for_revision(*options.revision());
        let (session, state) = open(&transport, protocol, &options, 1).await?;
        info!(base = %transport.base(), session_id = session.generation(), "Connected");
        Ok(Self {
            transport,
            protocol,
            options,
            live: RwLock::new(Live {
                session: Arc::new(session),
                state: Arc::new(state),
            }),
            last_rejection: RwLock::new(None),
            submit_slot: tokio::sync::Mutex::new(()),
            restart_slot: tokio::sync::Mutex::new(()),
            restarting: AtomicBool::new(false),
            generations: AtomicU64::new(1),
        })
    }

    /// Connects to `host:port` with default options.
    pub async fn connect_to(host: &str, port: u16) -> Result<Self, DriverError> {
        Self::connect(
            &ConnectParams::new(host.to_string(), port),
            DriverOptions::default(),
        )
        .await
    }

    /// Options this driver was connected with.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// The most recent refusal, cleared by the next accepted move.
    pub fn last_rejection(&self) -> Option<MoveRejection> {
        self.last_rejection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generation of the live session.
    pub fn session_id(&self) -> u64 {
        self.live
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .session
            .generation()
    }

    /// Where the driver is in its lifecycle.
    pub fn phase(&self) -> DriverPhase {
        if self.restarting.load(Ordering::SeqCst) {
            DriverPhase::Connecting
        } else if self.submit_slot.try_lock().is_err() {
            DriverPhase::Submitting
        } else if self.state().is_over() {
            DriverPhase::Ended
        } else {
            DriverPhase::Ready
        }
    }

    fn snapshot(&self) -> (Arc<Session>, Arc<GameState>) {
        let live = self.live.read().unwrap_or_else(PoisonError::into_inner);
        (Arc::clone(&live.session), Arc::clone(&live.state))
    }

    fn set_rejection(&self, rejection: Option<MoveRejection>) {
        *self
            .last_rejection
            .write()
            .unwrap_or_else(PoisonError::into_inner) = rejection;
    }
}

/// Handshake plus initial fetch.
async fn open(
    transport: &HttpTransport,
    protocol: Protocol,
    options: &DriverOptions,
    generation: u64,
) -> Result<(Session, GameState), DriverError> {
    let session = Session::open(transport, options, generation).await?;
    let state = fetch(transport, protocol, &session).await?;
    Ok((session, state))
}

#[instrument(skip_all, fields(session_id = session.generation()))]
async fn fetch(
    transport: &HttpTransport,
    protocol: Protocol,
    session: &Session,
) -> Result<GameState, DriverError> {
    let reply = transport
        .request(Method::GET, &session.state_path(), session.token(), None)
        .await?;
    if let Some(rejection) = reply.rejection() {
        return Err(ConnectionError::refused(
            rejection.status,
            format!("Server refused state fetch: {}", rejection.message),
        )
        .into());
    }
    let state = protocol.decode_body(&reply.body)?;
    debug!(
        active = %state.active(),
        moves = state.moves().len(),
        over = state.is_over(),
        "Fetched state"
    );
    Ok(state)
}

#[async_trait]
impl Game for RemoteDriver {
    fn state(&self) -> Arc<GameState> {
        self.snapshot().1
    }

    #[instrument(skip(self, mv), fields(mv = %mv))]
    async fn take_turn(&self, mv: &Move) -> Result<bool, DriverError> {
        let Ok(_slot) = self.submit_slot.try_lock() else {
            warn!("Submission already pending");
            return Err(DriverError::SubmissionPending);
        };
        let (session, state) = self.snapshot();
        if state.is_over() {
            info!("Game is over, move not sent");
            return Ok(false);
        }

        let body = self.protocol.encode_submission(mv)?;
        let (method, path) = session.submit_route();
        let reply = self
            .transport
            .request(method, &path, session.token(), Some(&body))
            .await?;
        if let Some(rejection) = reply.rejection() {
            info!(status = rejection.status, message = %rejection.message, "Move rejected");
            self.set_rejection(Some(rejection));
            return Ok(false);
        }

        let fresh = match self.protocol.decode_body(&reply.body) {
            Ok(state) => state,
            Err(err) => {
                debug!(error = %err, "Submit reply carries no state, fetching");
                fetch(&self.transport, self.protocol, &session).await?
            }
        };
        let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
        if live.session.generation() != session.generation() {
            debug!(
                submitted = session.generation(),
                live = live.session.generation(),
                "Discarding response from a replaced session"
            );
            return Ok(false);
        }
        live.state = Arc::new(fresh);
        drop(live);
        self.set_rejection(None);
        info!("Move accepted");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn restart(&self) -> Result<bool, DriverError> {
        if !self.supports_restart() {
            return Err(DriverError::RestartUnsupported);
        }
        let _slot = self.restart_slot.lock().await;
        self.restarting.store(true, Ordering::SeqCst);
        let _flag = Restarting(&self.restarting);

        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let (session, state) = open(&self.transport, self.protocol, &self.options, generation).await?;
        let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
        *live = Live {
            session: Arc::new(session),
            state: Arc::new(state),
        };
        drop(live);
        self.set_rejection(None);
        info!(session_id = generation, "Game restarted");
        Ok(true)
    }

    fn supports_restart(&self) -> bool {
        self.protocol.revision().supports_restart()
    }
}
