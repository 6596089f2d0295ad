//! In-process mock chess servers and wire fixtures.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use checkmate_client::protocol::{color_from_letter, glyph, kind_from_letter};
use checkmate_client::Revision;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "secret-token";

/// Scripted server: serves `current`, installs `after_move` on a legal
/// submission and replies with it, and starts each new game from `queued`
/// or else `fresh`.
pub struct Mock {
    pub fresh: Value,
    pub after_move: Value,
    pub queued: Mutex<VecDeque<Value>>,
    pub current: Mutex<Value>,
    pub submissions: AtomicUsize,
    pub handshakes: AtomicUsize,
    pub last_submission: Mutex<Option<Value>>,
    pub submit_delay: Duration,
    pub refuse_auth: bool,
    pub bare_reply: bool,
    pub failing_fetch: AtomicBool,
    pub failing_new_games: AtomicBool,
}

impl Mock {
    pub fn new(fresh: Value, after_move: Value) -> Self {
        Self {
            current: Mutex::new(fresh.clone()),
            fresh,
            after_move,
            queued: Mutex::new(VecDeque::new()),
            submissions: AtomicUsize::new(0),
            handshakes: AtomicUsize::new(0),
            last_submission: Mutex::new(None),
            submit_delay: Duration::ZERO,
            refuse_auth: false,
            bare_reply: false,
            failing_fetch: AtomicBool::new(false),
            failing_new_games: AtomicBool::new(false),
        }
    }

    pub fn with_queued(self, game: Value) -> Self {
        self.queued.lock().unwrap().push_back(game);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn refusing_auth(mut self) -> Self {
        self.refuse_auth = true;
        self
    }

    /// Answers accepted submissions with `{"ok": true}` instead of the state.
    pub fn with_bare_reply(mut self) -> Self {
        self.bare_reply = true;
        self
    }

    pub fn fail_fetches(&self) {
        self.failing_fetch.store(true, Ordering::SeqCst);
    }

    pub fn fail_new_games(&self) {
        self.failing_new_games.store(true, Ordering::SeqCst);
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    fn new_game(&self) -> usize {
        let next = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fresh.clone());
        *self.current.lock().unwrap() = next;
        self.handshakes.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Starts a mock speaking `revision` on an ephemeral port.
pub async fn spawn(revision: Revision, mock: Arc<Mock>) -> u16 {
    let app = match revision {
        Revision::Compact => Router::new()
            .route("/v1/auth", post(auth))
            .route("/v1/lobby", post(lobby))
            .route("/v1/games/{id}", get(fetch).put(submit)),
        Revision::Envelope | Revision::Unified => {
            Router::new().route("/game", get(fetch).post(new_game).put(submit))
        }
        Revision::Prototype => Router::new().route("/game", get(fetch).post(submit)),
    }
    .with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    port
}

async fn auth(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if mock.refuse_auth || body.get("name").and_then(Value::as_str).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unknown player" })));
    }
    (StatusCode::OK, Json(json!({ "token": TOKEN })))
}

async fn lobby(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = format!("Bearer {}", TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == bearer);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "no token" })));
    }
    if mock.failing_new_games.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "lobby closed" })));
    }
    let id = mock.new_game();
    (StatusCode::OK, Json(json!({ "id": id })))
}

async fn new_game(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body.get("white").is_none() || body.get("black").is_none() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "players required" })));
    }
    if mock.failing_new_games.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "lobby closed" })));
    }
    mock.new_game();
    (StatusCode::OK, Json(json!({})))
}

async fn fetch(State(mock): State<Arc<Mock>>) -> (StatusCode, Json<Value>) {
    if mock.failing_fetch.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": "busy" })));
    }
    (StatusCode::OK, Json(mock.current.lock().unwrap().clone()))
}

async fn submit(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    mock.submissions.fetch_add(1, Ordering::SeqCst);
    *mock.last_submission.lock().unwrap() = Some(body.clone());
    if !mock.submit_delay.is_zero() {
        tokio::time::sleep(mock.submit_delay).await;
    }
    let legal = is_legal(&mock.current.lock().unwrap(), &body);
    if !legal {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "illegal move" })));
    }
    *mock.current.lock().unwrap() = mock.after_move.clone();
    if mock.bare_reply {
        return (StatusCode::OK, Json(json!({ "ok": true })));
    }
    (StatusCode::OK, Json(mock.after_move.clone()))
}

fn is_legal(current: &Value, body: &Value) -> bool {
    if let Some(notation) = body.get("move") {
        return list(current, &["moves"]).iter().any(|m| m.get("move") == Some(notation));
    }
    let moves = match current.get("state") {
        Some(_) => list(current, &["state", "legal_moves"]),
        None => list(current, &["legal_moves"]),
    };
    moves.iter().any(|m| m == body)
}

fn list(value: &Value, path: &[&str]) -> Vec<Value> {
    let mut at = value;
    for key in path {
        match at.get(key) {
            Some(next) => at = next,
            None => return Vec::new(),
        }
    }
    at.as_array().cloned().unwrap_or_default()
}

/// `(color, kind, square)` for the standard starting position.
pub fn start_position() -> Vec<(char, char, String)> {
    let mut pieces = Vec::new();
    for (i, kind) in "RNBQKBNR".chars().enumerate() {
        let file = (b'a' + i as u8) as char;
        pieces.push(('w', kind, format!("{}1", file)));
        pieces.push(('w', 'P', format!("{}2", file)));
        pieces.push(('b', 'P', format!("{}7", file)));
        pieces.push(('b', kind, format!("{}8", file)));
    }
    pieces
}

/// Moves the piece on `from` to `to` in a position list.
pub fn moved(mut pieces: Vec<(char, char, String)>, from: &str, to: &str) -> Vec<(char, char, String)> {
    pieces.retain(|(_, _, square)| square != to);
    for piece in &mut pieces {
        if piece.2 == from {
            piece.2 = to.to_string();
        }
    }
    pieces
}

/// Compact board entries, e.g. `"wPa2"`.
pub fn compact_board(pieces: &[(char, char, String)]) -> Value {
    pieces
        .iter()
        .map(|(color, kind, square)| Value::String(format!("{}{}{}", color, kind, square)))
        .collect()
}

pub fn compact_fresh() -> Value {
    json!({
        "board": compact_board(&start_position()),
        "active": "w",
        "moves": [
            { "move": "a2a3", "piece": "wP" },
            { "move": "a2a4", "piece": "wP" },
            { "move": "g1f3", "piece": "wN" }
        ],
        "history": []
    })
}

pub fn compact_after() -> Value {
    json!({
        "board": compact_board(&moved(start_position(), "a2", "a4")),
        "active": "b",
        "moves": [ { "move": "a7a5", "piece": "bP" } ],
        "history": [ { "move": "a2a4", "piece": "wP" } ]
    })
}

pub fn compact_finished() -> Value {
    json!({
        "board": ["wKh1", "bQg2", "bKf3"],
        "active": "w",
        "moves": [],
        "history": [ { "move": "g3g2", "piece": "bQ" } ],
        "end": { "winner": "b", "condition": "checkmate" }
    })
}

/// Glyph/id pair for a structured piece; ids are color plus start square.
pub fn tagged(color: char, kind: char, id: &str) -> Value {
    let color = color_from_letter(&color.to_string()).unwrap();
    let kind = kind_from_letter(&kind.to_string()).unwrap();
    json!([glyph(kind, color).to_string(), id])
}

pub fn structured_board(pieces: &[(char, char, String)], history: Vec<Value>) -> Value {
    let pieces: Vec<Value> = pieces
        .iter()
        .map(|(color, kind, square)| {
            json!([square, tagged(*color, *kind, &format!("{}{}", color, square))])
        })
        .collect();
    json!({ "ranks": "12345678", "files": "abcdefgh", "pieces": pieces, "history": history })
}

pub fn pawn_push() -> Value {
    json!({ "piece": tagged('w', 'P', "wa2"), "from": "a2", "to": "a4" })
}

pub fn envelope_fresh() -> Value {
    json!({
        "state": {
            "board": structured_board(&start_position(), vec![]),
            "turn": "white",
            "legal_moves": [
                pawn_push(),
                { "piece": tagged('w', 'N', "wg1"), "from": "g1", "to": "f3" }
            ]
        },
        "players": { "white": "alice", "black": "bob" }
    })
}

pub fn envelope_after() -> Value {
    json!({
        "state": {
            "board": structured_board(&moved(start_position(), "a2", "a4"), vec![pawn_push()]),
            "turn": "black",
            "result": null,
            "legal_moves": [
                { "piece": tagged('b', 'P', "ba7"), "from": "a7", "to": "a5" }
            ]
        },
        "players": { "white": "alice", "black": "bob" }
    })
}

pub fn prototype_fresh() -> Value {
    json!({
        "legal_moves": [ pawn_push() ],
        "board": structured_board(&start_position(), vec![]),
        "turn": "white",
        "players": { "white": "alice", "black": "bob" }
    })
}

pub fn prototype_after() -> Value {
    json!({
        "legal_moves": [ { "piece": tagged('b', 'P', "ba7"), "from": "a7", "to": "a5" } ],
        "board": structured_board(&moved(start_position(), "a2", "a4"), vec![pawn_push()]),
        "turn": "black",
        "players": { "white": "alice", "black": "bob" }
    })
}

/// White pawn on b7 with all four promotions listed, pieces carrying ids.
pub fn envelope_promotion() -> Value {
    let pieces = vec![
        ('w', 'K', "e1".to_string()),
        ('b', 'K', "h8".to_string()),
        ('w', 'P', "b7".to_string()),
    ];
    let choices: Vec<Value> = ['Q', 'R', 'B', 'N']
        .iter()
        .map(|kind| {
            json!({
                "piece": tagged('w', 'P', "wb7"),
                "from": "b7",
                "to": "b8",
                "promotion_to": tagged('w', *kind, &format!("w{}9", kind)),
                "promotion_from": tagged('w', 'P', "wb7")
            })
        })
        .collect();
    json!({
        "state": {
            "board": structured_board(&pieces, vec![]),
            "turn": "white",
            "legal_moves": choices
        },
        "players": { "white": "alice", "black": "bob" }
    })
}
