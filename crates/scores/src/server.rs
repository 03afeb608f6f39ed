//! HTTP score service (tiny_http)
//!
//! Routing is a pure function over (method, path, body) so it can be tested
//! without sockets; [`ScoreServer`] only moves bytes.
//!
//! | Request | Response |
//! |---------|----------|
//! | `GET /scores` | `200 {"message":"success","data":[{"name","score"}...]}` |
//! | `POST /scores` `{name, score}` | `200 {"message":"success","id":N}` |
//! | invalid submission | `400 {"error":...}` |
//! | storage failure | `500 {"error":...}` |
//! | anything else | `404 {"error":"Not Found"}` |
//!
//! `/api/scores` is accepted as an alias of `/scores`.

use std::io::Read;
use std::net::SocketAddr;

use serde::Deserialize;
use serde_json::{json, Value};
use tiny_http::{Header, Request, Response, Server, StatusCode};
use tracing::{debug, info, warn};

use crate::config::ScoreConfig;
use crate::error::{Result, ScoreError};
use crate::store::ScoreStore;

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

/// Submission body; both fields are checked by the store
#[derive(Debug, Deserialize)]
struct Submission {
    name: Option<String>,
    score: Option<Value>,
}

fn is_scores_path(path: &str) -> bool {
    matches!(path, "/scores" | "/api/scores")
}

/// Route one request against the store
pub fn route(store: &mut ScoreStore, method: &str, url: &str, body: &str) -> ApiResponse {
    let path = url.split('?').next().unwrap_or("/");
    if !is_scores_path(path) {
        return ApiResponse::error(404, "Not Found");
    }

    match method {
        "GET" => ApiResponse::ok(json!({
            "message": "success",
            "data": store.leaderboard(),
        })),
        "POST" => submit(store, body),
        _ => ApiResponse::error(404, "Not Found"),
    }
}

fn submit(store: &mut ScoreStore, body: &str) -> ApiResponse {
    let submission: Submission = match serde_json::from_str(body) {
        Ok(s) => s,
        Err(e) => return ApiResponse::error(400, ScoreError::BadRequest(e.to_string()).to_string()),
    };

    // Non-integer scores are treated as missing.
    let score = submission.score.as_ref().and_then(Value::as_i64);
    match store.insert(submission.name.as_deref(), score) {
        Ok(id) => {
            debug!(id, "score stored");
            ApiResponse::ok(json!({ "message": "success", "id": id }))
        }
        Err(e) if e.is_client_error() => ApiResponse::error(400, e.to_string()),
        Err(e) => {
            warn!(error = %e, "failed to store score");
            ApiResponse::error(500, e.to_string())
        }
    }
}

/// Blocking HTTP server over a [`ScoreStore`]
pub struct ScoreServer {
    server: Server,
    store: ScoreStore,
}

impl ScoreServer {
    /// Open the store at `config.db_path` and bind `config.addr()`
    pub fn bind(config: &ScoreConfig) -> Result<Self> {
        let store = ScoreStore::open(&config.db_path)?;
        Self::with_store(&config.addr(), store)
    }

    /// Bind `addr` (use port 0 for an ephemeral port) over an existing store
    pub fn with_store(addr: &str, store: ScoreStore) -> Result<Self> {
        let server = Server::http(addr).map_err(|e| ScoreError::Server(e.to_string()))?;
        Ok(Self { server, store })
    }

    /// Address actually bound
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    /// Serve requests until the listener is closed
    pub fn run(&mut self) {
        if let Some(addr) = self.local_addr() {
            info!(%addr, entries = self.store.len(), "score server listening");
        }
        for request in self.server.incoming_requests() {
            handle(&mut self.store, request);
        }
        info!("score server stopped");
    }
}

fn handle(store: &mut ScoreStore, mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = String::new();
    let response = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => route(store, &method, &url, &body),
        Err(e) => ApiResponse::error(400, e.to_string()),
    };
    info!(%method, %url, status = response.status, "request");

    let mut resp = Response::from_string(response.body.to_string())
        .with_status_code(StatusCode(response.status));
    if let Ok(h) = Header::from_bytes("Content-Type", "application/json") {
        resp.add_header(h);
    }
    if let Err(e) = request.respond(resp) {
        warn!(error = %e, "failed to send response");
    }
}
