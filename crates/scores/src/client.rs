//! Async score service client
//!
//! Speaks just enough HTTP/1.1 over a tokio `TcpStream` to submit a score
//! and fetch the leaderboard: one request per connection, `Connection: close`.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::ScoreConfig;
use crate::error::{Result, ScoreError};
use crate::store::ScoreRow;

#[derive(Debug, Deserialize)]
struct SubmitReply {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct LeaderboardReply {
    data: Vec<ScoreRow>,
}

/// Client for one score service address
#[derive(Debug, Clone)]
pub struct ScoreClient {
    addr: String,
    timeout: Duration,
}

impl ScoreClient {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ScoreConfig) -> Self {
        Self::new(config.addr(), Duration::from_millis(config.timeout_ms))
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// `POST /scores`; returns the stored id
    pub async fn submit(&self, name: &str, score: u32) -> Result<u64> {
        let body = json!({ "name": name, "score": score }).to_string();
        let reply = self.request("POST", "/scores", Some(&body)).await?;
        Ok(serde_json::from_value::<SubmitReply>(reply)?.id)
    }

    /// `GET /scores`; the top 10, best first
    pub async fn leaderboard(&self) -> Result<Vec<ScoreRow>> {
        let reply = self.request("GET", "/scores", None).await?;
        Ok(serde_json::from_value::<LeaderboardReply>(reply)?.data)
    }

    async fn request(&self, method: &str, path: &str, body: Option<&str>) -> Result<Value> {
        let exchange = async {
            let mut stream = TcpStream::connect(&self.addr).await?;
            stream
                .write_all(encode_request(method, &self.addr, path, body).as_bytes())
                .await?;

            let mut raw = Vec::new();
            stream.read_to_end(&mut raw).await?;
            Ok::<_, ScoreError>(raw)
        };

        let raw = timeout(self.timeout, exchange)
            .await
            .map_err(|_| ScoreError::Timeout(format!("{method} {path} to {}", self.addr)))??;
        parse_response(&raw)
    }
}

fn encode_request(method: &str, host: &str, path: &str, body: Option<&str>) -> String {
    let body = body.unwrap_or("");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n");
    if !body.is_empty() {
        req.push_str("Content-Type: application/json\r\n");
    }
    req.push_str(&format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
    req
}

/// Split a raw HTTP response into status and JSON body
///
/// Non-2xx statuses become [`ScoreError::Http`] carrying the body's `error`
/// field when present.
pub fn parse_response(raw: &[u8]) -> Result<Value> {
    let text = String::from_utf8_lossy(raw);
    let (head, body) = text.split_once("\r\n\r\n").ok_or_else(|| ScoreError::Http {
        status: 0,
        message: "truncated response".to_string(),
    })?;

    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| ScoreError::Http {
            status: 0,
            message: "missing status line".to_string(),
        })?;

    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body)?
    };

    if !(200..300).contains(&status) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string());
        return Err(ScoreError::Http { status, message });
    }
    Ok(value)
}
