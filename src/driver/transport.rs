//! HTTP plumbing: one client per driver, raw replies, rejection detection.

use super::{ConnectionError, MoveRejection};
use reqwest::{Method, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Raw server reply.
#[derive(Debug, Clone)]
pub struct Reply {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl Reply {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Classifies the reply as a refusal.
    ///
    /// A non-success status refuses; so does a success status whose body
    /// is an object carrying a non-null `error` key.
    pub fn rejection(&self) -> Option<MoveRejection> {
        let parsed = serde_json::from_str::<Value>(&self.body).ok();
        let object = parsed.as_ref().and_then(Value::as_object);
        let flagged = object
            .and_then(|o| o.get("error"))
            .filter(|e| !e.is_null());
        if self.is_success() && flagged.is_none() {
            return None;
        }
        let message = flagged
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(Value::as_str)))
            .or_else(|| object.and_then(|o| o.get("message")).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| {
                let text = self.body.trim();
                if text.is_empty() {
                    format!("HTTP {}", self.status)
                } else {
                    text.to_string()
                }
            });
        Some(MoveRejection {
            status: self.status,
            message,
        })
    }
}

/// Thin wrapper around `reqwest::Client` bound to one server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    /// Builds a client with the given request timeout.
    #[instrument(skip(base), fields(base = %base))]
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ConnectionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Server base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Sends one request and collects the reply.
    #[instrument(skip(self, token, body), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Reply, ConnectionError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ConnectionError::new(format!("Invalid request path {}: {}", path, e)))?;
        let mut request = self.client.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Got reply");
        Ok(Reply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> Reply {
        Reply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_is_not_rejection() {
        assert!(reply(200, r#"{"ok":true}"#).rejection().is_none());
        assert!(reply(204, "").rejection().is_none());
        assert!(reply(200, r#"{"error":null,"state":{}}"#).rejection().is_none());
    }

    #[test]
    fn test_error_key_rejects_on_success_status() {
        let rejection = reply(200, r#"{"error":"illegal move"}"#).rejection().unwrap();
        assert_eq!(rejection.status, 200);
        assert_eq!(rejection.message, "illegal move");
    }

    #[test]
    fn test_status_rejects() {
        let rejection = reply(400, r#"{"message":"not your turn"}"#).rejection().unwrap();
        assert_eq!(rejection.message, "not your turn");
        assert_eq!(reply(409, "").rejection().unwrap().message, "HTTP 409");
        assert_eq!(reply(422, "nope").rejection().unwrap().message, "nope");
        let nested = reply(400, r#"{"error":{"message":"bad"}}"#).rejection().unwrap();
        assert_eq!(nested.message, "bad");
    }
}
