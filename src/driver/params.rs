//! Connection parameters and driver options.

use crate::config::ConfigError;
use crate::protocol::Revision;
use derive_getters::Getters;
use derive_new::new;
use reqwest::Url;
use std::time::Duration;
use tracing::instrument;

/// Where the server lives.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ConnectParams {
    /// Host name or URL.
    host: String,
    /// TCP port.
    port: u16,
}

impl ConnectParams {
    /// Parses a route-style query string such as `host=example.com&port=8080`.
    ///
    /// A leading `?` is ignored.
    #[instrument]
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let url = Url::parse(&format!("http://query.invalid/?{}", query))
            .map_err(|e| ConfigError::new(format!("Invalid query string: {}", e)))?;
        let mut host = None;
        let mut port = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "host" => host = Some(value.into_owned()),
                "port" => port = Some(value.into_owned()),
                _ => {}
            }
        }
        let host = host
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| ConfigError::new("Missing host parameter".to_string()))?;
        let port = port
            .ok_or_else(|| ConfigError::new("Missing port parameter".to_string()))?
            .parse::<u16>()
            .map_err(|e| ConfigError::new(format!("Invalid port parameter: {}", e)))?;
        Ok(Self::new(host, port))
    }

    /// Base URL of the server. A host without a scheme gets `http://`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let host = self.host.trim_end_matches('/');
        let text = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        let mut url = Url::parse(&text)
            .map_err(|e| ConfigError::new(format!("Invalid host {}: {}", self.host, e)))?;
        url.set_port(Some(self.port))
            .map_err(|_| ConfigError::new(format!("Host {} cannot take a port", self.host)))?;
        Ok(url)
    }
}

/// How a driver talks to the server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct DriverOptions {
    /// Protocol revision the server speaks.
    revision: Revision,
    /// Per-request timeout.
    timeout: Duration,
    /// Local player's name, seated as white.
    white: String,
    /// Opponent's name, seated as black.
    black: String,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self::new(
            Revision::default(),
            Duration::from_secs(10),
            "white".to_string(),
            "black".to_string(),
        )
    }
}

impl DriverOptions {
    /// Same options with a different revision.
    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let params = ConnectParams::from_query("?host=example.com&port=8080").unwrap();
        assert_eq!(params.host(), "example.com");
        assert_eq!(*params.port(), 8080);
    }

    #[test]
    fn test_from_query_rejects_missing_or_bad() {
        assert!(ConnectParams::from_query("port=8080").is_err());
        assert!(ConnectParams::from_query("host=a").is_err());
        assert!(ConnectParams::from_query("host=a&port=99999").is_err());
        assert!(ConnectParams::from_query("host=&port=1").is_err());
    }

    #[test]
    fn test_base_url_adds_scheme() {
        let url = ConnectParams::new("localhost".to_string(), 3000).base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/");
        let url = ConnectParams::new("https://chess.test".to_string(), 8443)
            .base_url()
            .unwrap();
        assert_eq!(url.as_str(), "https://chess.test:8443/");
    }
}
