use std::{net::SocketAddr, time::Duration};

use log::warn;

use crate::clients::{
    errors::{Error, Result},
    lastfm::LASTFM_BASE_URL,
};

/// Upper bound for a single Last.fm call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Headroom a whole request gets on top of the Last.fm call
pub const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);
pub const DEFAULT_PORT: u16 = 8080;

/// Process configuration, built once at startup and handed to the server
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub timeout: Duration,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
}

#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    api_base_url: Option<String>,
    timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    bind_addr: Option<SocketAddr>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    pub fn build(self) -> Result<Config> {
        // Blank keys count as missing
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            // Not fatal: latest-song requests answer INTERNAL_ERROR until a key is provided
            warn!("LASTFM_API_KEY is not set, latest song lookups will fail");
        }

        let api_base_url = self
            .api_base_url
            .unwrap_or_else(|| LASTFM_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(Error::ConfigurationError(format!(
                "Last.fm base URL must be an http(s) URL, got {api_base_url:?}"
            )));
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(Error::ConfigurationError(
                "Last.fm timeout must be greater than zero".into(),
            ));
        }

        let request_timeout = self
            .request_timeout
            .unwrap_or(timeout + REQUEST_TIMEOUT_MARGIN);
        if request_timeout.is_zero() {
            return Err(Error::ConfigurationError(
                "Request timeout must be greater than zero".into(),
            ));
        }
        if request_timeout <= timeout {
            warn!("Request timeout {request_timeout:?} does not exceed the Last.fm timeout {timeout:?}");
        }

        Ok(Config {
            api_key,
            api_base_url,
            timeout,
            request_timeout,
            bind_addr: self
                .bind_addr
                .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConfigBuilder::new()
            .api_key(Some("key".into()))
            .build()
            .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.api_base_url, LASTFM_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        for key in [None, Some(String::new()), Some("   ".to_string())] {
            let config = ConfigBuilder::new().api_key(key).build().unwrap();
            assert!(config.api_key.is_none());
        }
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = ConfigBuilder::new()
            .api_base_url("ws.audioscrobbler.com/2.0/")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn request_timeout_follows_lastfm_timeout() {
        let config = ConfigBuilder::new()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(8));

        let config = ConfigBuilder::new()
            .request_timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ConfigBuilder::new()
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }
}
