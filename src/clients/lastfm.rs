use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::clients::{
    entities::{ApiErrorResponse, RecentTracksResponse, Track},
    errors::{Error, Result},
};

pub const LASTFM_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Anything able to look up the most recently played track of a user.
///
/// Handlers only talk to this trait so tests can swap the real client out.
#[async_trait]
pub trait RecentTracksSource: Send + Sync {
    /// Most recent track of `user`, `None` when the user has no scrobbles
    async fn latest_track(&self, api_key: &str, user: &str) -> Result<Option<Track>>;
}

pub struct LastFmClient {
    http: reqwest::Client,
    base_url: String,
}

impl LastFmClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        LastFmClient {
            http,
            base_url: base_url.into(),
        }
    }

    // Build a client whose every request is bounded by `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConfigurationError(format!("Failed to build HTTP client: {e}")))?;
        Ok(LastFmClient::new(http, base_url))
    }
}

#[async_trait]
impl RecentTracksSource for LastFmClient {
    async fn latest_track(&self, api_key: &str, user: &str) -> Result<Option<Track>> {
        debug!("Requesting recent tracks of {user} from Last.fm");
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("method", "user.getrecenttracks"),
                ("limit", "1"),
                ("format", "json"),
                ("user", user),
                ("api_key", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Prefer Last.fm's own error description when it sent one
            return Err(match serde_json::from_slice::<ApiErrorResponse>(&body) {
                Ok(err) => Error::LastFMApiError {
                    code: err.error,
                    message: err.message,
                },
                Err(_) => Error::LastFMUnexpectedStatus(status.as_u16()),
            });
        }

        // Last.fm occasionally reports errors with a 200
        if let Ok(err) = serde_json::from_slice::<ApiErrorResponse>(&body) {
            return Err(Error::LastFMApiError {
                code: err.error,
                message: err.message,
            });
        }

        let payload: RecentTracksResponse = serde_json::from_slice(&body)?;
        let track = payload.into_latest_track()?;
        debug!(
            "Last.fm returned {} for {user}",
            if track.is_some() { "a track" } else { "no tracks" }
        );
        Ok(track)
    }
}
