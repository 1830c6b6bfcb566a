//! HTTP handlers and the state they share

use std::{sync::Arc, time::Duration};

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

use crate::clients::RecentTracksSource;
use crate::config::{DEFAULT_TIMEOUT, REQUEST_TIMEOUT_MARGIN};

/// Liveness endpoint
pub mod health;
/// Latest played song lookup
pub mod latest_song;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<Arc<str>>,
    pub lastfm: Arc<dyn RecentTracksSource>,
    /// Upper bound for a whole request, enforced by the router
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(api_key: Option<String>, lastfm: Arc<dyn RecentTracksSource>) -> Self {
        AppState {
            api_key: api_key.map(Arc::from),
            lastfm,
            request_timeout: DEFAULT_TIMEOUT + REQUEST_TIMEOUT_MARGIN,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// `{"message": ...}` body used by every non-track response
#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: &'static str,
}

pub(crate) fn message(status: StatusCode, message: &'static str) -> Response {
    (status, Json(MessageBody { message })).into_response()
}
