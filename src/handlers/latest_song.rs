use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::clients::{
    entities::{NormalizedTrack, ShieldsBadge},
    errors::{Error, Result},
};
use crate::handlers::{AppState, message};

pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
pub const NO_TRACKS_FOUND: &str = "NO_TRACKS_FOUND";
/// `format` query value selecting the badge response
pub const SHIELDS_FORMAT: &str = "shields.io";

#[derive(Deserialize, Debug, Default)]
pub struct LatestSongParams {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Track,
    Shields,
}

impl ResponseFormat {
    // Anything but an exact `shields.io` gets the plain track payload
    pub fn from_query(format: Option<&str>) -> Self {
        match format {
            Some(SHIELDS_FORMAT) => ResponseFormat::Shields,
            _ => ResponseFormat::Track,
        }
    }
}

/// Successful outcomes of a lookup
#[derive(Debug)]
pub enum LatestSong {
    NoTracks,
    Track(NormalizedTrack),
    Badge(ShieldsBadge),
}

#[derive(Serialize)]
struct TrackBody {
    track: NormalizedTrack,
}

impl IntoResponse for LatestSong {
    fn into_response(self) -> Response {
        match self {
            LatestSong::NoTracks => message(StatusCode::OK, NO_TRACKS_FOUND),
            LatestSong::Track(track) => (StatusCode::OK, Json(TrackBody { track })).into_response(),
            LatestSong::Badge(badge) => (StatusCode::OK, Json(badge)).into_response(),
        }
    }
}

/// `GET /{user}/latest-song`
///
/// Every failure, whatever its cause, is logged and answered with
/// `500 {"message": "INTERNAL_ERROR"}`.
pub async fn latest_song(
    State(state): State<AppState>,
    Path(user): Path<String>,
    params: std::result::Result<Query<LatestSongParams>, QueryRejection>,
) -> Response {
    let format = match &params {
        Ok(Query(p)) => ResponseFormat::from_query(p.format.as_deref()),
        Err(e) => {
            debug!("Ignoring unparsable query string: {e}");
            ResponseFormat::Track
        }
    };

    match lookup(&state, &user, format).await {
        Ok(song) => song.into_response(),
        Err(e) => {
            error!("Latest song lookup for {user} failed: {e}");
            message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

pub async fn lookup(state: &AppState, user: &str, format: ResponseFormat) -> Result<LatestSong> {
    let api_key = state.api_key.as_deref().ok_or(Error::MissingApiKey)?;

    let Some(track) = state.lastfm.latest_track(api_key, user).await? else {
        info!("No tracks found for {user}");
        return Ok(LatestSong::NoTracks);
    };

    let normalized = track.normalize()?;
    match format {
        ResponseFormat::Shields => Ok(LatestSong::Badge(ShieldsBadge::for_track(
            &normalized.track,
        )?)),
        ResponseFormat::Track => Ok(LatestSong::Track(normalized)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_shields_value_selects_badge() {
        assert_eq!(
            ResponseFormat::from_query(Some("shields.io")),
            ResponseFormat::Shields
        );
        for other in [None, Some(""), Some("json"), Some("SHIELDS.IO")] {
            assert_eq!(ResponseFormat::from_query(other), ResponseFormat::Track);
        }
    }
}
