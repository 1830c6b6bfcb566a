use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::errors::{Error, Result};

/// Label shown on the left side of the shields.io badge
pub const BADGE_LABEL: &str = "Last.FM Last Played Song";

// Top level payload of `user.getrecenttracks`
#[derive(Deserialize, Debug, Default)]
pub struct RecentTracksResponse {
    pub recenttracks: Option<RecentTracks>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RecentTracks {
    pub track: Option<TrackList>,
}

/// Last.fm returns a bare object instead of a list when there is a single
/// item, and `{}` or `""` when there is none
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum TrackList {
    Many(Vec<Track>),
    One(Box<Track>),
    Text(String),
}

impl TrackList {
    /// Newest track, tracks are ordered newest first
    pub fn into_first(self) -> Result<Option<Track>> {
        match self {
            TrackList::Many(tracks) => Ok(tracks.into_iter().next()),
            TrackList::One(track) if *track == Track::default() => Ok(None),
            TrackList::One(track) => Ok(Some(*track)),
            TrackList::Text(text) if text.is_empty() => Ok(None),
            TrackList::Text(text) => Err(Error::LastFMUnexpectedResponse(format!(
                "`track` is a string: {text:?}"
            ))),
        }
    }
}

impl RecentTracksResponse {
    pub fn into_latest_track(self) -> Result<Option<Track>> {
        match self.recenttracks.and_then(|r| r.track) {
            Some(tracks) => tracks.into_first(),
            None => Ok(None),
        }
    }
}

// Error payload Last.fm sends along with (most) failed calls
#[derive(Deserialize, Debug)]
pub struct ApiErrorResponse {
    pub error: u32,
    #[serde(default)]
    pub message: String,
}

/// A played track as received from Last.fm.
///
/// Only the fields the service reads are typed, everything else (album,
/// images, url, mbid, `@attr`, ...) is kept in `rest` and passed through.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Track {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<Artist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<TrackDate>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Artist {
    #[serde(rename = "#text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TrackDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uts: Option<Timestamp>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Unix timestamp, Last.fm sends it as a string
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Number(i64),
    Text(String),
}

impl Timestamp {
    /// Integer value of the timestamp, `None` for an empty string
    pub fn to_unix(&self) -> Result<Option<i64>> {
        match self {
            Timestamp::Number(n) => Ok(Some(*n)),
            Timestamp::Text(s) if s.trim().is_empty() => Ok(None),
            Timestamp::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| Error::MalformedTimestamp(s.clone())),
        }
    }
}

/// Upstream track plus a flat `date_uts` field
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NormalizedTrack {
    #[serde(flatten)]
    pub track: Track,
    pub date_uts: Option<i64>,
}

impl Track {
    pub fn normalize(self) -> Result<NormalizedTrack> {
        let date_uts = match self.date.as_ref().and_then(|d| d.uts.as_ref()) {
            Some(uts) => uts.to_unix()?,
            None => None,
        };
        Ok(NormalizedTrack {
            track: self,
            date_uts,
        })
    }

    pub fn artist_name(&self) -> Option<&str> {
        self.artist.as_ref().and_then(|a| a.text.as_deref())
    }
}

/// Endpoint badge schema understood by shields.io
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShieldsBadge {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
}

impl ShieldsBadge {
    pub fn for_track(track: &Track) -> Result<Self> {
        let name = track.name.as_deref().ok_or(Error::MissingField("name"))?;
        let artist = track
            .artist_name()
            .ok_or(Error::MissingField("artist.#text"))?;
        Ok(ShieldsBadge {
            schema_version: 1,
            label: BADGE_LABEL.to_string(),
            message: format!("{name} - {artist}"),
        })
    }
}
