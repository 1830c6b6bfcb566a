/// Last.fm payload entities and their normalization
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Last.fm recent tracks client
pub mod lastfm;

pub use lastfm::{LastFmClient, RecentTracksSource};
