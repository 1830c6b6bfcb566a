//! Lastsong - the latest played Last.fm track over HTTP
//!
//! This library exposes a tiny axum service answering with a user's most
//! recently scrobbled track, either as normalized JSON or as a shields.io
//! endpoint badge.

/// Client modules for interacting with the Last.fm API
pub mod clients;
/// Process configuration
pub mod config;
/// HTTP handlers
pub mod handlers;
/// HTTP routing
pub mod routes;
