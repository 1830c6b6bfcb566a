use axum::{http::StatusCode, response::Response};
use log::info;

use crate::handlers::message;

pub const HEALTHY: &str = "ok";

pub async fn health_check() -> Response {
    info!("Healthcheck was requested");
    message(StatusCode::OK, HEALTHY)
}
