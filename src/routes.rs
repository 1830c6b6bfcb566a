use std::time::Duration;

use axum::{
    Router,
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use log::error;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    AppState,
    health::health_check,
    latest_song::{INTERNAL_ERROR, latest_song},
    message,
};

/// Router with both endpoints behind a request timeout and a permissive CORS layer
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    let limit = state.request_timeout;

    Router::new()
        .route("/", get(health_check))
        .route("/{user}/latest-song", get(latest_song))
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            request_timeout(limit, req, next)
        }))
        .layer(cors)
        .with_state(state)
}

// Requests running past `limit` still get the JSON error body
async fn request_timeout(limit: Duration, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            error!("Request to {path} timed out after {limit:?}");
            message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}
