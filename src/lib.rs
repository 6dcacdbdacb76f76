use std::error::Error;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{AppState, method_not_allowed, not_found, welcome};

pub mod api;
pub mod books;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod store;

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(welcome).fallback(method_not_allowed))
        .merge(books::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Cross-origin policy: only whitelisted origins, any method and header,
/// credentials allowed. Methods and headers are mirrored from the preflight
/// since a wildcard cannot be combined with credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(_) if origin.trim() == "*" => {
                tracing::warn!("ignoring wildcard cors origin, credentials require explicit origins");
                None
            }
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid cors origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn unpack_error(err: &dyn Error) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
