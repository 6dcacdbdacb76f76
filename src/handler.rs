use std::sync::Arc;

use axum::{Json, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::api::{ErrorDetail, MessageResponse, WELCOME_MESSAGE};
use crate::store::BookStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        AppState { store }
    }
}

pub async fn welcome() -> impl IntoResponse {
    info!("got welcome request");
    Json(MessageResponse::new_from_msg(WELCOME_MESSAGE))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorDetail::new("Not Found")))
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorDetail::new("Method Not Allowed")),
    )
}
