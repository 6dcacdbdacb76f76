use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ErrorDetail;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("InvalidIdentifier: {0}")]
    InvalidIdentifier(String),
    #[error("Config: {0}")]
    Config(String),
}

impl From<libsql::Error> for StoreError {
    fn from(error: libsql::Error) -> Self {
        StoreError::Backend(Box::new(error))
    }
}

#[derive(Debug, Error)]
pub enum BooksError {
    #[error("Book not found")]
    NotFound,
    #[error("Failed to create book")]
    CreateReturnedNothing,
    #[error("{context}: {}", crate::unpack_error(.source))]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl BooksError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> BooksError {
        move |source| BooksError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        use BooksError::*;
        match self {
            NotFound => StatusCode::NOT_FOUND,
            CreateReturnedNothing | Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Rejected { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for BooksError {
    fn from(rejection: JsonRejection) -> Self {
        BooksError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for BooksError {
    fn from(rejection: PathRejection) -> Self {
        BooksError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for BooksError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %detail, "books request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %detail, "books request rejected");
        }

        (status, Json(ErrorDetail { detail })).into_response()
    }
}
