use axum::{Router, routing::get};

use super::handler;
use crate::handler::{AppState, method_not_allowed};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            get(handler::list_books)
                .post(handler::create_book)
                .fallback(method_not_allowed),
        )
        .route(
            "/books/",
            get(handler::list_books)
                .post(handler::create_book)
                .fallback(method_not_allowed),
        )
        .route(
            "/books/:book_id",
            get(handler::get_book)
                .delete(handler::delete_book)
                .fallback(method_not_allowed),
        )
}
