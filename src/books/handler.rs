//! HTTP Handlers for the books resource

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::api::DeleteResponse;
use crate::error::BooksError;
use crate::handler::AppState;
use crate::model::{Book, NewBook};
use crate::store::Filter;

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, BooksError> {
    let books = state
        .store
        .select(None)
        .await
        .map_err(BooksError::store("Error fetching books"))?;

    tracing::info!(count = books.len(), "got books");
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Book>, BooksError> {
    let Path(book_id) = book_id?;
    let book = state
        .store
        .select(Some(&Filter::id(book_id.as_str())))
        .await
        .map_err(BooksError::store("Error fetching book"))?
        .into_iter()
        .next()
        .ok_or(BooksError::NotFound)?;

    tracing::info!(book_id = %book.id, "got book");
    Ok(Json(book))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), BooksError> {
    let Json(new_book) = payload?;

    let book = state
        .store
        .insert(&new_book)
        .await
        .map_err(BooksError::store("Error creating book"))?
        .into_iter()
        .next()
        .ok_or(BooksError::CreateReturnedNothing)?;

    tracing::info!(book_id = %book.id, "created book");
    Ok((StatusCode::CREATED, Json(book)))
}

/// Checks the listing exists, then deletes it. A row removed by a concurrent
/// delete between the two calls still counts as deleted.
pub async fn delete_book(
    State(state): State<AppState>,
    book_id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, BooksError> {
    let Path(book_id) = book_id?;
    let filter = Filter::id(book_id.as_str());

    let existing = state
        .store
        .select(Some(&filter))
        .await
        .map_err(BooksError::store("Error deleting book"))?;
    if existing.is_empty() {
        return Err(BooksError::NotFound);
    }

    let removed = state
        .store
        .delete(&filter)
        .await
        .map_err(BooksError::store("Error deleting book"))?;
    if removed.is_empty() {
        tracing::warn!(book_id = %book_id, "book was already deleted by a concurrent request");
    }

    tracing::info!(book_id = %book_id, "deleted book");
    Ok(Json(DeleteResponse::deleted(book_id)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::error::StoreError;
    use crate::handler::AppState;
    use crate::model::{Book, NewBook};
    use crate::store::{BookStore, Filter, MemoryStore};

    fn app(store: Arc<dyn BookStore>) -> Router {
        crate::router(AppState::new(store), &crate::config::default_allowed_origins())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn calculus() -> Value {
        json!({
            "title": "Calculus I",
            "price": 40.0,
            "seller_name": "Alex",
            "seller_email": "alex@gmu.edu"
        })
    }

    struct FailingStore;

    #[async_trait]
    impl BookStore for FailingStore {
        async fn select(&self, _filter: Option<&Filter>) -> Result<Vec<Book>, StoreError> {
            Err(StoreError::Backend("connection reset".into()))
        }

        async fn insert(&self, _book: &NewBook) -> Result<Vec<Book>, StoreError> {
            Err(StoreError::Backend("connection reset".into()))
        }

        async fn delete(&self, _filter: &Filter) -> Result<Vec<Book>, StoreError> {
            Err(StoreError::Backend("connection reset".into()))
        }
    }

    /// Accepts inserts without returning the stored row.
    struct SilentInsertStore;

    #[async_trait]
    impl BookStore for SilentInsertStore {
        async fn select(&self, _filter: Option<&Filter>) -> Result<Vec<Book>, StoreError> {
            Ok(vec![])
        }

        async fn insert(&self, _book: &NewBook) -> Result<Vec<Book>, StoreError> {
            Ok(vec![])
        }

        async fn delete(&self, _filter: &Filter) -> Result<Vec<Book>, StoreError> {
            Ok(vec![])
        }
    }

    /// Sees the row on select but loses it to another request before delete.
    struct RacingStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl BookStore for RacingStore {
        async fn select(&self, filter: Option<&Filter>) -> Result<Vec<Book>, StoreError> {
            self.inner.select(filter).await
        }

        async fn insert(&self, book: &NewBook) -> Result<Vec<Book>, StoreError> {
            self.inner.insert(book).await
        }

        async fn delete(&self, filter: &Filter) -> Result<Vec<Book>, StoreError> {
            self.inner.delete(filter).await?;
            self.inner.delete(filter).await
        }
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, "GET", "/books/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(&app, "GET", "/books", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_echoes_fields_and_assigns_id() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, created) = send(&app, "POST", "/books/", Some(calculus())).await;
        assert_eq!(status, StatusCode::CREATED);

        let id = created["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(created["title"], "Calculus I");
        assert_eq!(created["price"], 40.0);
        assert_eq!(created["seller_name"], "Alex");
        assert_eq!(created["seller_email"], "alex@gmu.edu");
        for field in ["author", "isbn", "genre", "material_type", "trade_type", "condition", "description", "image_url"] {
            assert!(created[field].is_null(), "{field} should be null");
        }
    }

    #[tokio::test]
    async fn test_get_after_create_returns_same_record() {
        let app = app(Arc::new(MemoryStore::new()));

        let mut payload = calculus();
        payload["author"] = json!("James Stewart");
        payload["isbn"] = json!("978-1285741550");
        payload["condition"] = json!("Like new");
        let (_, created) = send(&app, "POST", "/books", Some(payload)).await;
        let id = created["id"].as_str().unwrap();

        let (status, fetched) = send(&app, "GET", &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        assert_eq!(fetched["author"], "James Stewart");

        let (_, listed) = send(&app, "GET", "/books/", None).await;
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn test_get_missing_book_is_404() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, "GET", "/books/does-not-exist-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Book not found" }));
    }

    #[tokio::test]
    async fn test_delete_existing_then_get_is_404() {
        let app = app(Arc::new(MemoryStore::new()));
        let (_, created) = send(&app, "POST", "/books/", Some(calculus())).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "DELETE", &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Book deleted successfully", "id": id }));

        let (status, body) = send(&app, "GET", &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Book not found" }));

        let (status, body) = send(&app, "DELETE", &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Book not found" }));
    }

    #[tokio::test]
    async fn test_delete_missing_book_is_404() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, "DELETE", "/books/does-not-exist-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Book not found" }));
    }

    #[tokio::test]
    async fn test_delete_that_lost_a_race_still_succeeds() {
        let store = Arc::new(RacingStore {
            inner: MemoryStore::new(),
        });
        let app = app(store.clone());
        let (_, created) = send(&app, "POST", "/books/", Some(calculus())).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "DELETE", &format!("/books/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());
        assert!(store.inner.select(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failures_are_500_with_failure_text() {
        let app = app(Arc::new(FailingStore));

        let (status, body) = send(&app, "GET", "/books/", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error fetching books: connection reset");

        let (status, body) = send(&app, "GET", "/books/42", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error fetching book: connection reset");

        let (status, body) = send(&app, "POST", "/books/", Some(calculus())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error creating book: connection reset");

        let (status, body) = send(&app, "DELETE", "/books/42", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Error deleting book: connection reset");
    }

    #[tokio::test]
    async fn test_create_without_returned_row_is_500() {
        let app = app(Arc::new(SilentInsertStore));

        let (status, body) = send(&app, "POST", "/books/", Some(calculus())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Failed to create book" }));
    }

    #[tokio::test]
    async fn test_create_missing_required_field_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());

        let mut payload = calculus();
        payload.as_object_mut().unwrap().remove("title");
        let (status, body) = send(&app, "POST", "/books/", Some(payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("title"));
        assert!(store.select(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_book_id_is_json_400() {
        let app = app(Arc::new(MemoryStore::new()));

        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app, method, "/books/%FF", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
            assert!(body["detail"].as_str().unwrap().contains("book_id"), "{method}");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_missing_content_type() {
        let app = app(Arc::new(MemoryStore::new()));

        let request = Request::builder()
            .method("POST")
            .uri("/books/")
            .body(Body::from(calculus().to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
