use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, Filter};
use crate::error::StoreError;
use crate::model::{Book, NewBook};

/// In-process store. Rows keep insertion order and ids are never reused.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Book>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn select(&self, filter: Option<&Filter>) -> Result<Vec<Book>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|book| filter.is_none_or(|f| f.matches(book)))
            .cloned()
            .collect())
    }

    async fn insert(&self, book: &NewBook) -> Result<Vec<Book>, StoreError> {
        let book = book.clone().into_book(self.assign_id());
        self.rows.write().await.push(book.clone());
        Ok(vec![book])
    }

    async fn delete(&self, filter: &Filter) -> Result<Vec<Book>, StoreError> {
        let mut rows = self.rows.write().await;
        let (removed, kept): (Vec<Book>, Vec<Book>) = rows.drain(..).partition(|book| filter.matches(book));
        *rows = kept;
        Ok(removed)
    }
}
