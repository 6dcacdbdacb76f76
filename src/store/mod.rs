//! Book store capability
//!
//! The service never owns book data. Every handler goes through [`BookStore`],
//! which offers `select`, `insert` and `delete` with an optional equality
//! filter, each returning the rows it touched. An empty vector means no row
//! matched.
//!
//! Two backends are provided:
//!
//! - [`LibsqlStore`] talks to a hosted libsql database over the remote protocol
//! - [`MemoryStore`] keeps rows in process, for local runs and tests

mod memory;
mod remote;

pub use memory::MemoryStore;
pub use remote::LibsqlStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Book, NewBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Id,
    Title,
    SellerEmail,
}

impl BookField {
    pub fn column(&self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::SellerEmail => "seller_email",
        }
    }

    pub fn value_of<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookField::Id => &book.id,
            BookField::Title => &book.title,
            BookField::SellerEmail => &book.seller_email,
        }
    }
}

/// Equality filter on a single text column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: BookField,
    pub value: String,
}

impl Filter {
    pub fn eq(field: BookField, value: impl Into<String>) -> Self {
        Filter {
            field,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::eq(BookField::Id, value)
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.field.value_of(book) == self.value
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn select(&self, filter: Option<&Filter>) -> Result<Vec<Book>, StoreError>;

    /// Inserts one row and returns it as stored, including the assigned id.
    async fn insert(&self, book: &NewBook) -> Result<Vec<Book>, StoreError>;

    /// Removes matching rows and returns them.
    async fn delete(&self, filter: &Filter) -> Result<Vec<Book>, StoreError>;
}
