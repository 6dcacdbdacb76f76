use async_trait::async_trait;
use libsql::{Builder, Connection, Row};

use super::{BookStore, Filter};
use crate::error::StoreError;
use crate::model::{Book, NewBook};

const BOOK_COLUMNS: &str = "id, title, author, isbn, genre, material_type, trade_type, price, \
                            condition, description, image_url, seller_name, seller_email";

pub struct LibsqlStore {
    conn: Connection,
    table: String,
}

impl LibsqlStore {
    pub async fn connect(url: &str, auth_token: &str, table: &str) -> Result<Self, StoreError> {
        if url.is_empty() {
            return Err(StoreError::Config("store url is not configured".to_string()));
        }
        Self::validate_identifier(table)?;

        tracing::info!(table = table, "[store] connecting to remote database");
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;

        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        Ok(LibsqlStore {
            conn,
            table: table.to_string(),
        })
    }

    fn validate_identifier(name: &str) -> Result<(), StoreError> {
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid {
            Ok(())
        } else {
            Err(StoreError::InvalidIdentifier(name.to_string()))
        }
    }

    fn book_from_row(row: &Row) -> Result<Book, StoreError> {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get::<Option<String>>(2)?,
            isbn: row.get::<Option<String>>(3)?,
            genre: row.get::<Option<String>>(4)?,
            material_type: row.get::<Option<String>>(5)?,
            trade_type: row.get::<Option<String>>(6)?,
            price: row.get(7)?,
            condition: row.get::<Option<String>>(8)?,
            description: row.get::<Option<String>>(9)?,
            image_url: row.get::<Option<String>>(10)?,
            seller_name: row.get(11)?,
            seller_email: row.get(12)?,
        })
    }

    async fn collect(mut rows: libsql::Rows) -> Result<Vec<Book>, StoreError> {
        let mut books = vec![];
        while let Some(row) = rows.next().await? {
            books.push(Self::book_from_row(&row)?);
        }
        Ok(books)
    }
}

#[async_trait]
impl BookStore for LibsqlStore {
    async fn select(&self, filter: Option<&Filter>) -> Result<Vec<Book>, StoreError> {
        let rows = match filter {
            Some(filter) => {
                let query = format!(
                    "SELECT {} FROM {} WHERE {} = ?",
                    BOOK_COLUMNS,
                    self.table,
                    filter.field.column()
                );
                self.conn
                    .query(&query, libsql::params![filter.value.as_str()])
                    .await?
            }
            None => {
                let query = format!("SELECT {} FROM {}", BOOK_COLUMNS, self.table);
                self.conn.query(&query, ()).await?
            }
        };

        Self::collect(rows).await
    }

    async fn insert(&self, book: &NewBook) -> Result<Vec<Book>, StoreError> {
        let query = format!(
            r#"
INSERT INTO {} (title, author, isbn, genre, material_type, trade_type, price,
                condition, description, image_url, seller_name, seller_email)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
RETURNING {}
"#,
            self.table, BOOK_COLUMNS
        );

        let rows = self
            .conn
            .query(
                &query,
                libsql::params![
                    book.title.as_str(),
                    book.author.as_deref(),
                    book.isbn.as_deref(),
                    book.genre.as_deref(),
                    book.material_type.as_deref(),
                    book.trade_type.as_deref(),
                    book.price,
                    book.condition.as_deref(),
                    book.description.as_deref(),
                    book.image_url.as_deref(),
                    book.seller_name.as_str(),
                    book.seller_email.as_str()
                ],
            )
            .await?;

        Self::collect(rows).await
    }

    async fn delete(&self, filter: &Filter) -> Result<Vec<Book>, StoreError> {
        let query = format!(
            "DELETE FROM {} WHERE {} = ? RETURNING {}",
            self.table,
            filter.field.column(),
            BOOK_COLUMNS
        );

        let rows = self
            .conn
            .query(&query, libsql::params![filter.value.as_str()])
            .await?;

        Self::collect(rows).await
    }
}
