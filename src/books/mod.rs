//! Books resource
//!
//! List, fetch, create and delete book listings. Each handler forwards to the
//! configured [`BookStore`](crate::store::BookStore) and turns the outcome into
//! an HTTP response. Not-found and create-without-result are reported as their
//! own error kinds. Every other store failure becomes a 500 carrying the
//! failure text.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookswap::books;
//!
//! let app = Router::new()
//!     .merge(books::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;

pub use routes::routes;
