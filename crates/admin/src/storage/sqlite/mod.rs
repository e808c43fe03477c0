//! SQLite storage backend implementation.
//!
//! Implements the repository traits using `rusqlite` for the synchronous
//! driver and `tokio-rusqlite` to run it off the async runtime.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
