//! In-memory storage backend.
//!
//! Stores everything in maps wrapped in `Arc<RwLock<_>>`. Used by the test
//! suite and when the binary is built without the `sqlite` feature. Data is
//! lost when the process exits.

mod repository;

pub use repository::InMemoryRepository;
