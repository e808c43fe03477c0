//! Storage backends for the admin server.
//!
//! The SQLite backend is compiled with the `sqlite` feature. The in-memory
//! backend replaces it when the feature is off and backs the test suite.

#[cfg(any(test, not(feature = "sqlite")))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;
