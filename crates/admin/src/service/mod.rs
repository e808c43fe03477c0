//! Workflows that span the record store and the image store.

mod products;

pub use products::{ProductService, ProductServiceError};
