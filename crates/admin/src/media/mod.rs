//! Image store implementations.

mod local;

pub use local::LocalImageStore;
