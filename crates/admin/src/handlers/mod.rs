pub mod categories;
pub mod error;
pub mod flash;
pub mod products;
pub mod root;
pub mod templates;

pub use error::AppError;
