use thiserror::Error;

/// Errors raised while turning a product form submission into a draft.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Detail names and values must have the same length (got {names} names and {values} values)")]
    MismatchedDetails { names: usize, values: usize },
    #[error("Uploaded file has no usable name: {0:?}")]
    InvalidFileName(String),
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField { field: String, value: String },
}
