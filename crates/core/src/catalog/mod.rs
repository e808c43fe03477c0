mod builder;
mod error;
mod operations;
mod types;
mod upload;

pub use builder::{ProductBuilder, ProductSubmission};
pub use error::CatalogError;
pub use operations::{
    check_category_unique, hierarchical_rows, sort_categories_by_name, status_label, CategoryRow,
    Uniqueness,
};
pub use types::{
    Brand, BrandId, Category, CategoryId, NewCategory, Product, ProductDetail, ProductDraft,
    ProductFields, ProductId,
};
pub use upload::{clean_filename, extra_image_names, main_image_name, pair_details, UploadedImage};
