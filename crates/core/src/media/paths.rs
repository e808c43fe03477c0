use std::path::PathBuf;

use crate::catalog::ProductId;

/// URL prefix under which the image root is served.
pub const IMAGE_URL_PREFIX: &str = "/product-images";

const EXTRAS_DIR: &str = "extras";

/// On-disk layout of product images.
///
/// ```text
/// {root}/{id}/            primary image
/// {root}/{id}/extras/     secondary images
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImagePaths {
    root: PathBuf,
}

impl ProductImagePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the primary image of a product.
    pub fn main_dir(&self, id: ProductId) -> PathBuf {
        self.root.join(id.to_string())
    }

    /// Directory holding the secondary images of a product.
    pub fn extras_dir(&self, id: ProductId) -> PathBuf {
        self.main_dir(id).join(EXTRAS_DIR)
    }
}

/// Public URL of a primary image.
pub fn main_image_url(id: ProductId, file_name: &str) -> String {
    format!("{IMAGE_URL_PREFIX}/{id}/{file_name}")
}

/// Public URL of a secondary image.
pub fn extra_image_url(id: ProductId, file_name: &str) -> String {
    format!("{IMAGE_URL_PREFIX}/{id}/{EXTRAS_DIR}/{file_name}")
}
