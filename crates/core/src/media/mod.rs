//! Product image layout and the filesystem gateway contract.

mod paths;
mod traits;

pub use paths::{extra_image_url, main_image_url, ProductImagePaths, IMAGE_URL_PREFIX};
pub use traits::ImageStore;
