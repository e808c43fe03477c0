use std::{env, path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "shopme.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Root directory of uploaded product images (default: "../product-images")
    pub product_images_dir: PathBuf,
    /// Maximum request body size for uploads in bytes (default: 10 MiB)
    pub max_upload_bytes: usize,
    /// Root categories per listing page (default: 4)
    pub categories_per_page: usize,
    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "shopme.db")
    /// - `PRODUCT_IMAGES_DIR` - product image root (default: "../product-images")
    /// - `MAX_UPLOAD_BYTES` - upload body limit (default: 10485760)
    /// - `CATEGORIES_PER_PAGE` - root categories per page (default: 4)
    /// - `REQUEST_TIMEOUT_SECONDS` - request timeout (default: 30)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "shopme.db".to_string()),
            product_images_dir: env::var("PRODUCT_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("../product-images")),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            categories_per_page: env::var("CATEGORIES_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(4),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Configuration rooted at a given image directory, for tests.
    #[cfg(test)]
    pub fn for_images(product_images_dir: impl Into<PathBuf>) -> Self {
        Self {
            sqlite_path: ":memory:".to_string(),
            product_images_dir: product_images_dir.into(),
            max_upload_bytes: 1024 * 1024,
            categories_per_page: 4,
            request_timeout_seconds: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
