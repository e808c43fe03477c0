use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Filesystem gateway for uploaded product images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Removes the regular files directly under `dir`.
    ///
    /// Subdirectories are left alone. A missing directory is not an error.
    async fn clean_dir(&self, dir: &Path) -> io::Result<()>;

    /// Writes `bytes` to `dir/file_name`, creating `dir` when needed and
    /// overwriting an existing file.
    async fn save_file(&self, dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<()>;

    /// Recursively removes `dir`. A missing directory is not an error.
    async fn remove_dir(&self, dir: &Path) -> io::Result<()>;
}
