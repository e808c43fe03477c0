//! Local filesystem image store.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use shopme_core::media::ImageStore;

/// Writes product images to the local filesystem with `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalImageStore;

impl LocalImageStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn clean_dir(&self, dir: &Path) -> io::Result<()> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
            }
        }

        tracing::debug!(dir = %dir.display(), "Cleaned image directory");
        Ok(())
    }

    async fn save_file(&self, dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(dir).await?;
        fs::write(dir.join(file_name), bytes).await?;

        tracing::debug!(dir = %dir.display(), file_name, size = bytes.len(), "Saved image");
        Ok(())
    }

    async fn remove_dir(&self, dir: &Path) -> io::Result<()> {
        match fs::remove_dir_all(dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_file_creates_directory() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("7").join("extras");

        LocalImageStore::new()
            .save_file(&dir, "a.png", b"png")
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.join("a.png")).unwrap(), b"png");
    }

    #[tokio::test]
    async fn test_save_file_overwrites() {
        let root = TempDir::new().unwrap();
        let store = LocalImageStore::new();

        store.save_file(root.path(), "a.png", b"old").await.unwrap();
        store.save_file(root.path(), "a.png", b"new").await.unwrap();

        assert_eq!(std::fs::read(root.path().join("a.png")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_clean_dir_keeps_subdirectories() {
        let root = TempDir::new().unwrap();
        let store = LocalImageStore::new();
        store.save_file(root.path(), "old.jpg", b"1").await.unwrap();
        store
            .save_file(&root.path().join("extras"), "a.png", b"2")
            .await
            .unwrap();

        store.clean_dir(root.path()).await.unwrap();

        assert!(!root.path().join("old.jpg").exists());
        assert!(root.path().join("extras").join("a.png").exists());
    }

    #[tokio::test]
    async fn test_clean_dir_missing_is_ok() {
        let root = TempDir::new().unwrap();

        let result = LocalImageStore::new()
            .clean_dir(&root.path().join("missing"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_remove_dir() {
        let root = TempDir::new().unwrap();
        let store = LocalImageStore::new();
        let dir = root.path().join("3");
        store
            .save_file(&dir.join("extras"), "a.png", b"2")
            .await
            .unwrap();

        store.remove_dir(&dir).await.unwrap();
        store.remove_dir(&dir).await.unwrap();

        assert!(!dir.exists());
    }
}
