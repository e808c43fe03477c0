//! Application state with repository-based storage.
//!
//! The state holds repository trait objects, the image store and the
//! product workflow service. The storage backend is picked by the `sqlite`
//! feature.

use std::sync::Arc;

use shopme_core::media::{ImageStore, ProductImagePaths};
use shopme_core::storage::{BrandRepository, CategoryRepository, ProductRepository};

use crate::config::Config;
use crate::media::LocalImageStore;
use crate::service::ProductService;

/// Shared application state, cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub brands: Arc<dyn BrandRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub product_service: ProductService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates an AppState around one backend implementing every repository.
    fn build<R>(repo: Arc<R>, images: Arc<dyn ImageStore>, config: Config) -> Self
    where
        R: ProductRepository + BrandRepository + CategoryRepository + 'static,
    {
        let paths = ProductImagePaths::new(config.product_images_dir.clone());
        let product_service = ProductService::new(repo.clone(), images, paths);

        Self {
            products: repo.clone(),
            brands: repo.clone(),
            categories: repo,
            product_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::mock_data::seed_categories;
    use crate::storage::sqlite::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            seed_categories(repo.as_ref()).await?;

            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
            Ok(Self::build(repo, Arc::new(LocalImageStore::new()), config))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod inmemory {
    use super::*;
    use crate::mock_data::{demo_brands, seed_categories};
    use crate::storage::inmemory::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and demo data.
        pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::with_brands(demo_brands()));
            seed_categories(repo.as_ref()).await?;

            tracing::info!("Using in-memory storage");
            Ok(Self::build(repo, Arc::new(LocalImageStore::new()), config))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
