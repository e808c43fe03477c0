//! Product save, delete and toggle workflows.
//!
//! Saving is two-phase: the record is persisted first so it has an ID, then
//! the image bytes are written under that ID. When the second phase fails the
//! first one is undone before the error is returned.

use std::io;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use shopme_core::catalog::{CatalogError, Product, ProductId, ProductSubmission, UploadedImage};
use shopme_core::media::{ImageStore, ProductImagePaths};
use shopme_core::storage::{repository_error_to_status_code, ProductRepository, RepositoryError};

/// Errors returned by [`ProductService`].
#[derive(Debug, Error)]
pub enum ProductServiceError {
    #[error("Could not find any product with ID {id}")]
    NotFound { id: ProductId },
    #[error("Invalid product submission: {0}")]
    InvalidSubmission(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Failed to write product images: {0}")]
    Images(#[from] io::Error),
}

impl ProductServiceError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidSubmission(_) => 400,
            Self::Repository(e) => repository_error_to_status_code(e),
            Self::Images(_) => 500,
        }
    }
}

/// Coordinates the record store and the image store for products.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    images: Arc<dyn ImageStore>,
    paths: ProductImagePaths,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        images: Arc<dyn ImageStore>,
        paths: ProductImagePaths,
    ) -> Self {
        Self {
            products,
            images,
            paths,
        }
    }

    /// Persists a submission, then writes its uploaded images.
    ///
    /// A submission without an ID creates a product. One with an ID edits the
    /// stored product and fails with `NotFound` when there is none.
    pub async fn save_product(
        &self,
        submission: ProductSubmission,
    ) -> Result<Product, ProductServiceError> {
        let previous = match submission.fields.id {
            Some(id) => Some(
                self.products
                    .get_product(id)
                    .await?
                    .ok_or(ProductServiceError::NotFound { id })?,
            ),
            None => None,
        };

        let draft = submission.to_draft(previous.as_ref(), Utc::now())?;

        let product = match &previous {
            Some(previous) => {
                let product = draft.into_product(previous.id);
                self.products.update_product(&product).await?;
                tracing::info!(product_id = %product.id, "Updated product");
                product
            }
            None => {
                let product = self.products.create_product(&draft).await?;
                tracing::info!(product_id = %product.id, "Created product");
                product
            }
        };

        if let Err(e) = self.write_images(product.id, &submission).await {
            tracing::error!(product_id = %product.id, error = %e, "Failed to write product images");
            self.compensate(&product, previous.as_ref()).await;
            return Err(e.into());
        }

        Ok(product)
    }

    async fn write_images(&self, id: ProductId, submission: &ProductSubmission) -> io::Result<()> {
        if let Some(image) = submission.main_upload() {
            let dir = self.paths.main_dir(id);
            let file_name = cleaned(image)?;
            self.images.clean_dir(&dir).await?;
            self.images.save_file(&dir, &file_name, &image.bytes).await?;
        }

        let extras_dir = self.paths.extras_dir(id);
        for image in submission.extra_uploads() {
            let file_name = cleaned(image)?;
            self.images
                .save_file(&extras_dir, &file_name, &image.bytes)
                .await?;
        }

        Ok(())
    }

    /// Undoes the record change of a failed save.
    async fn compensate(&self, product: &Product, previous: Option<&Product>) {
        match previous {
            Some(previous) => {
                if let Err(e) = self.products.update_product(previous).await {
                    tracing::warn!(product_id = %product.id, error = %e, "Failed to restore product");
                } else {
                    tracing::debug!(product_id = %product.id, "Restored previous product");
                }
            }
            None => {
                if let Err(e) = self.products.delete_product(product.id).await {
                    tracing::warn!(product_id = %product.id, error = %e, "Failed to remove product");
                }
                if let Err(e) = self.images.remove_dir(&self.paths.main_dir(product.id)).await {
                    tracing::warn!(product_id = %product.id, error = %e, "Failed to remove image directory");
                }
            }
        }
    }

    /// Deletes a product and its image directories.
    ///
    /// Directory removal failures are logged; the product is gone either way.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductServiceError> {
        if self.products.get_product(id).await?.is_none() {
            return Err(ProductServiceError::NotFound { id });
        }

        self.products.delete_product(id).await?;
        tracing::info!(product_id = %id, "Deleted product");

        for dir in [self.paths.extras_dir(id), self.paths.main_dir(id)] {
            if let Err(e) = self.images.remove_dir(&dir).await {
                tracing::warn!(product_id = %id, dir = %dir.display(), error = %e, "Failed to remove image directory");
            }
        }

        Ok(())
    }

    /// Sets the enabled flag of a product.
    pub async fn update_enabled_status(
        &self,
        id: ProductId,
        enabled: bool,
    ) -> Result<(), ProductServiceError> {
        if !self.products.update_enabled_status(id, enabled).await? {
            return Err(ProductServiceError::NotFound { id });
        }

        tracing::info!(product_id = %id, enabled, "Updated product status");
        Ok(())
    }
}

fn cleaned(image: &UploadedImage) -> io::Result<String> {
    image
        .cleaned_name()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}
