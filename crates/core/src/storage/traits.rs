use async_trait::async_trait;

use crate::catalog::{
    Brand, Category, CategoryId, NewCategory, Product, ProductDraft, ProductId,
};

use super::{Page, PageRequest, Result, SortDir};

/// Repository for product operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Gets a product by its ID.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Lists all products ordered by ID.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Inserts a new product and returns it with its assigned ID.
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product>;

    /// Replaces a stored product, including its images and details.
    async fn update_product(&self, product: &Product) -> Result<()>;

    /// Deletes a product by its ID.
    async fn delete_product(&self, id: ProductId) -> Result<()>;

    /// Sets the enabled flag. Returns `false` when no product has this ID.
    async fn update_enabled_status(&self, id: ProductId, enabled: bool) -> Result<bool>;
}

/// Repository for brand lookups.
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Lists all brands ordered by name.
    async fn list_brands(&self) -> Result<Vec<Brand>>;
}

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists every category, roots and children alike.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Gets one page of root categories ordered by name.
    async fn list_root_categories(&self, sort: SortDir, page: PageRequest)
        -> Result<Page<Category>>;

    /// Searches categories whose name contains `keyword`, ordered by name.
    async fn search_categories(
        &self,
        keyword: &str,
        sort: SortDir,
        page: PageRequest,
    ) -> Result<Page<Category>>;

    /// Counts categories with this ID (0 or 1).
    async fn count_by_id(&self, id: CategoryId) -> Result<u64>;

    /// Gets a category by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    /// Gets a category by its exact alias.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Category>>;

    /// Inserts a new category and returns it with its assigned ID.
    async fn create_category(&self, category: &NewCategory) -> Result<Category>;

    /// Sets the enabled flag. Returns `false` when no category has this ID.
    async fn update_enabled_status(&self, id: CategoryId, enabled: bool) -> Result<bool>;
}
