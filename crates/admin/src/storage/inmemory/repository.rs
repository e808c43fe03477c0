//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shopme_core::catalog::{
    sort_categories_by_name, Brand, Category, CategoryId, NewCategory, Product, ProductDraft,
    ProductId,
};
use shopme_core::storage::{
    BrandRepository, CategoryRepository, Page, PageRequest, ProductRepository, RepositoryError,
    Result, SortDir,
};

/// In-memory storage backend.
///
/// Identifiers are handed out from per-entity counters starting at 1, the
/// way an auto-increment column would.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    products: Arc<RwLock<BTreeMap<ProductId, Product>>>,
    brands: Arc<RwLock<Vec<Brand>>>,
    categories: Arc<RwLock<BTreeMap<CategoryId, Category>>>,
    next_product_id: Arc<AtomicI64>,
    next_category_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            brands: Arc::new(RwLock::new(Vec::new())),
            categories: Arc::new(RwLock::new(BTreeMap::new())),
            next_product_id: Arc::new(AtomicI64::new(1)),
            next_category_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Creates a repository pre-filled with the given brands.
    pub fn with_brands(brands: Vec<Brand>) -> Self {
        Self {
            brands: Arc::new(RwLock::new(brands)),
            ..Self::new()
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        if let Some(id) = draft.id {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                id: id.to_string(),
            });
        }

        let mut products = self.products.write().await;
        let id = self.next_product_id.fetch_add(1, Ordering::SeqCst);
        let product = draft.clone().into_product(id);
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found("Product", product.id)),
        }
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut products = self.products.write().await;
        if products.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Product", id));
        }
        Ok(())
    }

    async fn update_enabled_status(&self, id: ProductId, enabled: bool) -> Result<bool> {
        let mut products = self.products.write().await;
        Ok(products
            .get_mut(&id)
            .map(|product| product.enabled = enabled)
            .is_some())
    }
}

#[async_trait]
impl BrandRepository for InMemoryRepository {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        let mut brands = self.brands.read().await.clone();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().cloned().collect())
    }

    async fn list_root_categories(
        &self,
        sort: SortDir,
        page: PageRequest,
    ) -> Result<Page<Category>> {
        let categories = self.categories.read().await;
        let mut roots: Vec<Category> = categories
            .values()
            .filter(|c| c.is_root())
            .cloned()
            .collect();
        sort_categories_by_name(&mut roots, sort);
        Ok(Page::from_sorted(roots, page))
    }

    async fn search_categories(
        &self,
        keyword: &str,
        sort: SortDir,
        page: PageRequest,
    ) -> Result<Page<Category>> {
        let needle = keyword.to_lowercase();
        let categories = self.categories.read().await;
        let mut found: Vec<Category> = categories
            .values()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sort_categories_by_name(&mut found, sort);
        Ok(Page::from_sorted(found, page))
    }

    async fn count_by_id(&self, id: CategoryId) -> Result<u64> {
        let categories = self.categories.read().await;
        Ok(u64::from(categories.contains_key(&id)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().find(|c| c.alias == alias).cloned())
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let mut categories = self.categories.write().await;
        if let Some(existing) = categories
            .values()
            .find(|c| c.name == category.name || c.alias == category.alias)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Category",
                id: existing.id.to_string(),
            });
        }
        if let Some(parent_id) = category.parent_id {
            if !categories.contains_key(&parent_id) {
                return Err(RepositoryError::InvalidData(format!(
                    "Parent category {parent_id} does not exist"
                )));
            }
        }

        let id = self.next_category_id.fetch_add(1, Ordering::SeqCst);
        let stored = category.clone().into_category(id);
        categories.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_enabled_status(&self, id: CategoryId, enabled: bool) -> Result<bool> {
        let mut categories = self.categories.write().await;
        Ok(categories
            .get_mut(&id)
            .map(|category| category.enabled = enabled)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopme_core::catalog::{ProductBuilder, ProductDetail, ProductFields};

    fn draft(name: &str) -> ProductDraft {
        ProductBuilder::new(ProductFields {
            name: name.to_string(),
            alias: name.to_lowercase(),
            ..ProductFields::new_product()
        })
        .details(vec![ProductDetail::new("Color", "Black")])
        .build(Utc::now())
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.create_product(&draft("Phone")).await.unwrap();
        let second = repo.create_product(&draft("Tablet")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_product(1).await.unwrap().unwrap().name, "Phone");
    }

    #[tokio::test]
    async fn test_create_rejects_draft_with_id() {
        let repo = InMemoryRepository::new();
        let mut with_id = draft("Phone");
        with_id.id = Some(9);

        let result = repo.create_product(&with_id).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryRepository::new();
        let product = draft("Phone").into_product(5);

        let result = repo.update_product(&product).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_product() {
        let repo = InMemoryRepository::new();
        let mut product = repo.create_product(&draft("Phone")).await.unwrap();
        product.name = "Smartphone".to_string();
        product.extra_images = vec!["side.png".to_string()];

        repo.update_product(&product).await.unwrap();

        let stored = repo.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Smartphone");
        assert_eq!(stored.extra_images, vec!["side.png".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let repo = InMemoryRepository::new();
        let product = repo.create_product(&draft("Phone")).await.unwrap();

        repo.delete_product(product.id).await.unwrap();

        assert!(repo.get_product(product.id).await.unwrap().is_none());
        assert!(repo.delete_product(product.id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_enabled_status_reports_missing_rows() {
        let repo = InMemoryRepository::new();
        let product = repo.create_product(&draft("Phone")).await.unwrap();

        assert!(ProductRepository::update_enabled_status(&repo, product.id, false)
            .await
            .unwrap());
        assert!(!ProductRepository::update_enabled_status(&repo, 99, false)
            .await
            .unwrap());
        assert!(!repo.get_product(product.id).await.unwrap().unwrap().enabled);
    }

    #[tokio::test]
    async fn test_list_brands_sorted_by_name() {
        let repo = InMemoryRepository::with_brands(vec![
            Brand::new(1, "Samsung"),
            Brand::new(2, "Apple"),
        ]);

        let names: Vec<String> = repo
            .list_brands()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(names, vec!["Apple", "Samsung"]);
    }

    #[tokio::test]
    async fn test_root_categories_paged_and_sorted() {
        let repo = InMemoryRepository::new();
        for name in ["Electronics", "Books", "Computers"] {
            repo.create_category(&NewCategory::new(name, name.to_lowercase()))
                .await
                .unwrap();
        }
        repo.create_category(&NewCategory::new("Laptops", "laptops").with_parent(3))
            .await
            .unwrap();

        let page = repo
            .list_root_categories(SortDir::Desc, PageRequest::new(1, 2))
            .await
            .unwrap();

        let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Electronics", "Computers"]);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_search_categories_case_insensitive() {
        let repo = InMemoryRepository::new();
        repo.create_category(&NewCategory::new("Computers", "computers"))
            .await
            .unwrap();
        repo.create_category(&NewCategory::new("Computer Parts", "parts"))
            .await
            .unwrap();
        repo.create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        let page = repo
            .search_categories("COMPUTER", SortDir::Asc, PageRequest::new(1, 10))
            .await
            .unwrap();

        let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Computer Parts", "Computers"]);
    }

    #[tokio::test]
    async fn test_category_lookups() {
        let repo = InMemoryRepository::new();
        let books = repo
            .create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        assert_eq!(repo.count_by_id(books.id).await.unwrap(), 1);
        assert_eq!(repo.count_by_id(99).await.unwrap(), 0);
        assert_eq!(repo.find_by_name("Books").await.unwrap(), Some(books.clone()));
        assert_eq!(repo.find_by_alias("books").await.unwrap(), Some(books));
        assert!(repo.find_by_name("Music").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_category_rejects_duplicates_and_orphans() {
        let repo = InMemoryRepository::new();
        repo.create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        let duplicate = repo
            .create_category(&NewCategory::new("Books", "other-alias"))
            .await;
        let orphan = repo
            .create_category(&NewCategory::new("Novels", "novels").with_parent(42))
            .await;

        assert!(matches!(duplicate, Err(RepositoryError::AlreadyExists { .. })));
        assert!(matches!(orphan, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_category_enabled_status() {
        let repo = InMemoryRepository::new();
        let books = repo
            .create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        assert!(CategoryRepository::update_enabled_status(&repo, books.id, false)
            .await
            .unwrap());
        assert!(!CategoryRepository::update_enabled_status(&repo, 77, true)
            .await
            .unwrap());
        assert!(!repo.find_by_name("Books").await.unwrap().unwrap().enabled);
    }
}
