//! SQLite repository implementation.
//!
//! Implements the repository traits from `shopme_core::storage` using SQLite.
//! Products and their child rows are written in one transaction.

use async_trait::async_trait;
use rusqlite::params;
use tokio_rusqlite::Connection;

use shopme_core::catalog::{
    Brand, Category, CategoryId, NewCategory, Product, ProductDetail, ProductDraft, ProductId,
};
use shopme_core::storage::{
    BrandRepository, CategoryRepository, Page, PageRequest, ProductRepository, RepositoryError,
    Result, SortDir,
};

use super::conversions::{
    format_datetime, row_to_brand, row_to_category, row_to_detail, row_to_product,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and its schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema and demo brands.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            conn.execute_batch(schema::SEED_BRANDS).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

/// Loads the extra images and details of a product.
fn load_children(conn: &rusqlite::Connection, product: &mut Product) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(schema::SELECT_PRODUCT_IMAGES)?;
    product.extra_images = stmt
        .query_map([product.id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    let mut stmt = conn.prepare(schema::SELECT_PRODUCT_DETAILS)?;
    product.details = stmt
        .query_map([product.id], row_to_detail)?
        .collect::<rusqlite::Result<Vec<ProductDetail>>>()?;

    Ok(())
}

/// Replaces the extra images and details of a product.
fn write_children(
    conn: &rusqlite::Connection,
    id: ProductId,
    extra_images: &[String],
    details: &[ProductDetail],
) -> rusqlite::Result<()> {
    conn.execute(schema::DELETE_PRODUCT_IMAGES, [id])?;
    conn.execute(schema::DELETE_PRODUCT_DETAILS, [id])?;

    for (position, name) in extra_images.iter().enumerate() {
        conn.execute(
            schema::INSERT_PRODUCT_IMAGE,
            params![id, position as i64, name],
        )?;
    }
    for (position, detail) in details.iter().enumerate() {
        conn.execute(
            schema::INSERT_PRODUCT_DETAIL,
            params![id, position as i64, detail.name, detail.value],
        )?;
    }

    Ok(())
}

/// Runs a paged category query plus its count query.
fn query_category_page(
    conn: &rusqlite::Connection,
    select: &str,
    count: &str,
    keyword: Option<&str>,
    page: PageRequest,
) -> rusqlite::Result<Page<Category>> {
    let limit = i64::try_from(page.size).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let mut stmt = conn.prepare(select)?;
    let (items, total): (Vec<Category>, i64) = match keyword {
        Some(keyword) => {
            let items = stmt
                .query_map(params![keyword, limit, offset], row_to_category)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            let total = conn.query_row(count, [keyword], |row| row.get(0))?;
            (items, total)
        }
        None => {
            let items = stmt
                .query_map(params![limit, offset], row_to_category)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            let total = conn.query_row(count, [], |row| row.get(0))?;
            (items, total)
        }
    };

    Ok(Page::new(items, page, total as usize))
}

// ============================================================================
// ProductRepository implementation
// ============================================================================

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_PRODUCT_BY_ID)
                    .map_err(wrap_err)?;
                let mut product = match stmt.query_row([id], row_to_product) {
                    Ok(product) => product,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                    Err(e) => return Err(wrap_err(e)),
                };
                load_children(conn, &mut product).map_err(wrap_err)?;
                Ok(Some(product))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product", id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_PRODUCTS).map_err(wrap_err)?;
                let mut products = stmt
                    .query_map([], row_to_product)
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(wrap_err)?;
                for product in &mut products {
                    load_children(conn, product).map_err(wrap_err)?;
                }
                Ok(products)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        if let Some(id) = draft.id {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                id: id.to_string(),
            });
        }

        let draft = draft.clone();
        let created_at = format_datetime(&draft.created_at);
        let updated_at = format_datetime(&draft.updated_at);

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(
                    schema::INSERT_PRODUCT,
                    params![
                        draft.name,
                        draft.alias,
                        draft.short_description,
                        draft.full_description,
                        draft.price,
                        draft.enabled,
                        draft.in_stock,
                        draft.brand_id,
                        draft.main_image,
                        created_at,
                        updated_at
                    ],
                )
                .map_err(wrap_err)?;
                let id = tx.last_insert_rowid();
                write_children(&tx, id, &draft.extra_images, &draft.details).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(draft.into_product(id))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product", "unknown"))
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let product = product.clone();
        let product_id = product.id;
        let updated_at = format_datetime(&product.updated_at);

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let rows = tx
                    .execute(
                        schema::UPDATE_PRODUCT,
                        params![
                            product.id,
                            product.name,
                            product.alias,
                            product.short_description,
                            product.full_description,
                            product.price,
                            product.enabled,
                            product.in_stock,
                            product.brand_id,
                            product.main_image,
                            updated_at
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                write_children(&tx, product.id, &product.extra_images, &product.details)
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product", product_id.to_string()))
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_PRODUCT, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product", id.to_string()))
    }

    async fn update_enabled_status(&self, id: ProductId, enabled: bool) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_PRODUCT_ENABLED, params![id, enabled])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Product", id.to_string()))
    }
}

// ============================================================================
// BrandRepository implementation
// ============================================================================

#[async_trait]
impl BrandRepository for SqliteRepository {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_BRANDS).map_err(wrap_err)?;
                let brands = stmt
                    .query_map([], row_to_brand)
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(wrap_err)?;
                Ok(brands)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_CATEGORIES)
                    .map_err(wrap_err)?;
                let categories = stmt
                    .query_map([], row_to_category)
                    .map_err(wrap_err)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(wrap_err)?;
                Ok(categories)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn list_root_categories(
        &self,
        sort: SortDir,
        page: PageRequest,
    ) -> Result<Page<Category>> {
        let select = match sort {
            SortDir::Asc => schema::SELECT_ROOT_CATEGORIES_ASC,
            SortDir::Desc => schema::SELECT_ROOT_CATEGORIES_DESC,
        };

        self.conn
            .call(move |conn| {
                query_category_page(conn, select, schema::COUNT_ROOT_CATEGORIES, None, page)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn search_categories(
        &self,
        keyword: &str,
        sort: SortDir,
        page: PageRequest,
    ) -> Result<Page<Category>> {
        let keyword = keyword.to_string();
        let select = match sort {
            SortDir::Asc => schema::SEARCH_CATEGORIES_ASC,
            SortDir::Desc => schema::SEARCH_CATEGORIES_DESC,
        };

        self.conn
            .call(move |conn| {
                query_category_page(
                    conn,
                    select,
                    schema::COUNT_SEARCH_CATEGORIES,
                    Some(&keyword),
                    page,
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn count_by_id(&self, id: CategoryId) -> Result<u64> {
        self.conn
            .call(move |conn| {
                let count: i64 = conn
                    .query_row(schema::COUNT_CATEGORY_BY_ID, [id], |row| row.get(0))
                    .map_err(wrap_err)?;
                Ok(count as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", id.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let name = name.to_string();
        let lookup = name.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CATEGORY_BY_NAME)
                    .map_err(wrap_err)?;
                match stmt.query_row([&lookup], row_to_category) {
                    Ok(category) => Ok(Some(category)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", name))
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<Category>> {
        let alias = alias.to_string();
        let lookup = alias.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CATEGORY_BY_ALIAS)
                    .map_err(wrap_err)?;
                match stmt.query_row([&lookup], row_to_category) {
                    Ok(category) => Ok(Some(category)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", alias))
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let category = category.clone();
        let alias = category.alias.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_CATEGORY,
                    params![
                        category.name,
                        category.alias,
                        category.image,
                        category.enabled,
                        category.parent_id
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                Ok(category.into_category(id))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", alias))
    }

    async fn update_enabled_status(&self, id: CategoryId, enabled: bool) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_CATEGORY_ENABLED, params![id, enabled])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Category", id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shopme_core::catalog::{ProductBuilder, ProductFields};

    fn draft(name: &str) -> ProductDraft {
        ProductBuilder::new(ProductFields {
            name: name.to_string(),
            alias: name.to_lowercase(),
            price: 199.5,
            ..ProductFields::new_product()
        })
        .main_image(Some("photo.JPG".to_string()))
        .extra_images(vec!["a.png".to_string(), "b.png".to_string()])
        .details(vec![
            ProductDetail::new("Color", "Black"),
            ProductDetail::new("Weight", "1kg"),
        ])
        .build(Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap())
    }

    #[tokio::test]
    async fn test_create_and_get_product_with_children() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let created = repo.create_product(&draft("Camera")).await.unwrap();
        let loaded = repo.get_product(created.id).await.unwrap().unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(loaded, created);
        assert_eq!(loaded.extra_images, vec!["a.png", "b.png"]);
        assert_eq!(loaded.details.len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        assert!(repo.get_product(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_product_replaces_children() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let mut product = repo.create_product(&draft("Camera")).await.unwrap();
        product.name = "Mirrorless Camera".to_string();
        product.extra_images = vec!["c.png".to_string()];
        product.details = vec![ProductDetail::new("Sensor", "APS-C")];

        repo.update_product(&product).await.unwrap();

        let loaded = repo.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Mirrorless Camera");
        assert_eq!(loaded.extra_images, vec!["c.png"]);
        assert_eq!(loaded.details, vec![ProductDetail::new("Sensor", "APS-C")]);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let product = draft("Camera").into_product(77);

        let result = repo.update_product(&product).await;

        assert_eq!(result, Err(RepositoryError::not_found("Product", 77)));
    }

    #[tokio::test]
    async fn test_delete_product_cascades() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let product = repo.create_product(&draft("Camera")).await.unwrap();

        repo.delete_product(product.id).await.unwrap();

        assert!(repo.get_product(product.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_product(product.id).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_enabled_status() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let product = repo.create_product(&draft("Camera")).await.unwrap();

        assert!(ProductRepository::update_enabled_status(&repo, product.id, false)
            .await
            .unwrap());
        assert!(!ProductRepository::update_enabled_status(&repo, 999, false)
            .await
            .unwrap());
        assert!(!repo.get_product(product.id).await.unwrap().unwrap().enabled);
    }

    #[tokio::test]
    async fn test_seeded_brands() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let brands = repo.list_brands().await.unwrap();

        assert_eq!(brands.len(), 5);
        assert_eq!(brands[0].name, "Acer");
    }

    #[tokio::test]
    async fn test_categories_paging_and_search() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let electronics = repo
            .create_category(&NewCategory::new("Electronics", "electronics"))
            .await
            .unwrap();
        repo.create_category(&NewCategory::new("books", "books"))
            .await
            .unwrap();
        repo.create_category(&NewCategory::new("Cameras", "cameras").with_parent(electronics.id))
            .await
            .unwrap();

        let roots = repo
            .list_root_categories(SortDir::Asc, PageRequest::new(1, 4))
            .await
            .unwrap();
        let names: Vec<&str> = roots.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["books", "Electronics"]);
        assert_eq!(roots.total_items, 2);

        let found = repo
            .search_categories("CAM", SortDir::Desc, PageRequest::new(1, 4))
            .await
            .unwrap();
        assert_eq!(found.total_items, 1);
        assert_eq!(found.items[0].name, "Cameras");

        assert_eq!(repo.list_categories().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_categories_page_far_past_the_end_is_empty() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        let page = repo
            .list_root_categories(SortDir::Asc, PageRequest::new(usize::MAX, 4))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 1);
    }

    #[tokio::test]
    async fn test_category_constraints() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        let duplicate = repo
            .create_category(&NewCategory::new("Books", "other"))
            .await;
        let orphan = repo
            .create_category(&NewCategory::new("Novels", "novels").with_parent(42))
            .await;

        assert!(matches!(duplicate, Err(RepositoryError::AlreadyExists { .. })));
        assert!(matches!(orphan, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_category_lookups_and_toggle() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let books = repo
            .create_category(&NewCategory::new("Books", "books"))
            .await
            .unwrap();

        assert_eq!(repo.count_by_id(books.id).await.unwrap(), 1);
        assert_eq!(repo.count_by_id(books.id + 1).await.unwrap(), 0);
        assert_eq!(repo.find_by_alias("books").await.unwrap(), Some(books.clone()));

        assert!(CategoryRepository::update_enabled_status(&repo, books.id, false)
            .await
            .unwrap());
        assert!(!repo.find_by_name("Books").await.unwrap().unwrap().enabled);
    }
}
