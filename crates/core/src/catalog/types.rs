use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the record store on first insert.
pub type ProductId = i64;
pub type BrandId = i64;
pub type CategoryId = i64;

/// A free-form (name, value) attribute shown on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub name: String,
    pub value: String,
}

impl ProductDetail {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A persisted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub alias: String,
    pub short_description: String,
    pub full_description: String,
    pub price: f64,
    pub enabled: bool,
    pub in_stock: bool,
    pub brand_id: Option<BrandId>,
    /// Primary image filename, stored under `{root}/{id}`.
    pub main_image: Option<String>,
    /// Secondary image filenames in upload order, stored under `{root}/{id}/extras`.
    pub extra_images: Vec<String>,
    pub details: Vec<ProductDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable snapshot of a product about to be persisted.
///
/// Produced by [`super::ProductBuilder`]. `id` is `None` for a product that
/// has never been saved; the record store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub name: String,
    pub alias: String,
    pub short_description: String,
    pub full_description: String,
    pub price: f64,
    pub enabled: bool,
    pub in_stock: bool,
    pub brand_id: Option<BrandId>,
    pub main_image: Option<String>,
    pub extra_images: Vec<String>,
    pub details: Vec<ProductDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductDraft {
    /// Attaches the identifier obtained from the record store.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            alias: self.alias,
            short_description: self.short_description,
            full_description: self.full_description,
            price: self.price,
            enabled: self.enabled,
            in_stock: self.in_stock,
            brand_id: self.brand_id,
            main_image: self.main_image,
            extra_images: self.extra_images,
            details: self.details,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Editable product fields as submitted by the product form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductFields {
    pub id: Option<ProductId>,
    pub name: String,
    pub alias: String,
    pub short_description: String,
    pub full_description: String,
    pub price: f64,
    pub enabled: bool,
    pub in_stock: bool,
    pub brand_id: Option<BrandId>,
}

impl ProductFields {
    /// Fields for the "new product" form: enabled and in stock.
    pub fn new_product() -> Self {
        Self {
            enabled: true,
            in_stock: true,
            ..Self::default()
        }
    }
}

impl From<&Product> for ProductFields {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            alias: product.alias.clone(),
            short_description: product.short_description.clone(),
            full_description: product.full_description.clone(),
            price: product.price,
            enabled: product.enabled,
            in_stock: product.in_stock,
            brand_id: product.brand_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

impl Brand {
    pub fn new(id: BrandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A product category. Root categories have no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub alias: String,
    pub image: String,
    pub enabled: bool,
    pub parent_id: Option<CategoryId>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub alias: String,
    pub image: String,
    pub enabled: bool,
    pub parent_id: Option<CategoryId>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
            image: "default.png".to_string(),
            enabled: true,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            alias: self.alias,
            image: self.image,
            enabled: self.enabled,
            parent_id: self.parent_id,
        }
    }
}
