//! Askama templates and the view models they render.
//!
//! Templates only see plain fields. Anything computed (URLs, labels, the
//! current page marker) is prepared here.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use shopme_core::catalog::{
    Brand, Category, CategoryRow, Product, ProductDetail, ProductFields,
};
use shopme_core::media::{extra_image_url, main_image_url};
use shopme_core::storage::{Page, SortDir};

use super::flash::FlashMessage;

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to render template");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// A flash message ready for display.
pub struct FlashView {
    pub present: bool,
    pub kind: String,
    pub message: String,
}

impl From<Option<FlashMessage>> for FlashView {
    fn from(flash: Option<FlashMessage>) -> Self {
        match flash {
            Some(flash) => Self {
                present: true,
                kind: flash.message_type,
                message: flash.message,
            },
            None => Self {
                present: false,
                kind: String::new(),
                message: String::new(),
            },
        }
    }
}

// ============================================================================
// Products
// ============================================================================

pub struct ProductRowView {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub brand: String,
    pub has_image: bool,
    pub image_url: String,
    pub price: String,
    pub enabled: bool,
    pub in_stock: bool,
}

impl ProductRowView {
    pub fn new(product: &Product, brands: &[Brand]) -> Self {
        let brand = product
            .brand_id
            .and_then(|id| brands.iter().find(|b| b.id == id))
            .map(|b| b.name.clone())
            .unwrap_or_default();

        Self {
            id: product.id,
            name: product.name.clone(),
            alias: product.alias.clone(),
            brand,
            has_image: product.main_image.is_some(),
            image_url: product
                .main_image
                .as_deref()
                .map(|name| main_image_url(product.id, name))
                .unwrap_or_default(),
            price: format!("{:.2}", product.price),
            enabled: product.enabled,
            in_stock: product.in_stock,
        }
    }
}

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub flash: FlashView,
    pub products: Vec<ProductRowView>,
}

pub struct BrandOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

/// Product form, for both "new" and "edit".
#[derive(Template)]
#[template(path = "product_form.html")]
pub struct ProductFormTemplate {
    pub page_title: String,
    pub id: String,
    pub name: String,
    pub alias: String,
    pub short_description: String,
    pub full_description: String,
    pub price: String,
    pub enabled: bool,
    pub in_stock: bool,
    pub brands: Vec<BrandOption>,
    pub has_main_image: bool,
    pub main_image_url: String,
    pub extra_image_urls: Vec<String>,
    pub details: Vec<ProductDetail>,
}

impl ProductFormTemplate {
    /// Empty form with the defaults of a new product.
    pub fn new_product(brands: &[Brand]) -> Self {
        Self::from_fields(
            "Create New Product".to_string(),
            &ProductFields::new_product(),
            brands,
        )
    }

    /// Form pre-populated with a stored product.
    pub fn edit(product: &Product, brands: &[Brand]) -> Self {
        let mut form = Self::from_fields(
            format!("Edit Product (ID: {})", product.id),
            &ProductFields::from(product),
            brands,
        );
        if let Some(name) = &product.main_image {
            form.has_main_image = true;
            form.main_image_url = main_image_url(product.id, name);
        }
        form.extra_image_urls = product
            .extra_images
            .iter()
            .map(|name| extra_image_url(product.id, name))
            .collect();
        form.details = product.details.clone();
        form
    }

    fn from_fields(page_title: String, fields: &ProductFields, brands: &[Brand]) -> Self {
        Self {
            page_title,
            id: fields.id.map(|id| id.to_string()).unwrap_or_default(),
            name: fields.name.clone(),
            alias: fields.alias.clone(),
            short_description: fields.short_description.clone(),
            full_description: fields.full_description.clone(),
            price: format!("{:.2}", fields.price),
            enabled: fields.enabled,
            in_stock: fields.in_stock,
            brands: brands
                .iter()
                .map(|b| BrandOption {
                    id: b.id,
                    name: b.name.clone(),
                    selected: fields.brand_id == Some(b.id),
                })
                .collect(),
            has_main_image: false,
            main_image_url: String::new(),
            extra_image_urls: Vec::new(),
            details: Vec::new(),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

pub struct CategoryRowView {
    pub id: i64,
    pub name: String,
    pub alias: String,
    pub image: String,
    pub enabled: bool,
}

impl From<CategoryRow> for CategoryRowView {
    fn from(row: CategoryRow) -> Self {
        Self {
            name: row.display_name,
            ..Self::from(row.category)
        }
    }
}

impl From<Category> for CategoryRowView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            alias: category.alias,
            image: category.image,
            enabled: category.enabled,
        }
    }
}

pub struct PageLink {
    pub number: usize,
    pub current: bool,
}

#[derive(Template)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub flash: FlashView,
    pub rows: Vec<CategoryRowView>,
    pub current_page: usize,
    pub total_pages: usize,
    pub start_count: usize,
    pub end_count: usize,
    pub total_items: usize,
    pub pages: Vec<PageLink>,
    pub sort_dir: &'static str,
    pub reverse_sort_dir: &'static str,
    pub keyword: String,
}

impl CategoriesTemplate {
    /// `page` carries the paging numbers; `rows` what is shown for it.
    pub fn new<T>(
        flash: FlashView,
        page: &Page<T>,
        rows: Vec<CategoryRowView>,
        sort: SortDir,
        keyword: String,
    ) -> Self {
        let current_page = page.request.page;
        Self {
            flash,
            rows,
            current_page,
            total_pages: page.total_pages(),
            start_count: page.start_count(),
            end_count: page.end_count(),
            total_items: page.total_items,
            pages: (1..=page.total_pages())
                .map(|number| PageLink {
                    number,
                    current: number == current_page,
                })
                .collect(),
            sort_dir: sort.as_str(),
            reverse_sort_dir: sort.reverse().as_str(),
            keyword,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shopme_core::catalog::ProductBuilder;
    use shopme_core::storage::PageRequest;

    fn camera() -> Product {
        ProductBuilder::new(ProductFields {
            name: "Camera".to_string(),
            brand_id: Some(3),
            price: 12.5,
            ..ProductFields::new_product()
        })
        .main_image(Some("photo.JPG".to_string()))
        .extra_images(vec!["a.png".to_string()])
        .build(Utc::now())
        .into_product(7)
    }

    #[test]
    fn test_product_row_view() {
        let row = ProductRowView::new(&camera(), &[Brand::new(3, "Canon")]);

        assert_eq!(row.brand, "Canon");
        assert_eq!(row.image_url, "/product-images/7/photo.JPG");
        assert_eq!(row.price, "12.50");
    }

    #[test]
    fn test_new_product_form_defaults() {
        let form = ProductFormTemplate::new_product(&[Brand::new(1, "Acer")]);

        assert_eq!(form.page_title, "Create New Product");
        assert!(form.id.is_empty());
        assert!(form.enabled);
        assert!(form.in_stock);
        assert!(!form.brands[0].selected);
    }

    #[test]
    fn test_edit_form() {
        let form = ProductFormTemplate::edit(&camera(), &[Brand::new(3, "Canon")]);

        assert_eq!(form.page_title, "Edit Product (ID: 7)");
        assert_eq!(form.id, "7");
        assert!(form.brands[0].selected);
        assert_eq!(form.extra_image_urls, vec!["/product-images/7/extras/a.png"]);
    }

    #[test]
    fn test_categories_template_paging() {
        let page: Page<()> = Page::new(vec![(), ()], PageRequest::new(2, 4), 6);

        let template = CategoriesTemplate::new(
            FlashView::from(None::<FlashMessage>),
            &page,
            Vec::new(),
            SortDir::Asc,
            String::new(),
        );

        assert_eq!(template.total_pages, 2);
        assert_eq!(template.start_count, 5);
        assert_eq!(template.end_count, 6);
        assert!(template.pages[1].current);
        assert_eq!(template.reverse_sort_dir, "desc");
    }

    #[test]
    fn test_products_template_renders_flash() {
        let html = ProductsTemplate {
            flash: FlashView::from(Some(FlashMessage::success("Saved <ok>"))),
            products: vec![ProductRowView::new(&camera(), &[])],
        }
        .render()
        .unwrap();

        assert!(html.contains("Saved &#60;ok&#62;") || html.contains("Saved &lt;ok&gt;"));
        assert!(html.contains("/products/7/enabled/false"));
    }
}
