//! Product screens: list, form, save, toggle and delete.

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use shopme_core::catalog::{
    status_label, CatalogError, ProductFields, ProductId, ProductSubmission, UploadedImage,
};

use crate::{
    handlers::{
        flash::{redirect_with_flash, take_flash, FlashMessage},
        templates::{HtmlTemplate, ProductFormTemplate, ProductRowView, ProductsTemplate},
        AppError,
    },
    service::ProductServiceError,
    state::AppState,
};

const PRODUCTS_URL: &str = "/products";

fn not_found_flash(id: ProductId) -> Response {
    redirect_with_flash(
        PRODUCTS_URL,
        FlashMessage::error(format!("Could not find any product with ID {id}")),
    )
}

/// Handler for GET /products
pub async fn list_products(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list_products().await?;
    let brands = state.brands.list_brands().await?;

    let (jar, flash) = take_flash(jar);
    let template = ProductsTemplate {
        flash: flash.into(),
        products: products
            .iter()
            .map(|product| ProductRowView::new(product, &brands))
            .collect(),
    };

    Ok((jar, HtmlTemplate(template)))
}

/// Handler for GET /products/new
pub async fn new_product(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let brands = state.brands.list_brands().await?;

    Ok(HtmlTemplate(ProductFormTemplate::new_product(&brands)))
}

/// Handler for GET /products/edit/{id}
pub async fn edit_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    let Some(product) = state.products.get_product(id).await? else {
        tracing::debug!(product_id = %id, "Edit requested for missing product");
        return Ok(not_found_flash(id));
    };
    let brands = state.brands.list_brands().await?;

    Ok(HtmlTemplate(ProductFormTemplate::edit(&product, &brands)).into_response())
}

/// Handler for POST /products/save
pub async fn save_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;

    match state.product_service.save_product(submission).await {
        Ok(_) => Ok(redirect_with_flash(
            PRODUCTS_URL,
            FlashMessage::success("The product has been saved successfully"),
        )),
        Err(ProductServiceError::NotFound { id }) => Ok(not_found_flash(id)),
        Err(e) => Err(e.into()),
    }
}

/// Handler for GET /products/{id}/enabled/{status}
pub async fn update_enabled_status(
    State(state): State<AppState>,
    Path((id, enabled)): Path<(ProductId, bool)>,
) -> Result<Response, AppError> {
    match state
        .product_service
        .update_enabled_status(id, enabled)
        .await
    {
        Ok(()) => Ok(redirect_with_flash(
            PRODUCTS_URL,
            FlashMessage::success(format!(
                "The product ID {id} has been {}",
                status_label(enabled)
            )),
        )),
        Err(ProductServiceError::NotFound { id }) => Ok(not_found_flash(id)),
        Err(e) => Err(e.into()),
    }
}

/// Handler for GET /products/delete/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    match state.product_service.delete_product(id).await {
        Ok(()) => Ok(redirect_with_flash(
            PRODUCTS_URL,
            FlashMessage::success(format!("The product ID {id} has been deleted successfully")),
        )),
        Err(ProductServiceError::NotFound { id }) => Ok(not_found_flash(id)),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Multipart form parsing
// ============================================================================

/// Collects the parts of the product form into a submission.
///
/// Repeated fields may be posted with or without a `[]` suffix.
async fn read_submission(mut multipart: Multipart) -> Result<ProductSubmission, AppError> {
    let mut submission = ProductSubmission::new(ProductFields::default());

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|n| n.trim_end_matches("[]").to_string()) else {
            continue;
        };

        match name.as_str() {
            "fileImage" | "extraImage" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                let image = UploadedImage::new(file_name, bytes.to_vec());
                if name == "fileImage" {
                    submission.main_image = Some(image);
                } else {
                    submission.extra_images.push(image);
                }
            }
            "detailNames" => submission.detail_names.push(field.text().await?),
            "detailValues" => submission.detail_values.push(field.text().await?),
            _ => {
                let value = field.text().await?;
                apply_field(&mut submission.fields, &name, &value)?;
            }
        }
    }

    Ok(submission)
}

/// Sets one text field of the product form. Unknown fields are ignored.
fn apply_field(fields: &mut ProductFields, name: &str, value: &str) -> Result<(), CatalogError> {
    let invalid = || CatalogError::InvalidField {
        field: name.to_string(),
        value: value.to_string(),
    };
    let trimmed = value.trim();

    match name {
        "id" => {
            fields.id = match trimmed {
                "" => None,
                id => Some(id.parse().map_err(|_| invalid())?),
            }
        }
        "name" => fields.name = trimmed.to_string(),
        "alias" => fields.alias = trimmed.to_string(),
        "shortDescription" => fields.short_description = value.to_string(),
        "fullDescription" => fields.full_description = value.to_string(),
        "price" => {
            fields.price = match trimmed {
                "" => 0.0,
                price => price
                    .parse::<f64>()
                    .ok()
                    .filter(|p| p.is_finite() && *p >= 0.0)
                    .ok_or_else(invalid)?,
            }
        }
        "brandId" | "brand" => {
            fields.brand_id = match trimmed {
                "" => None,
                id => Some(id.parse().map_err(|_| invalid())?),
            }
        }
        "enabled" => fields.enabled = is_checked(trimmed),
        "inStock" => fields.in_stock = is_checked(trimmed),
        other => tracing::debug!(field = other, "Ignoring unknown product form field"),
    }

    Ok(())
}

/// A posted checkbox is on unless its value says otherwise.
fn is_checked(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "false" | "off" | "0")
}
