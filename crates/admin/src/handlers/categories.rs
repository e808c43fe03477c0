//! Category screens: hierarchical listing, search, toggle and uniqueness check.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use shopme_core::catalog::{
    check_category_unique, hierarchical_rows, status_label, CatalogError, CategoryId,
};
use shopme_core::storage::{PageRequest, SortDir};

use crate::{
    handlers::{
        flash::{redirect_with_flash, take_flash, FlashMessage},
        templates::{CategoriesTemplate, CategoryRowView, HtmlTemplate},
        AppError,
    },
    state::AppState,
};

const CATEGORIES_URL: &str = "/categories";

/// Query parameters of the category listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCategoriesQuery {
    pub sort_dir: Option<String>,
    pub keyword: Option<String>,
}

/// Handler for GET /categories
pub async fn list_first_page(
    state: State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    list_by_page(state, Path(1), Query(ListCategoriesQuery::default()), jar).await
}

/// Handler for GET /categories/page/{page}
///
/// Without a keyword the page holds root categories, each followed by its
/// subcategories. With a keyword it holds the matching categories.
pub async fn list_by_page(
    State(state): State<AppState>,
    Path(page): Path<usize>,
    Query(query): Query<ListCategoriesQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let sort = query
        .sort_dir
        .as_deref()
        .map(SortDir::parse)
        .unwrap_or_default();
    let keyword = query.keyword.unwrap_or_default().trim().to_string();
    let request = PageRequest::new(page, state.config.categories_per_page);

    let (page, rows) = if keyword.is_empty() {
        let page = state.categories.list_root_categories(sort, request).await?;
        let all = state.categories.list_categories().await?;
        let rows = hierarchical_rows(&page.items, &all, sort)
            .into_iter()
            .map(CategoryRowView::from)
            .collect();
        (page, rows)
    } else {
        let page = state
            .categories
            .search_categories(&keyword, sort, request)
            .await?;
        let rows = page.items.iter().cloned().map(CategoryRowView::from).collect();
        (page, rows)
    };

    let (jar, flash) = take_flash(jar);
    let template = CategoriesTemplate::new(flash.into(), &page, rows, sort, keyword);

    Ok((jar, HtmlTemplate(template)))
}

/// Handler for GET /categories/{id}/enabled/{status}
pub async fn update_enabled_status(
    State(state): State<AppState>,
    Path((id, enabled)): Path<(CategoryId, bool)>,
) -> Result<Response, AppError> {
    let exists = state.categories.count_by_id(id).await? > 0;
    let flash = if exists && state.categories.update_enabled_status(id, enabled).await? {
        tracing::info!(category_id = %id, enabled, "Updated category status");
        FlashMessage::success(format!(
            "The category ID {id} has been {}",
            status_label(enabled)
        ))
    } else {
        FlashMessage::error(format!("Could not find any category with ID {id}"))
    };

    Ok(redirect_with_flash(CATEGORIES_URL, flash))
}

/// Form posted by the category editor before saving.
#[derive(Debug, Deserialize)]
pub struct CheckUniqueForm {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub alias: String,
}

/// Handler for POST /categories/check_unique
///
/// Answers `OK`, `DuplicateName` or `DuplicateAlias` as plain text.
pub async fn check_unique(
    State(state): State<AppState>,
    Form(form): Form<CheckUniqueForm>,
) -> Result<&'static str, AppError> {
    let id = match form.id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(id) => Some(id.parse::<CategoryId>().map_err(|_| CatalogError::InvalidField {
            field: "id".to_string(),
            value: id.to_string(),
        })?),
    };

    let by_name = state.categories.find_by_name(form.name.trim()).await?;
    let by_alias = state.categories.find_by_alias(form.alias.trim()).await?;

    Ok(check_category_unique(id, by_name.as_ref(), by_alias.as_ref()).as_str())
}
