use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use shopme_core::media::IMAGE_URL_PREFIX;

use crate::{
    handlers::{categories, products, root::root_redirect},
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let product_routes = Router::new()
        .route("/", get(products::list_products))
        .route("/new", get(products::new_product))
        .route("/save", post(products::save_product))
        .route("/edit/{id}", get(products::edit_product))
        .route("/delete/{id}", get(products::delete_product))
        .route("/{id}/enabled/{status}", get(products::update_enabled_status));

    let category_routes = Router::new()
        .route("/", get(categories::list_first_page))
        .route("/page/{page}", get(categories::list_by_page))
        .route("/{id}/enabled/{status}", get(categories::update_enabled_status))
        .route("/check_unique", post(categories::check_unique));

    Router::new()
        .route("/", get(root_redirect))
        .nest("/products", product_routes)
        .nest("/categories", category_routes)
        .nest_service(
            IMAGE_URL_PREFIX,
            ServeDir::new(&config.product_images_dir),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .with_state(state)
}
