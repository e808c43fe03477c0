//! Root route handler.

use axum::response::Redirect;

/// Handler for GET /
pub async fn root_redirect() -> Redirect {
    Redirect::to("/products")
}
