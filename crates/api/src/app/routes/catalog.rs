use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use storefront_products::{catalog_categories, CatalogFilter};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(browse))
}

/// Storefront listing: filtered products plus the category picker values.
pub async fn browse(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<CatalogFilter>,
) -> axum::response::Response {
    let products = match services.store().fetch_all().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let categories = catalog_categories(&products);
    let visible = filter.apply(&products);
    (StatusCode::OK, Json(dto::catalog_to_json(&visible, &categories))).into_response()
}
