use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use storefront_core::ProductId;
use storefront_products::ProductForm;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:slug",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().fetch_all().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(form): Json<ProductForm>,
) -> axum::response::Response {
    let product = match form.into_product(ProductId::new(), Utc::now()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().insert(product).await {
        Ok(created) => {
            info!(product_id = %created.id_typed(), slug = created.slug(), "product created");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.store().get_by_slug(&slug).await {
        Ok(Some(product)) => {
            (StatusCode::OK, Json(dto::product_detail_to_json(&product))).into_response()
        }
        Ok(None) => errors::not_found("product"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
    Json(form): Json<ProductForm>,
) -> axum::response::Response {
    let existing = match services.store().get_by_slug(&slug).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::not_found("product"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let updated = match form.apply_to(&existing, Utc::now()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().replace(updated).await {
        Ok(saved) => {
            info!(product_id = %saved.id_typed(), slug = saved.slug(), "product updated");
            (StatusCode::OK, Json(saved)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    match services.store().delete_by_slug(&slug).await {
        Ok(Some(product)) => {
            info!(product_id = %product.id_typed(), slug = product.slug(), "product deleted");
            (StatusCode::OK, Json(dto::deleted_product_to_json(&product))).into_response()
        }
        Ok(None) => errors::not_found("product"),
        Err(e) => errors::store_error_to_response(e),
    }
}
