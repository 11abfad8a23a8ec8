use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use tracing::info;

use storefront_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/products/bulk", delete(bulk_delete))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().categories().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn bulk_delete(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BulkDeleteRequest>,
) -> axum::response::Response {
    if body.ids.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "ids must not be empty",
        );
    }

    let ids = match body
        .ids
        .iter()
        .map(|raw| errors::parse_product_id(raw))
        .collect::<Result<Vec<ProductId>, _>>()
    {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };

    match services.store().delete_many(&ids).await {
        Ok(count) => {
            info!(requested = ids.len(), deleted = count, "bulk delete");
            (StatusCode::OK, Json(dto::bulk_delete_to_json(count))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
