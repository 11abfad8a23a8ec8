use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use storefront_inventory::InventoryQuery;
use storefront_products::StockUpdate;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/stats", get(stats))
        .route("/products", get(list_inventory))
        .route("/products/:id", patch(update_stock))
}

/// Raw snapshot JSON.
pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.inventory_snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => errors::aggregation_error_to_response(e),
    }
}

/// Dashboard page model: counters, category table and one alert tab.
pub async fn view(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DashboardQuery>,
) -> axum::response::Response {
    match services.inventory_snapshot().await {
        Ok(snapshot) => {
            (StatusCode::OK, Json(dto::dashboard_to_json(&snapshot, &query))).into_response()
        }
        Err(e) => errors::aggregation_error_to_response(e),
    }
}

pub async fn list_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<InventoryQuery>,
) -> axum::response::Response {
    match services.store().fetch_all().await {
        Ok(products) => (StatusCode::OK, Json(query.run(&products))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(update): Json<StockUpdate>,
) -> axum::response::Response {
    let id = match errors::parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut product = match services.store().get(id).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::not_found("product"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = update.apply(&mut product, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    match services.store().replace(product).await {
        Ok(saved) => {
            info!(
                product_id = %saved.id_typed(),
                stock = saved.stock_quantity(),
                "stock updated"
            );
            (StatusCode::OK, Json(saved)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
