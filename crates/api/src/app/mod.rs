//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the store handle and snapshot service shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per surface)
//! - `dto.rs`: request DTOs and JSON response mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use storefront_infra::ProductStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over `store` (used by `main.rs` and tests).
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    routes::router().layer(ServiceBuilder::new().layer(Extension(services)))
}
