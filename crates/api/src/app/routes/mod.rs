use axum::{routing::get, Router};

pub mod admin;
pub mod catalog;
pub mod dashboard;
pub mod products;
pub mod system;

/// Router for every public endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/dashboard", get(dashboard::view))
        .nest("/api/catalog", catalog::router())
        .nest("/api/products", products::router())
        .nest("/api/admin", admin::router())
        .nest("/api/dashboard", dashboard::router())
}
