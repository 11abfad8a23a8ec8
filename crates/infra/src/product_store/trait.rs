use std::sync::Arc;

use thiserror::Error;

use storefront_core::ProductId;
use storefront_products::{Product, ProductDocument};

/// Product store operation error.
///
/// These are **infrastructure errors** (connectivity, constraint violations,
/// undecodable rows) as opposed to domain errors (validation). A single odd
/// field inside an otherwise readable document is not an error; it is
/// normalized away by `Product::from_document`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product store unavailable: {0}")]
    Unavailable(String),

    #[error("product not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("corrupt product document: {0}")]
    Corrupt(String),
}

/// Document store holding the product catalog.
///
/// ## Ordering
///
/// `fetch_all()` returns products in insertion order. The dashboard's capped
/// alert lists are defined in terms of this order, so implementations must
/// keep it stable across calls.
///
/// ## Slugs
///
/// Slugs are unique across the catalog. `insert()` and `replace()` return
/// `StoreError::Conflict` when another product already owns the slug.
/// Legacy documents without a slug are allowed and are simply not reachable
/// by slug.
///
/// ## Normalization
///
/// Every read returns normalized [`Product`]s. Documents that cannot be
/// decoded at all are skipped by `fetch_all()` (and logged); single lookups
/// report them as `StoreError::Corrupt`.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, in insertion order.
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    /// Insert a new product. Fails with `Conflict` on a duplicate id or slug.
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// Overwrite the stored product with the same id. Fails with `NotFound`
    /// when no such product exists.
    async fn replace(&self, product: Product) -> Result<Product, StoreError>;

    /// Remove the product owning `slug`, returning it.
    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    /// Remove every listed product that exists; returns how many were removed.
    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError>;

    /// Distinct non-empty categories, sorted.
    async fn categories(&self) -> Result<Vec<String>, StoreError>;

    /// Store a raw document as-is (seeding and imports of legacy records).
    async fn insert_document(&self, document: ProductDocument) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn fetch_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).fetch_all().await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        (**self).get_by_slug(slug).await
    }

    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        (**self).insert(product).await
    }

    async fn replace(&self, product: Product) -> Result<Product, StoreError> {
        (**self).replace(product).await
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        (**self).delete_by_slug(slug).await
    }

    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError> {
        (**self).delete_many(ids).await
    }

    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        (**self).categories().await
    }

    async fn insert_document(&self, document: ProductDocument) -> Result<(), StoreError> {
        (**self).insert_document(document).await
    }
}
