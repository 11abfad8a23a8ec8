//! Store lifecycle: acquire at startup, release at shutdown.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::product_store::postgres::map_sqlx_error;
use crate::product_store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};

/// Owned handle to the configured product store.
///
/// Created once by the binary and passed down explicitly; there is no
/// process-global connection.
pub enum StoreHandle {
    Memory(Arc<InMemoryProductStore>),
    Postgres {
        store: Arc<PostgresProductStore>,
        pool: PgPool,
    },
}

impl StoreHandle {
    /// Connect to the backend named by `config`.
    ///
    /// For Postgres this opens the pool with the configured limits and makes
    /// sure the `products` table exists.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.backend {
            StoreBackend::Memory => {
                info!(backend = "memory", "product store ready");
                Ok(Self::Memory(Arc::new(InMemoryProductStore::new())))
            }
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| StoreError::Unavailable("DATABASE_URL is not set".to_string()))?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .min_connections(config.min_connections)
                    .acquire_timeout(config.acquire_timeout)
                    .connect(url)
                    .await
                    .map_err(|e| map_sqlx_error("connect", e))?;

                let store = PostgresProductStore::new(pool.clone());
                store.ensure_schema().await?;

                info!(
                    backend = "postgres",
                    max_connections = config.max_connections,
                    min_connections = config.min_connections,
                    "product store ready"
                );
                Ok(Self::Postgres {
                    store: Arc::new(store),
                    pool,
                })
            }
        }
    }

    /// Wrap an existing in-memory store (tests, seeded demos).
    pub fn in_memory(store: Arc<InMemoryProductStore>) -> Self {
        Self::Memory(store)
    }

    pub fn store(&self) -> Arc<dyn ProductStore> {
        match self {
            Self::Memory(store) => store.clone(),
            Self::Postgres { store, .. } => store.clone(),
        }
    }

    /// Release the store. Waits for checked-out connections to be returned.
    pub async fn close(self) {
        match self {
            Self::Memory(_) => {}
            Self::Postgres { pool, .. } => pool.close().await,
        }
        info!("product store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storefront_core::ProductId;
    use storefront_products::Product;

    #[tokio::test]
    async fn memory_backend_round_trip() {
        let handle = StoreHandle::connect(&StoreConfig::default()).await.unwrap();
        let store = handle.store();
        store
            .insert(Product::new(ProductId::new(), "Mug", Utc::now()).with_slug("mug"))
            .await
            .unwrap();
        assert_eq!(store.fetch_all().await.unwrap().len(), 1);
        handle.close().await;
    }

    #[tokio::test]
    async fn handles_share_one_store() {
        let inner = Arc::new(InMemoryProductStore::new());
        let handle = StoreHandle::in_memory(inner.clone());
        handle
            .store()
            .insert(Product::new(ProductId::new(), "Mug", Utc::now()).with_slug("mug"))
            .await
            .unwrap();
        assert_eq!(inner.fetch_all().await.unwrap().len(), 1);
    }
}
