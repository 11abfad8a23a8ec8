//! Inventory snapshot service: store read + aggregation.

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument};

use storefront_inventory::{compute_stats, InventoryStats};

use crate::product_store::{ProductStore, StoreError};

/// Why a snapshot could not be produced.
///
/// Distinct from an empty catalog, which is a valid all-zero snapshot.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("inventory snapshot unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Produces [`InventoryStats`] from whatever the store currently holds.
///
/// Nothing is cached; each call reads the full catalog and recomputes.
pub struct InventoryReport<S> {
    store: S,
}

impl<S> InventoryReport<S>
where
    S: ProductStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[instrument(skip(self), err)]
    pub async fn snapshot(&self) -> Result<InventoryStats, AggregationError> {
        let products = self
            .store
            .fetch_all()
            .await
            .map_err(AggregationError::StoreUnavailable)?;

        let stats = compute_stats(&products, Utc::now());
        info!(
            total_products = stats.total_products,
            low_stock = stats.low_stock_count,
            out_of_stock = stats.out_of_stock_count,
            "inventory snapshot computed"
        );
        Ok(stats)
    }
}
