use std::sync::Arc;

use storefront_infra::{AggregationError, InventoryReport, ProductStore};
use storefront_inventory::InventoryStats;

/// Shared per-process services handed to every handler via `Extension`.
pub struct AppServices {
    store: Arc<dyn ProductStore>,
    report: InventoryReport<Arc<dyn ProductStore>>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            report: InventoryReport::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }

    /// Fresh dashboard snapshot; recomputed on every call.
    pub async fn inventory_snapshot(&self) -> Result<InventoryStats, AggregationError> {
        self.report.snapshot().await
    }
}
