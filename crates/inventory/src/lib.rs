//! Inventory reporting module.
//!
//! Stock classification, the dashboard statistics snapshot and the paginated
//! inventory listing, implemented purely as deterministic functions over
//! already-loaded products (no IO, no HTTP, no storage).

pub mod listing;
pub mod stats;
pub mod stock_level;

pub use listing::{InventoryPage, InventoryQuery, Pagination, StockFilter};
pub use stats::{
    compute_stats, CategoryBreakdown, CategoryStats, InventoryStats, ALERT_LIST_LIMIT,
    UNCATEGORIZED,
};
pub use stock_level::{StockLevel, LOW_STOCK_THRESHOLD};
