//! Infrastructure layer: product store backends, store lifecycle, config and
//! the store-backed inventory snapshot service.

pub mod config;
pub mod handle;
pub mod product_store;
pub mod report;

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use handle::StoreHandle;
pub use product_store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};
pub use report::{AggregationError, InventoryReport};
