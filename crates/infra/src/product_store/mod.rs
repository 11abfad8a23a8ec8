//! Product document store boundary.
//!
//! The catalog, admin and dashboard surfaces all read and write products
//! through [`ProductStore`]; the concrete backend is chosen at startup.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
pub use r#trait::{ProductStore, StoreError};
