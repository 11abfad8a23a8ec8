//! Products domain module (catalog records).
//!
//! This crate contains the product record and every rule that turns raw store
//! documents or admin form input into it, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod form;
pub mod price;
pub mod product;
pub mod slug;

pub use catalog::{catalog_categories, CatalogFilter, PriceRange, ALL_CATEGORIES};
pub use form::{ProductForm, StockUpdate};
pub use price::Price;
pub use product::{Product, ProductDocument};
pub use slug::slugify;
