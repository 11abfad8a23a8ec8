use serde::{Deserialize, Serialize};

use storefront_products::Product;

/// Inclusive upper bound for a positive quantity to count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock class of a single product. Every product has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockLevel {
    /// Classify by precedence: explicit `inStock: false`, then zero quantity,
    /// then the low-stock threshold.
    pub fn classify(product: &Product) -> Self {
        Self::from_parts(product.in_stock(), product.stock_quantity())
    }

    pub fn from_parts(in_stock: Option<bool>, quantity: u32) -> Self {
        if in_stock == Some(false) || quantity == 0 {
            StockLevel::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::InStock => "in-stock",
            StockLevel::LowStock => "low-stock",
            StockLevel::OutOfStock => "out-of-stock",
        }
    }
}
