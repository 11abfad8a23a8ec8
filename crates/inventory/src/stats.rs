//! Dashboard statistics snapshot.
//!
//! The snapshot is a pure projection of the product list it is handed. It is
//! recomputed on every read and never stored.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use storefront_products::Product;

use crate::stock_level::StockLevel;

/// Maximum entries in each of the low-stock / out-of-stock lists.
pub const ALERT_LIST_LIMIT: usize = 10;

/// Bucket for products with a missing or blank category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Per-category rollup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub count: usize,
    pub total_stock: u64,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
}

/// Category rollups in order of first appearance. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(String, CategoryStats)>,
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.index.get(category).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryStats)> {
        self.entries.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, category: &str) -> &mut CategoryStats {
        let i = match self.index.get(category) {
            Some(&i) => i,
            None => {
                self.entries.push((category.to_string(), CategoryStats::default()));
                self.index.insert(category.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Point-in-time inventory statistics.
///
/// `in_stock_count + low_stock_count + out_of_stock_count == total_products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_products: usize,
    pub in_stock_count: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub total_inventory_value: f64,
    /// First [`ALERT_LIST_LIMIT`] low-stock products, in source order.
    pub low_stock_list: Vec<Product>,
    /// First [`ALERT_LIST_LIMIT`] out-of-stock products, in source order.
    pub out_of_stock_list: Vec<Product>,
    pub category_breakdown: CategoryBreakdown,
    pub generated_at: DateTime<Utc>,
}

impl InventoryStats {
    /// Snapshot of an empty catalog.
    pub fn empty(generated_at: DateTime<Utc>) -> Self {
        compute_stats(&[], generated_at)
    }
}

/// Aggregate `products` into a snapshot.
///
/// Never fails. Alert lists keep the order of `products` and are truncated,
/// not ranked by severity.
pub fn compute_stats(products: &[Product], generated_at: DateTime<Utc>) -> InventoryStats {
    let mut stats = InventoryStats {
        total_products: products.len(),
        in_stock_count: 0,
        low_stock_count: 0,
        out_of_stock_count: 0,
        total_inventory_value: 0.0,
        low_stock_list: Vec::new(),
        out_of_stock_list: Vec::new(),
        category_breakdown: CategoryBreakdown::default(),
        generated_at,
    };

    for product in products {
        let level = StockLevel::classify(product);
        let quantity = product.stock_quantity();

        stats.total_inventory_value += product.stock_value();

        let category = match product.category().trim() {
            "" => UNCATEGORIZED,
            c => c,
        };
        let bucket = stats.category_breakdown.entry_mut(category);
        bucket.count += 1;
        bucket.total_stock += u64::from(quantity);

        match level {
            StockLevel::InStock => stats.in_stock_count += 1,
            StockLevel::LowStock => {
                stats.low_stock_count += 1;
                bucket.low_stock_count += 1;
                if stats.low_stock_list.len() < ALERT_LIST_LIMIT {
                    stats.low_stock_list.push(product.clone());
                }
            }
            StockLevel::OutOfStock => {
                stats.out_of_stock_count += 1;
                bucket.out_of_stock_count += 1;
                if stats.out_of_stock_list.len() < ALERT_LIST_LIMIT {
                    stats.out_of_stock_list.push(product.clone());
                }
            }
        }
    }

    stats
}
