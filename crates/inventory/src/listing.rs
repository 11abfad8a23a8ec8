//! Paginated inventory listing for the dashboard's product table.

use serde::{Deserialize, Serialize};

use storefront_products::Product;

use crate::stock_level::StockLevel;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockFilter {
    #[default]
    All,
    LowStock,
    OutOfStock,
}

impl StockFilter {
    pub fn matches(&self, level: StockLevel) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::LowStock => level == StockLevel::LowStock,
            StockFilter::OutOfStock => level == StockLevel::OutOfStock,
        }
    }
}

/// Query string of `GET /api/dashboard/products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub filter: StockFilter,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
}

impl InventoryQuery {
    /// 1-based page number.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    fn matches(&self, product: &Product) -> bool {
        if !self.filter.matches(StockLevel::classify(product)) {
            return false;
        }
        if let Some(q) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            if !product.name().to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) => product.category() == c,
        }
    }

    /// Filter, sort by quantity ascending (stable), then cut the requested page.
    pub fn run(&self, products: &[Product]) -> InventoryPage {
        let mut matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        matched.sort_by_key(|p| p.stock_quantity());

        let page = self.page();
        let limit = self.limit();
        let total = matched.len();

        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .collect();

        InventoryPage {
            products: items,
            pagination: Pagination {
                page,
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storefront_core::ProductId;

    fn product(name: &str, category: &str, qty: u32) -> Product {
        Product::new(ProductId::new(), name, Utc::now())
            .with_category(category)
            .with_stock(qty)
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("Desk Lamp", "Home", 40),
            product("Chef Knife", "Kitchen", 3),
            product("Blender", "Kitchen", 0),
            product("Rug", "Home", 8),
            product("Kettle", "Kitchen", 12).with_in_stock(Some(false)),
        ]
    }

    fn names(page: &InventoryPage) -> Vec<&str> {
        page.products.iter().map(Product::name).collect()
    }

    #[test]
    fn sorts_by_quantity_ascending() {
        let page = InventoryQuery::default().run(&fixture());
        assert_eq!(
            names(&page),
            vec!["Blender", "Chef Knife", "Rug", "Kettle", "Desk Lamp"]
        );
        assert_eq!(
            page.pagination,
            Pagination { page: 1, limit: 20, total: 5, pages: 1 }
        );
    }

    #[test]
    fn stock_filters_use_classification() {
        let q = InventoryQuery { filter: StockFilter::LowStock, ..Default::default() };
        assert_eq!(names(&q.run(&fixture())), vec!["Chef Knife", "Rug"]);

        let q = InventoryQuery { filter: StockFilter::OutOfStock, ..Default::default() };
        assert_eq!(names(&q.run(&fixture())), vec!["Blender", "Kettle"]);
    }

    #[test]
    fn search_and_category() {
        let q = InventoryQuery {
            search: Some("KN".to_string()),
            category: Some("Kitchen".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&q.run(&fixture())), vec!["Chef Knife"]);
    }

    #[test]
    fn paginates_and_clamps() {
        let q = InventoryQuery { page: Some(2), limit: Some(2), ..Default::default() };
        let page = q.run(&fixture());
        assert_eq!(names(&page), vec!["Rug", "Kettle"]);
        assert_eq!(page.pagination, Pagination { page: 2, limit: 2, total: 5, pages: 3 });

        let q = InventoryQuery { page: Some(0), limit: Some(10_000), ..Default::default() };
        let page = q.run(&fixture());
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, MAX_PAGE_SIZE);

        let q = InventoryQuery { page: Some(9), ..Default::default() };
        assert!(q.run(&fixture()).products.is_empty());
    }
}
