//! Storefront browse filters.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Price bands offered on the storefront.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceRange {
    #[default]
    All,
    /// Strictly below 50.
    #[serde(rename = "under-50")]
    Under50,
    /// 50 to 100 inclusive.
    #[serde(rename = "50-100")]
    From50To100,
    /// Strictly above 100.
    #[serde(rename = "over-100")]
    Over100,
}

impl PriceRange {
    pub fn contains(&self, amount: f64) -> bool {
        match self {
            PriceRange::All => true,
            PriceRange::Under50 => amount < 50.0,
            PriceRange::From50To100 => (50.0..=100.0).contains(&amount),
            PriceRange::Over100 => amount > 100.0,
        }
    }
}

/// Search/category/price filter applied to the storefront listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price_range: PriceRange,
}

impl CatalogFilter {
    /// Products without a usable price are never listed.
    pub fn matches(&self, product: &Product) -> bool {
        let Some(price) = product.price() else {
            return false;
        };

        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|q| product.matches_search(q));

        let category_ok = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => true,
            Some(c) => product.category() == c,
        };

        search_ok && category_ok && self.price_range.contains(price.amount())
    }

    /// Filter `products`, keeping their order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// `"All"` followed by each distinct non-empty category in first-seen order.
pub fn catalog_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for p in products {
        let c = p.category();
        if !c.is_empty() && seen.insert(c) {
            out.push(c.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;
    use chrono::Utc;
    use storefront_core::ProductId;

    fn product(name: &str, category: &str, price: Option<f64>) -> Product {
        Product::new(ProductId::new(), name, Utc::now())
            .with_category(category)
            .with_price(price.and_then(Price::new))
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("Desk Lamp", "Home", Some(35.0)),
            product("Chef Knife", "Kitchen", Some(50.0)),
            product("Blender", "Kitchen", Some(100.0)),
            product("Espresso Machine", "Kitchen", Some(249.0)),
            product("Mystery Box", "Home", None),
        ]
    }

    fn names(list: Vec<&Product>) -> Vec<&str> {
        list.into_iter().map(Product::name).collect()
    }

    #[test]
    fn default_filter_hides_unpriced_products_only() {
        let products = fixture();
        let out = CatalogFilter::default().apply(&products);
        assert_eq!(
            names(out),
            vec!["Desk Lamp", "Chef Knife", "Blender", "Espresso Machine"]
        );
    }

    #[test]
    fn price_band_edges() {
        let products = fixture();
        let f = |range| CatalogFilter {
            price_range: range,
            ..CatalogFilter::default()
        };

        assert_eq!(names(f(PriceRange::Under50).apply(&products)), vec!["Desk Lamp"]);
        assert_eq!(
            names(f(PriceRange::From50To100).apply(&products)),
            vec!["Chef Knife", "Blender"]
        );
        assert_eq!(
            names(f(PriceRange::Over100).apply(&products)),
            vec!["Espresso Machine"]
        );
    }

    #[test]
    fn search_and_category_combine() {
        let products = fixture();
        let filter = CatalogFilter {
            search: Some("KITCHEN".to_string()),
            category: Some("Kitchen".to_string()),
            price_range: PriceRange::Over100,
        };
        assert_eq!(names(filter.apply(&products)), vec!["Espresso Machine"]);

        let filter = CatalogFilter {
            category: Some(ALL_CATEGORIES.to_string()),
            search: Some("lamp".to_string()),
            ..CatalogFilter::default()
        };
        assert_eq!(names(filter.apply(&products)), vec!["Desk Lamp"]);
    }

    #[test]
    fn price_range_parses_from_query_values() {
        let r: PriceRange = serde_json::from_str("\"50-100\"").unwrap();
        assert_eq!(r, PriceRange::From50To100);
        let r: PriceRange = serde_json::from_str("\"under-50\"").unwrap();
        assert_eq!(r, PriceRange::Under50);
    }

    #[test]
    fn categories_start_with_all_in_first_seen_order() {
        let mut products = fixture();
        products.push(product("Trowel", "", Some(9.0)));
        assert_eq!(catalog_categories(&products), vec!["All", "Home", "Kitchen"]);
    }
}
