use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use storefront_inventory::{InventoryStats, StockLevel};
use storefront_products::Product;

/// Rating shown on the detail page when a product has none recorded.
pub const DEFAULT_RATING: f64 = 4.5;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    #[default]
    LowStock,
    OutOfStock,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    pub tab: DashboardTab,
    pub search: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

/// Product plus the display fields the detail page needs.
pub fn product_detail_to_json(product: &Product) -> JsonValue {
    let mut value = json!(product);
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "rating".to_string(),
            json!(product.rating().unwrap_or(DEFAULT_RATING)),
        );
        object.insert("available".to_string(), json!(product.is_available()));
        object.insert(
            "availableQuantity".to_string(),
            json!(product.stock_quantity()),
        );
        object.insert(
            "stockLevel".to_string(),
            json!(StockLevel::classify(product).as_str()),
        );
    }
    value
}

pub fn deleted_product_to_json(product: &Product) -> JsonValue {
    json!({
        "message": "Product deleted successfully",
        "product": product,
    })
}

pub fn bulk_delete_to_json(deleted_count: u64) -> JsonValue {
    json!({
        "message": format!("{deleted_count} products deleted successfully"),
        "deletedCount": deleted_count,
    })
}

pub fn catalog_to_json(products: &[&Product], categories: &[String]) -> JsonValue {
    json!({
        "products": products,
        "categories": categories,
        "total": products.len(),
    })
}

/// Dashboard view model.
///
/// Counters and the category table always describe the whole snapshot; the
/// search only narrows the selected tab's list.
pub fn dashboard_to_json(stats: &InventoryStats, query: &DashboardQuery) -> JsonValue {
    let mut categories: Vec<_> = stats.category_breakdown.iter().collect();
    categories.sort_by(|a, b| b.1.count.cmp(&a.1.count));

    let list = match query.tab {
        DashboardTab::LowStock => &stats.low_stock_list,
        DashboardTab::OutOfStock => &stats.out_of_stock_list,
    };
    let search = query.search.as_deref().unwrap_or("");
    let items: Vec<&Product> = list.iter().filter(|p| p.matches_search(search)).collect();

    json!({
        "totals": {
            "totalProducts": stats.total_products,
            "inStockCount": stats.in_stock_count,
            "lowStockCount": stats.low_stock_count,
            "outOfStockCount": stats.out_of_stock_count,
            "totalInventoryValue": stats.total_inventory_value,
        },
        "categories": categories
            .into_iter()
            .map(|(name, c)| json!({
                "name": name,
                "count": c.count,
                "totalStock": c.total_stock,
                "lowStockCount": c.low_stock_count,
                "outOfStockCount": c.out_of_stock_count,
            }))
            .collect::<Vec<_>>(),
        "tab": query.tab,
        "search": search,
        "items": items,
        "generatedAt": stats.generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storefront_core::ProductId;
    use storefront_inventory::compute_stats;
    use storefront_products::Price;

    fn product(name: &str, category: &str, qty: u32) -> Product {
        Product::new(ProductId::new(), name, Utc::now())
            .with_category(category)
            .with_price(Price::new(5.0))
            .with_stock(qty)
    }

    #[test]
    fn detail_defaults_rating_and_reports_availability() {
        let p = product("Mug", "Kitchen", 0);
        let v = product_detail_to_json(&p);
        assert_eq!(v["rating"], json!(4.5));
        assert_eq!(v["available"], json!(false));
        assert_eq!(v["availableQuantity"], json!(0));
        assert_eq!(v["stockLevel"], json!("out-of-stock"));

        let p = product("Mug", "Kitchen", 3).with_rating(Some(3.8), 12);
        let v = product_detail_to_json(&p);
        assert_eq!(v["rating"], json!(3.8));
        assert_eq!(v["available"], json!(true));
        assert_eq!(v["stockLevel"], json!("low-stock"));
    }

    #[test]
    fn dashboard_sorts_categories_and_searches_only_the_tab() {
        let products = vec![
            product("Rake", "Garden", 50),
            product("Cup", "Kitchen", 2),
            product("Bowl", "Kitchen", 4),
            product("Pan", "Kitchen", 0),
        ];
        let stats = compute_stats(&products, Utc::now());
        let query = DashboardQuery {
            tab: DashboardTab::LowStock,
            search: Some("bow".to_string()),
        };
        let v = dashboard_to_json(&stats, &query);

        assert_eq!(v["totals"]["totalProducts"], json!(4));
        assert_eq!(v["totals"]["lowStockCount"], json!(2));
        assert_eq!(v["categories"][0]["name"], json!("Kitchen"));
        assert_eq!(v["categories"][1]["name"], json!("Garden"));
        assert_eq!(v["tab"], json!("low-stock"));
        let items = v["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], json!("Bowl"));
    }
}
