//! Admin form input and its mapping onto product records.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use storefront_core::{DomainError, DomainResult, ProductId};

use crate::price::Price;
use crate::product::{quantity_from_value, Product};
use crate::slug::slugify;

/// Product create/edit form as submitted by the admin panel.
///
/// `price` accepts a number or a grouped string; `inventory` and the legacy
/// `stock` key are both accepted, `inventory` winning when both are sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub price: Option<JsonValue>,
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub inventory: Option<JsonValue>,
    pub stock: Option<JsonValue>,
    pub in_stock: Option<bool>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl ProductForm {
    /// Validate and build a brand new product.
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> DomainResult<Product> {
        let fields = self.validate()?;
        Ok(fields.build(Product::new(id, "", now)))
    }

    /// Validate and apply this form over `existing`, keeping its identity.
    pub fn apply_to(self, existing: &Product, now: DateTime<Utc>) -> DomainResult<Product> {
        let fields = self.validate()?;
        Ok(fields.build(existing.clone().touch(now)))
    }

    fn validate(self) -> DomainResult<ValidForm> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(DomainError::validation("category is required"));
        }

        let price = match &self.price {
            None | Some(JsonValue::Null) => {
                return Err(DomainError::validation("price is required"));
            }
            Some(raw) => Price::from_value(raw).ok_or_else(|| {
                DomainError::validation("price must be a non-negative number")
            })?,
        };

        let slug = if self.slug.trim().is_empty() {
            slugify(&name)
        } else {
            slugify(&self.slug)
        };
        if slug.is_empty() {
            return Err(DomainError::validation(
                "slug must contain at least one letter or digit",
            ));
        }

        let stock = resolve_quantity(self.inventory.as_ref(), self.stock.as_ref())?.unwrap_or(0);

        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(DomainError::validation("rating must be between 0 and 5"));
            }
        }

        Ok(ValidForm {
            name,
            slug,
            category,
            description: self.description.trim().to_string(),
            price,
            stock,
            in_stock: self.in_stock,
            images: non_blank(self.images),
            features: non_blank(self.features),
            rating: self.rating,
            review_count: self.review_count.unwrap_or(0),
        })
    }
}

struct ValidForm {
    name: String,
    slug: String,
    category: String,
    description: String,
    price: Price,
    stock: u32,
    in_stock: Option<bool>,
    images: Vec<String>,
    features: Vec<String>,
    rating: Option<f64>,
    review_count: u32,
}

impl ValidForm {
    fn build(self, base: Product) -> Product {
        Product::new(base.id_typed(), self.name, base.last_updated())
            .with_slug(self.slug)
            .with_category(self.category)
            .with_description(self.description)
            .with_price(Some(self.price))
            .with_stock(self.stock)
            .with_in_stock(self.in_stock)
            .with_images(self.images)
            .with_features(self.features)
            .with_rating(self.rating, self.review_count)
    }
}

/// Dashboard stock edit: `{inventory?, stock?, inStock?}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockUpdate {
    pub inventory: Option<JsonValue>,
    pub stock: Option<JsonValue>,
    pub in_stock: Option<bool>,
}

impl StockUpdate {
    /// Apply the edit; fields that were not sent keep their current value.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) -> DomainResult<()> {
        if self.inventory.is_none() && self.stock.is_none() && self.in_stock.is_none() {
            return Err(DomainError::validation(
                "at least one of inventory, stock or inStock is required",
            ));
        }
        let quantity = resolve_quantity(self.inventory.as_ref(), self.stock.as_ref())?
            .unwrap_or(product.stock_quantity());
        product.set_stock(quantity, self.in_stock, now);
        Ok(())
    }
}

/// `inventory` before `stock`; a sent value must be a non-negative integer.
fn resolve_quantity(
    inventory: Option<&JsonValue>,
    stock: Option<&JsonValue>,
) -> DomainResult<Option<u32>> {
    let raw = match inventory.filter(|v| !v.is_null()).or(stock.filter(|v| !v.is_null())) {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let negative = match raw {
        JsonValue::String(s) => s.trim().starts_with('-'),
        other => other.as_f64().is_some_and(|v| v < 0.0),
    };
    match quantity_from_value(raw) {
        Some(q) if !negative => Ok(Some(q)),
        _ => Err(DomainError::validation(
            "stock quantity must be a non-negative integer",
        )),
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
