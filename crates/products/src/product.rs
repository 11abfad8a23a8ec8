use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use storefront_core::{Entity, ProductId};

use crate::price::Price;

/// Raw product document as persisted in the document store.
///
/// Older documents carry stock under `stock` instead of `inventory`, prices as
/// grouped strings, and a single `image` instead of `images`. The drift-prone
/// fields stay loosely typed here so a single odd document still loads;
/// [`Product::from_document`] is the only place that interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub id: ProductId,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub slug: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<JsonValue>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub images: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<JsonValue>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Reads an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl ProductDocument {
    /// Empty document for `id`; every other field absent.
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            slug: None,
            name: None,
            category: None,
            description: None,
            price: None,
            inventory: None,
            stock: None,
            in_stock: None,
            images: None,
            image: None,
            features: None,
            rating: None,
            review_count: None,
            last_updated: None,
        }
    }
}

/// Normalized catalog product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    slug: String,
    name: String,
    category: String,
    description: String,
    price: Option<Price>,
    stock_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_stock: Option<bool>,
    images: Vec<String>,
    features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<f64>,
    review_count: u32,
    last_updated: DateTime<Utc>,
}

impl Product {
    /// Minimal product; everything else defaults (no price, no stock).
    pub fn new(id: ProductId, name: impl Into<String>, last_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            slug: String::new(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            price: None,
            stock_quantity: 0,
            in_stock: None,
            images: Vec::new(),
            features: Vec::new(),
            rating: None,
            review_count: 0,
            last_updated,
        }
    }

    /// Normalize a stored document.
    ///
    /// Never fails: malformed fields fall back to their defaults (no price,
    /// zero stock, empty strings). Quantity is the first usable value of
    /// `inventory`, then `stock`, then 0.
    pub fn from_document(doc: ProductDocument) -> Self {
        let stock_quantity = doc
            .inventory
            .as_ref()
            .and_then(quantity_from_value)
            .or_else(|| doc.stock.as_ref().and_then(quantity_from_value))
            .unwrap_or(0);

        let images = match doc.images {
            Some(images) if !images.is_empty() => images,
            _ => doc.image.into_iter().filter(|i| !i.trim().is_empty()).collect(),
        };

        Self {
            id: doc.id,
            slug: doc.slug.unwrap_or_default(),
            name: doc.name.unwrap_or_default(),
            category: doc.category.map(|c| c.trim().to_string()).unwrap_or_default(),
            description: doc.description.unwrap_or_default(),
            price: doc.price.as_ref().and_then(Price::from_value),
            stock_quantity,
            in_stock: doc.in_stock.as_ref().and_then(JsonValue::as_bool),
            images,
            features: doc.features.unwrap_or_default(),
            rating: doc
                .rating
                .as_ref()
                .and_then(JsonValue::as_f64)
                .filter(|r| r.is_finite()),
            review_count: doc
                .review_count
                .as_ref()
                .and_then(quantity_from_value)
                .unwrap_or(0),
            last_updated: doc.last_updated.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    /// Canonical document for this product; legacy fields are not written.
    pub fn to_document(&self) -> ProductDocument {
        ProductDocument {
            id: self.id,
            slug: Some(self.slug.clone()),
            name: Some(self.name.clone()),
            category: Some(self.category.clone()),
            description: Some(self.description.clone()),
            price: self.price.map(|p| JsonValue::from(p.amount())),
            inventory: Some(JsonValue::from(self.stock_quantity)),
            stock: None,
            in_stock: self.in_stock.map(JsonValue::Bool),
            images: Some(self.images.clone()),
            image: None,
            features: Some(self.features.clone()),
            rating: self.rating.map(JsonValue::from),
            review_count: Some(JsonValue::from(self.review_count)),
            last_updated: Some(self.last_updated),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_price(mut self, price: Option<Price>) -> Self {
        self.price = price;
        self
    }

    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = quantity;
        self
    }

    pub fn with_in_stock(mut self, in_stock: Option<bool>) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn with_rating(mut self, rating: Option<f64>, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category as stored; may be empty.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// Effective quantity on hand.
    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    /// Explicit availability override, if one was recorded.
    pub fn in_stock(&self) -> Option<bool> {
        self.in_stock
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Price × quantity; products without a usable price are worth nothing.
    pub fn stock_value(&self) -> f64 {
        self.price.unwrap_or(Price::ZERO).times(self.stock_quantity)
    }

    /// Can a shopper add this product to a cart right now.
    pub fn is_available(&self) -> bool {
        self.in_stock != Some(false) && self.stock_quantity > 0
    }

    /// Case-insensitive substring match over name or category.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query) || self.category.to_lowercase().contains(&query)
    }

    /// Record a stock change.
    pub fn set_stock(&mut self, quantity: u32, in_stock: Option<bool>, now: DateTime<Utc>) {
        self.stock_quantity = quantity;
        if in_stock.is_some() {
            self.in_stock = in_stock;
        }
        self.last_updated = now;
    }

    pub(crate) fn touch(mut self, now: DateTime<Utc>) -> Self {
        self.last_updated = now;
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Lenient non-negative integer reading: numbers or numeric strings; negative
/// values clamp to 0 and fractions truncate. Anything else is unusable.
pub(crate) fn quantity_from_value(value: &JsonValue) -> Option<u32> {
    let raw = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.clamp(0.0, f64::from(u32::MAX)) as u32)
}
