//! Currency amount normalized from the two price encodings found in stored
//! documents: plain JSON numbers and strings with thousands separators
//! (`"2,999"`).

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use storefront_core::ValueObject;

/// Non-negative, finite unit price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl ValueObject for Price {}

impl Price {
    pub const ZERO: Price = Price(0.0);

    /// Build a price from a float; `None` for negative, NaN or infinite input.
    pub fn new(amount: f64) -> Option<Self> {
        if amount.is_finite() && amount >= 0.0 {
            Some(Self(amount))
        } else {
            None
        }
    }

    /// Parse a textual price, ignoring grouping separators and surrounding
    /// whitespace. The whole remaining string must be a number.
    pub fn parse_text(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().and_then(Self::new)
    }

    /// Lenient conversion from a stored JSON value.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_f64().and_then(Self::new),
            JsonValue::String(s) => Self::parse_text(s),
            _ => None,
        }
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Value of `quantity` units at this price.
    pub fn times(&self, quantity: u32) -> f64 {
        self.0 * f64::from(quantity)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn grouped_string_and_number_share_a_domain() {
        assert_eq!(Price::from_value(&json!("2,999")), Price::new(2999.0));
        assert_eq!(Price::from_value(&json!(2999)), Price::new(2999.0));
        assert_eq!(Price::from_value(&json!("1,24,999.50")), Price::new(124999.5));
    }

    #[test]
    fn malformed_values_are_none() {
        assert_eq!(Price::from_value(&json!("bad")), None);
        assert_eq!(Price::from_value(&json!("12abc")), None);
        assert_eq!(Price::from_value(&json!("")), None);
        assert_eq!(Price::from_value(&json!(true)), None);
        assert_eq!(Price::from_value(&json!(-5)), None);
        assert_eq!(Price::from_value(&json!(null)), None);
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(Price::new(f64::NAN), None);
        assert_eq!(Price::new(f64::INFINITY), None);
        assert_eq!(Price::parse_text("inf"), None);
    }

    #[test]
    fn times_multiplies_by_quantity() {
        let p = Price::parse_text("2,999").unwrap();
        assert_eq!(p.times(3), 8997.0);
        assert_eq!(Price::ZERO.times(100), 0.0);
    }
}
