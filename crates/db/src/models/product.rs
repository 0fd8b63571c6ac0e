//! Product documents (source of truth, never denormalized).

use amazonas_core::{CurrencyCode, Price, ProductId, ProductStatus};
use bson::{DateTime, Document};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub brand: Option<String>,
    #[serde(with = "crate::models::money")]
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub images: Vec<String>,
    /// Open attribute map (color, size, storage, ...).
    #[serde(default)]
    pub attributes: Document,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub stock: Stock,
    #[serde(default)]
    pub status: ProductStatus,
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
}

impl Product {
    /// Current unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency)
    }
}

/// Physical dimensions used for shipping quotes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth_cm: Option<f64>,
}

/// Inventory counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stock {
    pub available: u32,
    pub reserved: u32,
}
