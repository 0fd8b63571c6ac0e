//! Shopping cart documents. One cart per customer.

use amazonas_core::{CustomerId, ProductId, SchemaGeneration};
use bson::{DateTime, Document};
use serde::{Deserialize, Serialize};

use super::{CartProductSnapshot, Product};

/// A customer's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub customer_id: CustomerId,
    pub items: Vec<CartItem>,
    pub updated_at: DateTime,
}

/// A line in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub qty: u32,
    pub variant: Option<Document>,
    /// Present in the denormalized generation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_snapshot: Option<CartProductSnapshot>,
}

impl CartItem {
    /// Add `qty` units of `product`, capturing a snapshot when the generation
    /// is denormalized.
    #[must_use]
    pub fn new(product: &Product, qty: u32, generation: SchemaGeneration) -> Self {
        Self {
            product_id: product.product_id.clone(),
            qty,
            variant: None,
            product_snapshot: generation
                .is_denormalized()
                .then(|| CartProductSnapshot::from(product)),
        }
    }
}
