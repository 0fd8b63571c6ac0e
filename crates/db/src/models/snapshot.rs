//! Point-in-time snapshots embedded by the denormalized (v2) generation.
//!
//! A snapshot copies selected fields of a referenced customer or product when
//! the embedding event happens (add to cart, order placement, review). It is
//! never refreshed afterwards, so it keeps describing the entity as it was at
//! that moment even when the source document later changes.

use amazonas_core::{CurrencyCode, CustomerId, Email, ProductStatus};
use bson::Document;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Address, Customer, Product};

/// Product as it looked when added to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartProductSnapshot {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub brand: Option<String>,
    #[serde(default)]
    pub attributes: Document,
    #[serde(with = "crate::models::money")]
    pub price_at_add: Decimal,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<&Product> for CartProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            attributes: product.attributes.clone(),
            price_at_add: product.price,
            currency: product.currency,
            images: product.images.clone(),
        }
    }
}

/// Product as it looked when an order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProductSnapshot {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub brand: Option<String>,
    #[serde(default)]
    pub attributes: Document,
    #[serde(with = "crate::models::money")]
    pub price_at_order: Decimal,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: Option<ProductStatus>,
}

impl From<&Product> for OrderProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            attributes: product.attributes.clone(),
            price_at_order: product.price,
            currency: product.currency,
            images: product.images.clone(),
            status: Some(product.status),
        }
    }
}

/// Product fields shown next to a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewProductSnapshot {
    pub title: String,
    pub category: String,
    pub brand: Option<String>,
}

impl From<&Product> for ReviewProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
        }
    }
}

/// Customer as they were when an order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub customer_id: Option<CustomerId>,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_address: Option<Address>,
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: Some(customer.customer_id.clone()),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phones: customer.phones.clone(),
            default_address: customer.default_address().cloned(),
        }
    }
}

/// Reviewer identity shown next to a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerSnapshot {
    pub name: String,
    pub email: Email,
}

impl From<&Customer> for ReviewerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }
}
