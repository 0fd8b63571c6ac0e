//! Order documents.
//!
//! In the normalized generation each item carries its `unit_price`; in the
//! denormalized generation the price lives in the item's
//! `product_snapshot.price_at_order` and the order also embeds a
//! `customer_snapshot` and a `payment_summary`. Either way
//! `total_amount` is the exact sum of `price × qty` over the items.

use amazonas_core::{
    CurrencyCode, CustomerId, OrderId, OrderStatus, PaymentId, PaymentMethod, PaymentStatus, Price,
    ProductId, SchemaGeneration,
};
use bson::{DateTime, Document};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Address, CustomerSnapshot, OrderProductSnapshot, Product};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_snapshot: Option<CustomerSnapshot>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_summary: Option<PaymentSummary>,
    #[serde(with = "crate::models::money")]
    pub total_amount: Decimal,
    pub currency: CurrencyCode,
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
}

impl Order {
    /// Sum of the line totals of `items`, pricing unsnapshotted items in
    /// `currency`.
    #[must_use]
    pub fn total_of(items: &[OrderItem], currency: CurrencyCode) -> Decimal {
        items
            .iter()
            .filter_map(|item| item.line_total(currency))
            .map(|total| total.amount)
            .sum()
    }

    /// Whether `total_amount` equals the sum of the item line totals and
    /// every item has a price.
    #[must_use]
    pub fn total_matches_items(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.price(self.currency).is_some())
            && self.total_amount == Self::total_of(&self.items, self.currency)
    }
}

/// A line in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub qty: u32,
    pub variant: Option<Document>,
    /// Present in the normalized generation only.
    #[serde(
        default,
        with = "crate::models::money::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<Decimal>,
    /// Present in the denormalized generation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_snapshot: Option<OrderProductSnapshot>,
}

impl OrderItem {
    /// Order `qty` units of `product` at its current price.
    #[must_use]
    pub fn new(product: &Product, qty: u32, generation: SchemaGeneration) -> Self {
        let (unit_price, product_snapshot) = if generation.is_denormalized() {
            (None, Some(OrderProductSnapshot::from(product)))
        } else {
            (Some(product.price), None)
        };
        Self {
            product_id: product.product_id.clone(),
            qty,
            variant: None,
            unit_price,
            product_snapshot,
        }
    }

    /// Price paid per unit: the snapshot's `price_at_order` in the snapshot
    /// currency, else `unit_price` in the order's `currency`.
    #[must_use]
    pub fn price(&self, currency: CurrencyCode) -> Option<Price> {
        self.product_snapshot
            .as_ref()
            .map(|snapshot| Price::new(snapshot.price_at_order, snapshot.currency))
            .or_else(|| self.unit_price.map(|amount| Price::new(amount, currency)))
    }

    /// `price × qty`, if the item has a price.
    #[must_use]
    pub fn line_total(&self, currency: CurrencyCode) -> Option<Price> {
        self.price(currency).map(|price| price.times(self.qty))
    }
}

/// Denormalized payment state kept on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub payment_id: Option<PaymentId>,
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
}

impl PaymentSummary {
    /// Summary for an order awaiting a card payment.
    #[must_use]
    pub const fn pending(method: PaymentMethod) -> Self {
        Self {
            payment_id: None,
            method: Some(method),
            status: Some(PaymentStatus::Pending),
        }
    }
}

/// Projection of an order used to derive its payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    #[serde(with = "crate::models::money")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id.clone(),
            total_amount: order.total_amount,
            currency: order.currency,
        }
    }
}
