//! Payment documents. Payments reference orders only.

use amazonas_core::{CurrencyCode, OrderId, PaymentId, PaymentMethod, PaymentStatus};
use bson::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentId,
    pub order_id: OrderId,
    #[serde(with = "crate::models::money")]
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Reference assigned by the payment provider.
    pub provider_ref: Option<String>,
    #[serde(default)]
    pub metadata: PaymentMetadata,
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
}

/// Provider-specific payment details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentMetadata {
    /// Number of card installments.
    pub installments: u32,
}
