//! Product review documents.
//!
//! The `ux_product_customer_review` index allows one review per
//! (product, customer) pair.

use amazonas_core::{CustomerId, ProductId, Rating, ReviewId};
use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::{ReviewProductSnapshot, ReviewerSnapshot};

/// A customer's review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub product_id: ProductId,
    pub customer_id: CustomerId,
    pub rating: Rating,
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_snapshot: Option<ReviewProductSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_snapshot: Option<ReviewerSnapshot>,
    pub created_at: DateTime,
}
