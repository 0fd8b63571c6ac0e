//! Index definitions per collection.
//!
//! The same indexes apply to both schema generations. Every index is named
//! explicitly so re-running `createIndexes` with an identical definition is
//! a no-op.

use amazonas_core::CollectionKind;
use bson::{Bson, Document};
use mongodb::IndexModel;
use mongodb::options::IndexOptions;

/// Direction or type of one indexed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey {
    Ascending,
    Text,
}

impl IndexKey {
    fn to_bson(self) -> Bson {
        match self {
            Self::Ascending => Bson::Int32(1),
            Self::Text => Bson::String("text".to_owned()),
        }
    }
}

/// A named index over one or more fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: &'static str,
    pub keys: &'static [(&'static str, IndexKey)],
    pub unique: bool,
}

impl IndexSpec {
    /// Non-unique index; each key carries its own direction or type.
    const fn plain(name: &'static str, keys: &'static [(&'static str, IndexKey)]) -> Self {
        Self {
            name,
            keys,
            unique: false,
        }
    }

    const fn unique(name: &'static str, keys: &'static [(&'static str, IndexKey)]) -> Self {
        Self {
            name,
            keys,
            unique: true,
        }
    }

    /// Key document, preserving field order.
    #[must_use]
    pub fn key_document(&self) -> Document {
        self.keys
            .iter()
            .map(|(field, key)| ((*field).to_owned(), key.to_bson()))
            .collect()
    }

    /// Driver model passed to `createIndexes`.
    #[must_use]
    pub fn to_model(&self) -> IndexModel {
        let mut options = IndexOptions::builder().name(self.name.to_owned()).build();
        if self.unique {
            options.unique = Some(true);
        }
        IndexModel::builder()
            .keys(self.key_document())
            .options(options)
            .build()
    }
}

use IndexKey::{Ascending, Text};

const CUSTOMERS: &[IndexSpec] = &[
    IndexSpec::unique("ux_customer_id", &[("customer_id", Ascending)]),
    IndexSpec::unique("ux_email", &[("email", Ascending)]),
];

const PRODUCTS: &[IndexSpec] = &[
    IndexSpec::unique("ux_product_id", &[("product_id", Ascending)]),
    IndexSpec::plain("ix_category", &[("category", Ascending)]),
    IndexSpec::plain(
        "txt_title_description",
        &[("title", Text), ("description", Text)],
    ),
    IndexSpec::plain("ix_status", &[("status", Ascending)]),
];

const CARTS: &[IndexSpec] = &[
    IndexSpec::unique("ux_customer_cart", &[("customer_id", Ascending)]),
    IndexSpec::plain("ix_updated_at", &[("updated_at", Ascending)]),
    IndexSpec::plain("ix_items_product", &[("items.product_id", Ascending)]),
];

const ORDERS: &[IndexSpec] = &[
    IndexSpec::unique("ux_order_id", &[("order_id", Ascending)]),
    IndexSpec::plain(
        "ix_customer_created",
        &[("customer_id", Ascending), ("created_at", Ascending)],
    ),
    IndexSpec::plain("ix_status", &[("status", Ascending)]),
    IndexSpec::plain("ix_created_at", &[("created_at", Ascending)]),
    IndexSpec::plain("ix_items_product", &[("items.product_id", Ascending)]),
];

const REVIEWS: &[IndexSpec] = &[
    IndexSpec::unique("ux_review_id", &[("review_id", Ascending)]),
    IndexSpec::plain(
        "ix_product_created",
        &[("product_id", Ascending), ("created_at", Ascending)],
    ),
    IndexSpec::plain("ix_customer", &[("customer_id", Ascending)]),
    // one review per customer and product
    IndexSpec::unique(
        "ux_product_customer_review",
        &[("product_id", Ascending), ("customer_id", Ascending)],
    ),
];

const PAYMENTS: &[IndexSpec] = &[
    IndexSpec::unique("ux_payment_id", &[("payment_id", Ascending)]),
    IndexSpec::plain("ix_order", &[("order_id", Ascending)]),
    IndexSpec::plain("ix_status", &[("status", Ascending)]),
    IndexSpec::plain("ix_created_at", &[("created_at", Ascending)]),
];

/// Indexes of `kind`.
#[must_use]
pub const fn indexes(kind: CollectionKind) -> &'static [IndexSpec] {
    match kind {
        CollectionKind::Customers => CUSTOMERS,
        CollectionKind::Products => PRODUCTS,
        CollectionKind::Carts => CARTS,
        CollectionKind::Orders => ORDERS,
        CollectionKind::Reviews => REVIEWS,
        CollectionKind::Payments => PAYMENTS,
    }
}
