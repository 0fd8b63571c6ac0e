//! Document models for the six collections.
//!
//! Each model serializes to exactly the shape its collection validator
//! expects. Fields that only exist in the denormalized (v2) generation are
//! `Option`s skipped when `None`, so one set of types covers both
//! generations.
//!
//! Money is kept as [`rust_decimal::Decimal`] in memory and stored as a BSON
//! `decimal` (see [`money`]).

pub mod cart;
pub mod customer;
pub mod money;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod snapshot;

pub use cart::{Cart, CartItem};
pub use customer::{Address, Customer, StreetNumber};
pub use order::{Order, OrderItem, OrderSummary, PaymentSummary};
pub use payment::{Payment, PaymentMetadata};
pub use product::{Dimensions, Product, Stock};
pub use review::Review;
pub use snapshot::{
    CartProductSnapshot, CustomerSnapshot, OrderProductSnapshot, ReviewProductSnapshot,
    ReviewerSnapshot,
};
