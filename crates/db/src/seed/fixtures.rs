//! Sample customers and products.
//!
//! ## YAML Format
//!
//! ```yaml
//! customers:
//!   - name: Lucas Almeida
//!     email: lucas.almeida@example.com
//!     phones: ["+55 11 91234-5678"]
//!     addresses:
//!       - { label: Casa, street: Rua das Flores, city: São Paulo,
//!           state: SP, zip: "01001-000", country: Brasil, is_default: true }
//!
//! products:
//!   - product_id: SKU-001
//!     title: Smartphone Galaxy S25
//!     category: Eletrônicos
//!     price: 3999.90
//!     currency: BRL
//!     stock: { available: 50, reserved: 0 }
//! ```
//!
//! `currency` defaults to `BRL` and must be one of `BRL`, `USD` or `EUR`;
//! other codes are rejected as a parse error even though the collection
//! validators would store them.
//!
//! The built-in set lives in `fixtures/sample.yaml` and is compiled into the
//! binary.

use std::collections::HashSet;

use amazonas_core::{CurrencyCode, CustomerId, Email, Price, ProductId, ProductStatus};
use bson::{DateTime, Document};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Address, Customer, Dimensions, Product, Stock};

const SAMPLE: &str = include_str!("../../fixtures/sample.yaml");

/// Errors raised while loading fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid fixture YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("fixtures must declare at least one {0}")]
    Empty(&'static str),

    #[error("duplicate customer email: {0}")]
    DuplicateEmail(Email),

    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// Full fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    pub customers: Vec<CustomerFixture>,
    pub products: Vec<ProductFixture>,
}

/// A customer before it receives an id and timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerFixture {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// A product before it receives timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    pub product_id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: Document,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub stock: Stock,
    #[serde(default)]
    pub status: ProductStatus,
}

impl Fixtures {
    /// The fixtures compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded file is invalid.
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::from_yaml(SAMPLE)
    }

    /// Parse and validate fixtures from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not match the fixture format, a list
    /// is empty, emails or SKUs repeat, or a price is negative.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixtures: Self = serde_yaml::from_str(yaml)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Check the constraints the unique indexes would otherwise reject
    /// half-way through seeding.
    ///
    /// # Errors
    ///
    /// See [`Fixtures::from_yaml`].
    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.customers.is_empty() {
            return Err(FixtureError::Empty("customer"));
        }
        if self.products.is_empty() {
            return Err(FixtureError::Empty("product"));
        }

        let mut emails = HashSet::new();
        for customer in &self.customers {
            if !emails.insert(&customer.email) {
                return Err(FixtureError::DuplicateEmail(customer.email.clone()));
            }
        }

        let mut skus = HashSet::new();
        for product in &self.products {
            if !skus.insert(&product.product_id) {
                return Err(FixtureError::DuplicateProduct(product.product_id.clone()));
            }
            if Price::new(product.price, product.currency).is_negative() {
                return Err(FixtureError::NegativePrice(product.product_id.clone()));
            }
        }
        Ok(())
    }
}

impl CustomerFixture {
    /// Materialize with a fresh `customer_id`.
    #[must_use]
    pub fn into_customer(self, now: DateTime) -> Customer {
        Customer {
            customer_id: CustomerId::generate(),
            name: self.name,
            email: self.email,
            phones: self.phones,
            addresses: self.addresses,
            created_at: now,
            updated_at: None,
        }
    }
}

impl ProductFixture {
    #[must_use]
    pub fn into_product(self, now: DateTime) -> Product {
        Product {
            product_id: self.product_id,
            title: self.title,
            description: self.description,
            category: self.category,
            brand: self.brand,
            price: self.price,
            currency: self.currency,
            images: self.images,
            attributes: self.attributes,
            dimensions: self.dimensions,
            stock: self.stock,
            status: self.status,
            created_at: now,
            updated_at: None,
        }
    }
}
