//! Customer documents (source of truth, never denormalized).

use amazonas_core::{CustomerId, Email};
use bson::DateTime;
use serde::{Deserialize, Serialize};

/// A customer of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub created_at: DateTime,
    pub updated_at: Option<DateTime>,
}

impl Customer {
    /// The address used for shipping and order snapshots.
    ///
    /// `is_default` is advisory: the first flagged address wins, otherwise
    /// the first address, otherwise none.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|address| address.is_default)
            .or_else(|| self.addresses.first())
    }
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub label: String,
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<StreetNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// House number, stored as written: `123` or `"123A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreetNumber {
    Number(i32),
    Text(String),
}

impl std::fmt::Display for StreetNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
