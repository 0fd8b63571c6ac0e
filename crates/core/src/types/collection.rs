//! Collection kinds and schema generations.

use serde::{Deserialize, Serialize};

/// The six collections of the e-commerce database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Customers,
    Products,
    Carts,
    Orders,
    Reviews,
    Payments,
}

impl CollectionKind {
    /// All kinds in dependency order: every kind appears after the kinds
    /// it references.
    pub const ALL: [Self; 6] = [
        Self::Customers,
        Self::Products,
        Self::Carts,
        Self::Orders,
        Self::Reviews,
        Self::Payments,
    ];

    /// Collection name in the database.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Carts => "carts",
            Self::Orders => "orders",
            Self::Reviews => "reviews",
            Self::Payments => "payments",
        }
    }

    /// Kinds whose documents must exist before this kind can be seeded.
    #[must_use]
    pub const fn dependencies(self) -> &'static [Self] {
        match self {
            Self::Customers | Self::Products => &[],
            Self::Carts | Self::Orders | Self::Reviews => &[Self::Customers, Self::Products],
            Self::Payments => &[Self::Orders],
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("invalid collection: {s}"))
    }
}

/// Schema generation of the database.
///
/// - `V1` is normalized: carts, orders and reviews only hold foreign ids.
/// - `V2` embeds point-in-time snapshots of the referenced customer and
///   product so reads never need a cross-collection lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaGeneration {
    V1,
    #[default]
    V2,
}

impl SchemaGeneration {
    /// Whether documents embed snapshots of referenced entities.
    #[must_use]
    pub const fn is_denormalized(self) -> bool {
        matches!(self, Self::V2)
    }

    /// Database name used when `MONGO_DB` is not set.
    #[must_use]
    pub const fn default_database(self) -> &'static str {
        match self {
            Self::V1 => "amazonas-db",
            Self::V2 => "amazonas-db-v2",
        }
    }
}

impl std::fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

impl std::str::FromStr for SchemaGeneration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Self::V1),
            "v2" | "2" => Ok(Self::V2),
            _ => Err(format!("invalid schema generation: {s} (expected v1 or v2)")),
        }
    }
}
