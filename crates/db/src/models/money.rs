//! Monetary amounts stored as BSON `decimal` (Decimal128).
//!
//! Amounts are written exactly, so `total_amount == price × qty` holds on the
//! stored documents and not only in memory. Reads also accept `double`,
//! `int` and `long`, which the validators allow and which hand-edited
//! documents tend to contain.
//!
//! Use with `#[serde(with = "crate::models::money")]`, or
//! `crate::models::money::option` for optional amounts.

use std::str::FromStr;

use bson::{Bson, Decimal128};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Exact Decimal128 representation of `amount`.
///
/// # Errors
///
/// Never fails for values produced by `Decimal`, whose 28-digit precision
/// fits in Decimal128's 34 digits.
pub fn to_decimal128(amount: &Decimal) -> Result<Decimal128, bson::decimal128::ParseError> {
    amount.to_string().parse()
}

/// Read an amount from any numeric BSON value.
#[must_use]
pub fn from_bson(value: &Bson) -> Option<Decimal> {
    match value {
        Bson::Decimal128(d) => {
            let text = d.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Bson::Double(f) => Decimal::try_from(*f).ok(),
        Bson::Int32(i) => Some(Decimal::from(*i)),
        Bson::Int64(i) => Some(Decimal::from(*i)),
        _ => None,
    }
}

pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    to_decimal128(amount)
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = Bson::deserialize(deserializer)?;
    from_bson(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a numeric amount, got {value}")))
}

/// Optional amounts; `None` reads from a missing field or `null`.
pub mod option {
    use super::*;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        amount: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match amount {
            Some(amount) => super::serialize(amount, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        match Option::<Bson>::deserialize(deserializer)? {
            None | Some(Bson::Null) => Ok(None),
            Some(value) => from_bson(&value).map(Some).ok_or_else(|| {
                D::Error::custom(format!("expected a numeric amount, got {value}"))
            }),
        }
    }
}
