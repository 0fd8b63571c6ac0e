//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept as [`Decimal`] so that `total_amount == price × qty`
//! holds exactly, both in memory and in the stored (Decimal128) documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Line total for `qty` units at this price.
    ///
    /// ```
    /// use amazonas_core::{CurrencyCode, Price};
    /// use rust_decimal::Decimal;
    ///
    /// let unit = Price::new(Decimal::new(399_990, 2), CurrencyCode::Brl);
    /// assert_eq!(unit.times(3).amount, Decimal::new(1_199_970, 2));
    /// ```
    #[must_use]
    pub fn times(self, qty: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(qty),
            currency: self.currency,
        }
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Format for display (e.g., "R$ 3999.90").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes the seeder can price in.
///
/// Collection validators accept any currency string, so documents written by
/// other tools may carry codes outside this set. Fixtures and the typed models
/// are restricted to these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Brl,
    Usd,
    Eur,
}

impl CurrencyCode {
    /// Three-letter ISO code as stored in documents.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Brl => "BRL",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Brl => "R$",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_is_exact() {
        let unit = Price::new(Decimal::new(49_990, 2), CurrencyCode::Brl);
        let total = unit.times(3);
        assert_eq!(total.amount.to_string(), "1499.70");
        assert_eq!(total.currency, CurrencyCode::Brl);
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::new(Decimal::new(-1, 2), CurrencyCode::Brl).is_negative());
        assert!(!Price::new(Decimal::ZERO, CurrencyCode::Brl).is_negative());
    }

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(39_999, 1), CurrencyCode::Brl);
        assert_eq!(price.display(), "R$ 3999.90");
    }

    #[test]
    fn test_currency_serializes_as_iso_code() {
        assert_eq!(
            serde_json::to_string(&CurrencyCode::Brl).unwrap(),
            "\"BRL\""
        );
        let parsed: CurrencyCode = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, CurrencyCode::Usd);
    }
}
