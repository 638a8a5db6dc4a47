//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Catalog prices are whole euros, but the amount is kept as a [`Decimal`] so
/// line totals never go through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a euro price, the catalog's only currency.
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::EUR)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Line total for `quantity` units, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Sum of two prices, or `None` on overflow.
    ///
    /// Totals only ever mix prices from the same catalog, so the left-hand
    /// currency wins.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount.normalize(), self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_catalog_format() {
        assert_eq!(Price::eur(Decimal::from(1849)).to_string(), "1849€");
        assert_eq!(Price::eur(Decimal::new(4250, 2)).to_string(), "42.5€");
    }

    #[test]
    fn test_line_total() {
        let total = Price::eur(Decimal::from(1849)).checked_mul(3);
        assert_eq!(total, Some(Price::eur(Decimal::from(5547))));
    }

    #[test]
    fn test_sum_keeps_currency() {
        let sum = Price::zero(CurrencyCode::EUR).checked_add(Price::eur(Decimal::from(10)));
        assert_eq!(sum, Some(Price::eur(Decimal::from(10))));
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(Price::eur(Decimal::MAX).checked_mul(2), None);
        assert_eq!(
            Price::eur(Decimal::MAX).checked_add(Price::eur(Decimal::ONE)),
            None
        );
    }
}
