//! Supported currencies and precision rounding
//!
//! The engine works with a fixed set of ISO 4217 currencies. Each currency
//! carries its display precision, which determines the rounding unit
//! (`10^-decimal_places`) for every amount denominated in it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::MoneyError;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    INR,
    JPY,
    AUD,
    CAD,
    CHF,
    SGD,
    AED,
    CNY,
    KWD,
}

impl Currency {
    /// Every supported currency, in display order
    pub const ALL: [Currency; 12] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::INR,
        Currency::JPY,
        Currency::AUD,
        Currency::CAD,
        Currency::CHF,
        Currency::SGD,
        Currency::AED,
        Currency::CNY,
        Currency::KWD,
    ];

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            Currency::KWD => 3,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::INR => "₹",
            Currency::JPY => "¥",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::CHF => "CHF",
            Currency::SGD => "S$",
            Currency::AED => "د.إ",
            Currency::CNY => "CN¥",
            Currency::KWD => "KD",
        }
    }

    /// Returns the English currency name
    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::INR => "Indian Rupee",
            Currency::JPY => "Japanese Yen",
            Currency::AUD => "Australian Dollar",
            Currency::CAD => "Canadian Dollar",
            Currency::CHF => "Swiss Franc",
            Currency::SGD => "Singapore Dollar",
            Currency::AED => "UAE Dirham",
            Currency::CNY => "Chinese Yuan",
            Currency::KWD => "Kuwaiti Dinar",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::SGD => "SGD",
            Currency::AED => "AED",
            Currency::CNY => "CNY",
            Currency::KWD => "KWD",
        }
    }

    /// Smallest representable amount in this currency (`10^-decimal_places`)
    pub fn minor_unit(&self) -> Decimal {
        Decimal::new(1, self.decimal_places())
    }

    /// Rounds an amount to this currency's precision
    pub fn round(&self, amount: Decimal) -> Decimal {
        round_to_precision(amount, *self)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        get_currency(s).ok_or_else(|| MoneyError::UnsupportedCurrency(s.trim().to_string()))
    }
}

/// Looks up a currency in the supported set by its ISO code
///
/// Matching ignores surrounding whitespace and letter case.
pub fn get_currency(code: &str) -> Option<Currency> {
    let code = code.trim();
    Currency::ALL
        .into_iter()
        .find(|c| c.code().eq_ignore_ascii_case(code))
}

/// Rounds half away from zero to the currency's decimal places
///
/// Zero-decimal currencies always come back integral.
pub fn round_to_precision(amount: Decimal, currency: Currency) -> Decimal {
    amount.round_dp_with_strategy(
        currency.decimal_places(),
        RoundingStrategy::MidpointAwayFromZero,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(get_currency("usd"), Some(Currency::USD));
        assert_eq!(get_currency(" INR "), Some(Currency::INR));
        assert_eq!(get_currency("XYZ"), None);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_precision(dec!(2.345), Currency::USD), dec!(2.35));
        assert_eq!(round_to_precision(dec!(-2.345), Currency::USD), dec!(-2.35));
        assert_eq!(round_to_precision(dec!(2.5), Currency::JPY), dec!(3));
        assert_eq!(round_to_precision(dec!(1.0005), Currency::KWD), dec!(1.001));
    }

    #[test]
    fn test_minor_unit() {
        assert_eq!(Currency::USD.minor_unit(), dec!(0.01));
        assert_eq!(Currency::JPY.minor_unit(), dec!(1));
        assert_eq!(Currency::KWD.minor_unit(), dec!(0.001));
    }
}
