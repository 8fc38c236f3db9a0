//! Currency amounts and conversion arithmetic
//!
//! Amounts use rust_decimal for precise arithmetic without floating-point
//! errors. A `CurrencyAmount` produced by a conversion records where it came
//! from (`base_amount`, `exchange_rate`) for audit; these fields describe
//! provenance, not a live rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::currency::{round_to_precision, Currency};

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// The converted amount does not fit in a decimal
    #[error("Conversion overflow: {amount} x {rate}")]
    Overflow { amount: Decimal, rate: Decimal },
}

/// A monetary amount with associated currency and optional conversion provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAmount {
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_amount: Option<Decimal>,
}

impl CurrencyAmount {
    /// Creates an amount with no conversion provenance
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount,
            currency,
            exchange_rate: None,
            base_amount: None,
        }
    }

    /// Returns true if this amount was produced by a conversion
    pub fn is_converted(&self) -> bool {
        self.exchange_rate.is_some()
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            round_to_precision(self.amount, self.currency),
            dp = dp as usize
        )
    }
}

/// Converts an amount between currencies at the given rate
///
/// Same-currency conversion is the identity: the amount is returned as is,
/// with rate 1 and `base_amount` equal to the input. Otherwise the result is
/// `amount * rate` rounded to the target currency's precision.
pub fn convert(
    amount: Decimal,
    from: Currency,
    to: Currency,
    rate: Decimal,
) -> Result<CurrencyAmount, MoneyError> {
    if from == to {
        return Ok(CurrencyAmount {
            amount,
            currency: to,
            exchange_rate: Some(Decimal::ONE),
            base_amount: Some(amount),
        });
    }

    let converted = amount
        .checked_mul(rate)
        .ok_or(MoneyError::Overflow { amount, rate })?;

    Ok(CurrencyAmount {
        amount: round_to_precision(converted, to),
        currency: to,
        exchange_rate: Some(rate),
        base_amount: Some(amount),
    })
}
