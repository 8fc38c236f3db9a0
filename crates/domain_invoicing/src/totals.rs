//! Invoice totals with GST split and round-off
//!
//! Totals are computed in two stages. Tax is accumulated at full precision
//! first; then the grand total is rounded once according to the
//! [`RoundOffPolicy`] and the residual is kept as `round_off`. Finally every
//! field is rounded to the currency's precision for display.
//!
//! ```text
//! subtotal  = Σ amount
//! cgst/sgst = Σ (amount × gst% / 100) / 2
//! raw       = subtotal + cgst + sgst
//! total     = round(raw, 0)            (whole-unit policy)
//! round_off = total − raw
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{round_to_precision, Currency};

use crate::line_item::LineItem;

/// How GST is split across its components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TaxMode {
    /// Supply within one state: GST split evenly into CGST and SGST, IGST zero
    #[default]
    IntraState,
}

/// Rounding applied to the grand total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOffPolicy {
    /// Round to the nearest whole currency unit, residual booked as round-off
    #[default]
    WholeUnit,
    /// Round to the currency's own precision only
    CurrencyPrecision,
}

impl RoundOffPolicy {
    fn decimal_places(&self, currency: Currency) -> u32 {
        match self {
            RoundOffPolicy::WholeUnit => 0,
            RoundOffPolicy::CurrencyPrecision => currency.decimal_places(),
        }
    }
}

/// Totals breakdown of an invoice, rounded to the currency's precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub round_off: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of all tax components
    pub fn total_tax(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }
}

/// Computes totals with the default whole-unit round-off
pub fn compute_totals(items: &[LineItem], currency: Currency, tax_mode: TaxMode) -> InvoiceTotals {
    compute_totals_with(items, currency, tax_mode, RoundOffPolicy::default())
}

/// Computes totals with an explicit round-off policy
///
/// Inputs are not validated; negative quantities, rates or GST percentages
/// flow through the arithmetic unchanged.
pub fn compute_totals_with(
    items: &[LineItem],
    currency: Currency,
    tax_mode: TaxMode,
    round_off: RoundOffPolicy,
) -> InvoiceTotals {
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();

    let (cgst, sgst, igst) = match tax_mode {
        TaxMode::IntraState => {
            let mut cgst = Decimal::ZERO;
            let mut sgst = Decimal::ZERO;
            for item in items {
                let share = item.gst_amount() / dec!(2);
                cgst += share;
                sgst += share;
            }
            (cgst, sgst, Decimal::ZERO)
        }
    };

    let raw_total = subtotal + cgst + sgst + igst;
    let total = raw_total.round_dp_with_strategy(
        round_off.decimal_places(currency),
        RoundingStrategy::MidpointAwayFromZero,
    );
    let residual = total - raw_total;

    debug!(
        %currency,
        items = items.len(),
        %subtotal,
        %raw_total,
        %total,
        "Computed invoice totals"
    );

    InvoiceTotals {
        subtotal: round_to_precision(subtotal, currency),
        cgst: round_to_precision(cgst, currency),
        sgst: round_to_precision(sgst, currency),
        igst: round_to_precision(igst, currency),
        round_off: round_to_precision(residual, currency),
        total: round_to_precision(total, currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: Decimal, rate: Decimal, gst: Decimal, currency: Currency) -> LineItem {
        LineItem::new("Service", quantity, rate, gst, currency)
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        let totals = compute_totals(&[], Currency::INR, TaxMode::IntraState);
        assert_eq!(totals, InvoiceTotals::zero());
    }

    #[test]
    fn test_round_off_example() {
        let items = vec![item(dec!(1), dec!(13221.00), dec!(18), Currency::INR)];
        let totals = compute_totals(&items, Currency::INR, TaxMode::IntraState);

        assert_eq!(totals.subtotal, dec!(13221.00));
        assert_eq!(totals.cgst, dec!(1189.89));
        assert_eq!(totals.sgst, dec!(1189.89));
        assert_eq!(totals.igst, Decimal::ZERO);
        assert_eq!(totals.total, dec!(15601));
        assert_eq!(totals.round_off, dec!(0.22));
    }

    #[test]
    fn test_currency_precision_policy_keeps_cents() {
        let items = vec![item(dec!(1), dec!(13221.00), dec!(18), Currency::INR)];
        let totals = compute_totals_with(
            &items,
            Currency::INR,
            TaxMode::IntraState,
            RoundOffPolicy::CurrencyPrecision,
        );
        assert_eq!(totals.total, dec!(15600.78));
        assert_eq!(totals.round_off, Decimal::ZERO);
    }
}
