//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use core_kernel::{Currency, CurrencyAmount};
use domain_invoicing::{InvoiceTotals, LineItem};
use rust_decimal::Decimal;

/// Asserts that a value carries no more decimal places than the currency allows
pub fn assert_currency_precision(value: Decimal, currency: Currency) {
    assert!(
        value.normalize().scale() <= currency.decimal_places(),
        "{} has more than {} decimal places for {}",
        value,
        currency.decimal_places(),
        currency
    );
}

/// Asserts the structural invariants of a totals breakdown
///
/// - every field is at the currency's precision
/// - `total = subtotal + cgst + sgst + igst + round_off`, up to the rounding
///   of the individual tax lines
/// - `|round_off| <= 0.5`
pub fn assert_totals_consistent(totals: &InvoiceTotals, currency: Currency) {
    for (name, value) in [
        ("subtotal", totals.subtotal),
        ("cgst", totals.cgst),
        ("sgst", totals.sgst),
        ("igst", totals.igst),
        ("round_off", totals.round_off),
        ("total", totals.total),
    ] {
        assert!(
            value.normalize().scale() <= currency.decimal_places(),
            "{} = {} is not at {} precision",
            name,
            value,
            currency
        );
    }

    let recomposed = totals.subtotal + totals.cgst + totals.sgst + totals.igst + totals.round_off;
    assert!(
        (recomposed - totals.total).abs() <= currency.minor_unit() * Decimal::TWO,
        "Totals do not add up: {:?}",
        totals
    );

    assert!(
        totals.round_off.abs() <= Decimal::new(5, 1),
        "Round-off {} exceeds half a unit",
        totals.round_off
    );
}

/// Asserts that every item's amount is derived from its quantity and rate
pub fn assert_items_consistent(items: &[LineItem], currency: Currency) {
    for item in items {
        assert!(
            item.is_consistent(currency),
            "Item {} amount {} does not match {} x {} in {}",
            item.id,
            item.amount,
            item.quantity,
            item.rate,
            currency
        );
    }
}

/// Asserts a converted amount's currency and value
pub fn assert_amount_eq(actual: &CurrencyAmount, currency: Currency, amount: Decimal) {
    assert_eq!(
        actual.currency, currency,
        "Currency mismatch: actual={}, expected={}",
        actual.currency, currency
    );
    assert_eq!(
        actual.amount, amount,
        "Amount mismatch: actual={}, expected={}",
        actual.amount, amount
    );
}

/// Asserts that dates are strictly increasing
pub fn assert_strictly_ascending(dates: &[NaiveDate]) {
    for pair in dates.windows(2) {
        assert!(
            pair[0] < pair[1],
            "Dates are not strictly ascending: {} then {}",
            pair[0],
            pair[1]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_invoicing::{compute_totals, TaxMode};
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_of_fixture_are_consistent() {
        let items = vec![crate::fixtures::LineItemFixtures::inr_consulting()];
        let totals = compute_totals(&items, Currency::INR, TaxMode::IntraState);
        assert_totals_consistent(&totals, Currency::INR);
    }

    #[test]
    #[should_panic(expected = "decimal places")]
    fn test_precision_violation_panics() {
        assert_currency_precision(dec!(1.5), Currency::JPY);
    }
}
