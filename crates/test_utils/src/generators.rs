//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use core_kernel::Currency;
use domain_invoicing::LineItem;
use domain_recurring::Frequency;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating supported currencies
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    proptest::sample::select(Currency::ALL.to_vec())
}

/// Strategy for generating positive quantities with up to two decimal places
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64, 0u32..=2u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating unit rates with up to four decimal places
pub fn unit_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64, 0u32..=4u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating the common GST slabs
pub fn gst_slab_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::new(5, 0)),
        Just(Decimal::new(12, 0)),
        Just(Decimal::new(18, 0)),
        Just(Decimal::new(28, 0)),
    ]
}

/// Strategy for generating positive exchange rates (0.0001 to 1000)
pub fn exchange_rate_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for generating a line item in the given currency
pub fn line_item_strategy(currency: Currency) -> impl Strategy<Value = LineItem> {
    (quantity_strategy(), unit_rate_strategy(), gst_slab_strategy()).prop_map(
        move |(quantity, rate, gst)| LineItem::new("Generated item", quantity, rate, gst, currency),
    )
}

/// Strategy for generating a currency together with items priced in it
pub fn priced_items_strategy(max_items: usize) -> impl Strategy<Value = (Currency, Vec<LineItem>)> {
    currency_strategy().prop_flat_map(move |currency| {
        (
            Just(currency),
            proptest::collection::vec(line_item_strategy(currency), 0..=max_items),
        )
    })
}

/// Strategy for generating billing frequencies
pub fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
        Just(Frequency::Quarterly),
        Just(Frequency::Yearly),
    ]
}

/// Strategy for generating calendar dates between 2000 and 2099
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..=12u32, 1u32..=31u32)
        .prop_filter_map("valid calendar date", |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}
