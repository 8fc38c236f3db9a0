//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for invoices, exchange rates and
//! schedules. These fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{Currency, ExchangeRate};
use domain_invoicing::LineItem;
use rust_decimal_macros::dec;

/// Fixture for line item test data
pub struct LineItemFixtures;

impl LineItemFixtures {
    /// Single INR consulting line that totals to 15601 at 18% GST
    pub fn inr_consulting() -> LineItem {
        LineItem::new("Consulting", dec!(1), dec!(13221), dec!(18), Currency::INR)
    }

    /// Two INR lines with different GST slabs
    pub fn inr_mixed_slabs() -> Vec<LineItem> {
        vec![
            LineItem::new("Design work", dec!(10), dec!(1500), dec!(18), Currency::INR),
            LineItem::new("Printed material", dec!(3), dec!(249.99), dec!(12), Currency::INR),
        ]
    }

    /// USD subscription line with a fractional unit price
    pub fn usd_subscription() -> LineItem {
        LineItem::new("Subscription", dec!(3), dec!(9.99), dec!(18), Currency::USD)
    }

    /// Zero-rated line
    pub fn usd_exempt() -> LineItem {
        LineItem::new("Exempt service", dec!(2), dec!(50), dec!(0), Currency::USD)
    }
}

/// Fixture for exchange rate test data
pub struct RateFixtures;

impl RateFixtures {
    /// Reference instant all fixture quotes are stamped with
    pub fn quoted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    /// A set of USD-based quotes
    pub fn usd_quotes() -> Vec<ExchangeRate> {
        vec![
            Self::quote(Currency::USD, Currency::EUR, dec!(0.92)),
            Self::quote(Currency::USD, Currency::GBP, dec!(0.79)),
            Self::quote(Currency::USD, Currency::INR, dec!(83.25)),
            Self::quote(Currency::USD, Currency::JPY, dec!(156.40)),
        ]
    }

    /// A single quote stamped at [`RateFixtures::quoted_at`]
    pub fn quote(base: Currency, target: Currency, rate: rust_decimal::Decimal) -> ExchangeRate {
        ExchangeRate::new(base, target, rate, Self::quoted_at()).with_source("fixture")
    }
}

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// Start of the 2024 billing year
    pub fn year_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// A month-end anchor in a leap year
    pub fn leap_month_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    /// Last day of the 2024 billing year
    pub fn year_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Base invoice number for sequences
    pub fn invoice_base() -> &'static str {
        "INV-0000"
    }
}
