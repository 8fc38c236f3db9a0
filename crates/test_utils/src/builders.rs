//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{Currency, ExchangeRate};
use domain_invoicing::{InvoiceAction, InvoiceState, LineItem, NewLineItem, RoundOffPolicy};
use domain_recurring::{Frequency, RecurringSchedule};
use fake::faker::lorem::en::Words;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{DateFixtures, RateFixtures};

fn fake_description() -> String {
    let words: Vec<String> = Words(2..4).fake();
    words.join(" ")
}

/// Builder for line items
pub struct LineItemBuilder {
    description: String,
    quantity: Decimal,
    rate: Decimal,
    gst_percent: Decimal,
    currency: Currency,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    /// Creates a builder for one unit at 100.00 with 18% GST in INR
    pub fn new() -> Self {
        Self {
            description: fake_description(),
            quantity: dec!(1),
            rate: dec!(100.00),
            gst_percent: dec!(18),
            currency: Currency::INR,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_gst(mut self, gst_percent: Decimal) -> Self {
        self.gst_percent = gst_percent;
        self
    }

    /// Currency used to derive the amount
    pub fn in_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Builds the editor input form
    pub fn build_new(self) -> NewLineItem {
        NewLineItem::new(self.description, self.quantity, self.rate, self.gst_percent)
    }

    /// Builds a line item with its amount derived
    pub fn build(self) -> LineItem {
        LineItem::new(
            self.description,
            self.quantity,
            self.rate,
            self.gst_percent,
            self.currency,
        )
    }
}

/// Builder for an invoice state populated through the reducer
pub struct InvoiceStateBuilder {
    currency: Currency,
    round_off_policy: RoundOffPolicy,
    items: Vec<NewLineItem>,
}

impl Default for InvoiceStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceStateBuilder {
    pub fn new() -> Self {
        Self {
            currency: Currency::INR,
            round_off_policy: RoundOffPolicy::default(),
            items: Vec::new(),
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_round_off_policy(mut self, policy: RoundOffPolicy) -> Self {
        self.round_off_policy = policy;
        self
    }

    pub fn with_item(mut self, item: NewLineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Builds the state by reducing an `AddItem` action per item
    ///
    /// # Panics
    ///
    /// Panics if any item fails validation.
    pub fn build(self) -> InvoiceState {
        let initial = InvoiceState::new(self.currency).with_round_off_policy(self.round_off_policy);
        self.items.into_iter().fold(initial, |state, item| {
            state
                .reduce(InvoiceAction::AddItem(item))
                .expect("builder items must be valid")
        })
    }
}

/// Builder for recurring schedules
pub struct ScheduleBuilder {
    frequency: Frequency,
    interval: u32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    max_occurrences: Option<u32>,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Monthly schedule starting at the beginning of 2024
    pub fn new() -> Self {
        Self {
            frequency: Frequency::Monthly,
            interval: 1,
            start_date: DateFixtures::year_start(),
            end_date: None,
            max_occurrences: None,
        }
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_max_occurrences(mut self, max_occurrences: u32) -> Self {
        self.max_occurrences = Some(max_occurrences);
        self
    }

    /// # Panics
    ///
    /// Panics if the schedule is invalid.
    pub fn build(self) -> RecurringSchedule {
        let mut schedule = RecurringSchedule::new(self.frequency, self.interval, self.start_date)
            .expect("valid schedule");
        if let Some(end_date) = self.end_date {
            schedule = schedule.with_end_date(end_date).expect("end date after start");
        }
        if let Some(max) = self.max_occurrences {
            schedule = schedule.with_max_occurrences(max);
        }
        schedule
    }
}

/// Builder for exchange rate quotes
pub struct ExchangeRateBuilder {
    base: Currency,
    target: Currency,
    rate: Decimal,
    timestamp: DateTime<Utc>,
}

impl ExchangeRateBuilder {
    pub fn new(base: Currency, target: Currency, rate: Decimal) -> Self {
        Self {
            base,
            target,
            rate,
            timestamp: RateFixtures::quoted_at(),
        }
    }

    pub fn quoted_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> ExchangeRate {
        ExchangeRate::new(self.base, self.target, self.rate, self.timestamp).with_source("builder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_builder_derives_amount() {
        let item = LineItemBuilder::new()
            .with_quantity(dec!(3))
            .with_rate(dec!(9.99))
            .in_currency(Currency::USD)
            .build();
        assert_eq!(item.amount, dec!(29.97));
        assert!(!item.description.is_empty());
    }

    #[test]
    fn test_invoice_state_builder_totals() {
        let state = InvoiceStateBuilder::new()
            .with_item(LineItemBuilder::new().with_rate(dec!(13221)).build_new())
            .build();
        assert_eq!(state.totals.total, dec!(15601));
    }

    #[test]
    fn test_invoice_state_builder_currency_and_item_fields() {
        let state = InvoiceStateBuilder::new()
            .with_currency(Currency::USD)
            .with_item(
                LineItemBuilder::new()
                    .with_description("Hosting")
                    .with_rate(dec!(10))
                    .with_gst(dec!(0))
                    .build_new(),
            )
            .build();

        assert_eq!(state.currency, Currency::USD);
        assert_eq!(state.items[0].description, "Hosting");
        assert_eq!(state.totals.total_tax(), Decimal::ZERO);
        assert_eq!(state.totals.total, dec!(10));
    }

    #[test]
    fn test_schedule_builder_bounds() {
        let schedule = ScheduleBuilder::new()
            .with_frequency(Frequency::Quarterly)
            .ending(DateFixtures::year_end())
            .with_max_occurrences(2)
            .build();
        assert_eq!(schedule.end_date, Some(DateFixtures::year_end()));
        assert_eq!(schedule.max_occurrences, Some(2));
    }
}
