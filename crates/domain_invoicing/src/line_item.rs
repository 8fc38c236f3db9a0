//! Invoice line items
//!
//! A line item's `amount` is never set on its own: it is always
//! `round(quantity * rate)` in the invoice currency, re-derived whenever the
//! quantity, rate or currency changes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{round_to_precision, Currency, LineItemId};

use crate::error::InvoicingError;

/// Largest `quantity * rate` a line item may carry
pub const MAX_LINE_AMOUNT: Decimal = dec!(1000000000000000);

/// A line item on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: LineItemId,
    pub description: String,
    pub quantity: Decimal,
    /// Unit price in the invoice currency
    pub rate: Decimal,
    /// GST rate as a percentage (18 for 18%)
    pub gst_percent: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    /// Creates a line item with its amount derived for `currency`
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
        gst_percent: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id: LineItemId::new(),
            description: description.into(),
            quantity,
            rate,
            gst_percent,
            amount: derive_amount(quantity, rate, currency),
        }
    }

    /// Re-derives `amount` from quantity and rate
    pub fn recompute(&mut self, currency: Currency) {
        self.amount = derive_amount(self.quantity, self.rate, currency);
    }

    /// Returns true if `amount` matches what quantity and rate produce
    pub fn is_consistent(&self, currency: Currency) -> bool {
        self.amount == derive_amount(self.quantity, self.rate, currency)
    }

    /// GST on this line at full precision
    pub fn gst_amount(&self) -> Decimal {
        self.amount * self.gst_percent / dec!(100)
    }

    /// Applies a partial update and re-derives the amount
    ///
    /// The merged fields are validated before anything changes; on error the
    /// item is left as it was.
    pub fn apply(&mut self, patch: LineItemPatch, currency: Currency) -> Result<(), InvoicingError> {
        let description = patch.description.unwrap_or_else(|| self.description.clone());
        let quantity = patch.quantity.unwrap_or(self.quantity);
        let rate = patch.rate.unwrap_or(self.rate);
        let gst_percent = patch.gst_percent.unwrap_or(self.gst_percent);
        validate_fields(&description, quantity, rate, gst_percent)?;

        self.description = description;
        self.quantity = quantity;
        self.rate = rate;
        self.gst_percent = gst_percent;
        self.recompute(currency);
        Ok(())
    }

    /// Checks the input rules the invoice editor enforces
    ///
    /// The totals calculator itself accepts any values; this is for the
    /// layer that takes user input.
    pub fn validate(&self) -> Result<(), InvoicingError> {
        validate_fields(&self.description, self.quantity, self.rate, self.gst_percent)
    }
}

/// `round(quantity * rate)` at the currency's precision
///
/// Expects values that passed validation; use [`checked_amount`] otherwise.
pub fn derive_amount(quantity: Decimal, rate: Decimal, currency: Currency) -> Decimal {
    round_to_precision(quantity * rate, currency)
}

/// `round(quantity * rate)`, or `None` if the product exceeds [`MAX_LINE_AMOUNT`]
pub fn checked_amount(quantity: Decimal, rate: Decimal, currency: Currency) -> Option<Decimal> {
    quantity
        .checked_mul(rate)
        .filter(|product| product.abs() <= MAX_LINE_AMOUNT)
        .map(|product| round_to_precision(product, currency))
}

/// User input for a new line item, before an id and amount are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub gst_percent: Decimal,
}

impl NewLineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        rate: Decimal,
        gst_percent: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            gst_percent,
        }
    }

    pub fn validate(&self) -> Result<(), InvoicingError> {
        validate_fields(&self.description, self.quantity, self.rate, self.gst_percent)
    }

    /// Materialises the line item for the given currency
    pub fn into_line_item(self, currency: Currency) -> LineItem {
        LineItem::new(self.description, self.quantity, self.rate, self.gst_percent, currency)
    }
}

/// Partial update of a line item; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPatch {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    pub rate: Option<Decimal>,
    #[serde(default)]
    pub gst_percent: Option<Decimal>,
}

impl LineItemPatch {
    pub fn quantity(quantity: Decimal) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn rate(rate: Decimal) -> Self {
        Self {
            rate: Some(rate),
            ..Default::default()
        }
    }

    pub fn gst_percent(gst_percent: Decimal) -> Self {
        Self {
            gst_percent: Some(gst_percent),
            ..Default::default()
        }
    }
}

fn validate_fields(
    description: &str,
    quantity: Decimal,
    rate: Decimal,
    gst_percent: Decimal,
) -> Result<(), InvoicingError> {
    if description.trim().is_empty() {
        return Err(InvoicingError::invalid("description", "must not be empty"));
    }
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(InvoicingError::invalid("quantity", format!("{} is negative", quantity)));
    }
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(InvoicingError::invalid("rate", format!("{} is negative", rate)));
    }
    if gst_percent < Decimal::ZERO || gst_percent > dec!(100) {
        return Err(InvoicingError::invalid(
            "gst_percent",
            format!("{} is outside 0..=100", gst_percent),
        ));
    }
    if quantity
        .checked_mul(rate)
        .map_or(true, |product| product > MAX_LINE_AMOUNT)
    {
        return Err(InvoicingError::invalid(
            "amount",
            format!("{} x {} exceeds {}", quantity, rate, MAX_LINE_AMOUNT),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_derived_and_rounded() {
        let item = LineItem::new("Hosting", dec!(3), dec!(33.335), dec!(18), Currency::USD);
        assert_eq!(item.amount, dec!(100.01));
        assert!(item.is_consistent(Currency::USD));
    }

    #[test]
    fn test_zero_decimal_currency_amount() {
        let item = LineItem::new("Widget", dec!(3), dec!(333.5), dec!(0), Currency::JPY);
        assert_eq!(item.amount, dec!(1001));
    }

    #[test]
    fn test_patch_rederives_amount() {
        let mut item = LineItem::new("Design", dec!(2), dec!(50), dec!(18), Currency::INR);
        item.apply(LineItemPatch::quantity(dec!(5)), Currency::INR).unwrap();
        assert_eq!(item.amount, dec!(250));
        item.apply(LineItemPatch::rate(dec!(10.005)), Currency::INR).unwrap();
        assert_eq!(item.amount, dec!(50.03));
    }

    #[test]
    fn test_rejected_patch_leaves_item_unchanged() {
        let mut item = LineItem::new("Design", dec!(2), dec!(50), dec!(18), Currency::INR);
        let original = item.clone();

        let result = item.apply(LineItemPatch::rate(Decimal::MAX), Currency::INR);

        assert!(matches!(result, Err(InvoicingError::InvalidLineItem { field: "amount", .. })));
        assert_eq!(item, original);
    }

    #[test]
    fn test_amount_bound() {
        assert!(NewLineItem::new("Max", MAX_LINE_AMOUNT, dec!(1), dec!(18)).validate().is_ok());
        assert!(NewLineItem::new("Big", Decimal::MAX, dec!(2), dec!(18)).validate().is_err());
        assert!(NewLineItem::new("Big", dec!(1000000000), dec!(1000000.01), dec!(0))
            .validate()
            .is_err());
        assert_eq!(checked_amount(Decimal::MAX, dec!(2), Currency::USD), None);
        assert_eq!(checked_amount(dec!(3), dec!(9.995), Currency::USD), Some(dec!(29.99)));
    }

    #[test]
    fn test_validation_rules() {
        assert!(NewLineItem::new("Ok", dec!(1), dec!(1), dec!(18)).validate().is_ok());
        assert!(NewLineItem::new("  ", dec!(1), dec!(1), dec!(18)).validate().is_err());
        assert!(NewLineItem::new("Neg", dec!(-1), dec!(1), dec!(18)).validate().is_err());
        assert!(NewLineItem::new("Neg", dec!(1), dec!(-0.5), dec!(18)).validate().is_err());
        assert!(NewLineItem::new("Tax", dec!(1), dec!(1), dec!(100.5)).validate().is_err());
        assert!(NewLineItem::new("Tax", dec!(1), dec!(1), dec!(-1)).validate().is_err());
    }
}
