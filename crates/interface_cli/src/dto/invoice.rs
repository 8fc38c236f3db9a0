//! Invoice DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, CurrencyAmount, ExchangeRate};
use domain_invoicing::{InvoiceTotals, LineItem, NewLineItem, RateOrigin, RoundOffPolicy, TaxMode};

/// Invoice document read by the `totals` command
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub tax_mode: TaxMode,
    #[serde(default)]
    pub round_off: Option<RoundOffPolicy>,
    pub items: Vec<NewLineItem>,
    /// Cached quotes used when the invoice is switched to another currency
    #[serde(default)]
    pub rates: Vec<ExchangeRate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub currency: Currency,
    pub items: Vec<LineItem>,
    pub totals: InvoiceTotals,
    /// Present when a currency change was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repricing: Option<RepricingSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepricingSummary {
    pub requested: Currency,
    pub origin: RateOrigin,
    pub rates_fresh: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub result: CurrencyAmount,
    pub rate: Decimal,
    pub rates_fresh: bool,
}
