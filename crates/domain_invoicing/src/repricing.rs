//! Currency-change re-pricing of line items
//!
//! When an invoice switches currency, each item's unit rate is converted and
//! rounded first, and the amount is then re-derived from the rounded rate:
//!
//! ```text
//! new_rate   = round(rate × factor)
//! new_amount = round(quantity × new_rate)
//! ```
//!
//! The factor comes from the cached quotes, then from a single live fetch.
//! If neither yields a rate, the original items are returned unchanged:
//! a failed conversion leaves amounts stale in the old currency, never
//! corrupted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use core_kernel::{resolve_rate, round_to_precision, Currency, ExchangeRate, RateSource};

use crate::line_item::{checked_amount, LineItem};

/// Where the conversion factor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    /// Source and target currency are the same
    Identity,
    /// Resolved from the cached quote set
    Resolved,
    /// Fetched live from the rate source
    Fetched,
    /// No usable rate could be obtained; items are unchanged
    Unavailable,
}

/// Outcome of re-pricing a set of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repricing {
    pub from: Currency,
    pub to: Currency,
    pub items: Vec<LineItem>,
    pub applied_rate: Option<Decimal>,
    pub origin: RateOrigin,
}

impl Repricing {
    /// Returns true if the items are now denominated in `to`
    pub fn is_converted(&self) -> bool {
        self.origin != RateOrigin::Unavailable
    }

    /// Currency the items are denominated in after this re-pricing
    pub fn effective_currency(&self) -> Currency {
        if self.is_converted() {
            self.to
        } else {
            self.from
        }
    }
}

/// Re-prices items into `to`, reporting how the rate was obtained
#[instrument(skip(items, rates, source), fields(items = items.len()))]
pub async fn reprice_items<S>(
    items: &[LineItem],
    from: Currency,
    to: Currency,
    rates: &[ExchangeRate],
    source: &S,
) -> Repricing
where
    S: RateSource + ?Sized,
{
    let unchanged = |origin: RateOrigin, applied_rate: Option<Decimal>| Repricing {
        from,
        to,
        items: items.to_vec(),
        applied_rate,
        origin,
    };

    if from == to {
        return unchanged(RateOrigin::Identity, Some(Decimal::ONE));
    }

    let (factor, origin) = match resolve_rate(from, to, rates) {
        Some(rate) => (rate, RateOrigin::Resolved),
        None => match fetch_factor(from, to, source).await {
            Some(rate) => (rate, RateOrigin::Fetched),
            None => {
                warn!(%from, %to, "No exchange rate available, leaving items in original currency");
                return unchanged(RateOrigin::Unavailable, None);
            }
        },
    };

    let Some(converted) = apply_conversion_factor(items, factor, to) else {
        warn!(%from, %to, %factor, "Converted line amounts out of range, leaving items in original currency");
        return unchanged(RateOrigin::Unavailable, None);
    };

    debug!(%from, %to, %factor, ?origin, "Re-pricing line items");

    Repricing {
        from,
        to,
        items: converted,
        applied_rate: Some(factor),
        origin,
    }
}

/// Re-prices items into `to`, returning the original items when no rate exists
pub async fn reconvert_items<S>(
    items: &[LineItem],
    from: Currency,
    to: Currency,
    rates: &[ExchangeRate],
    source: &S,
) -> Vec<LineItem>
where
    S: RateSource + ?Sized,
{
    reprice_items(items, from, to, rates, source).await.items
}

/// Converts each item's rate by `factor` and re-derives its amount in `to`
///
/// Returns `None` if any converted rate or amount leaves the range a line
/// item may carry.
pub fn apply_conversion_factor(items: &[LineItem], factor: Decimal, to: Currency) -> Option<Vec<LineItem>> {
    items
        .iter()
        .map(|item| {
            let rate = round_to_precision(item.rate.checked_mul(factor)?, to);
            Some(LineItem {
                rate,
                amount: checked_amount(item.quantity, rate, to)?,
                ..item.clone()
            })
        })
        .collect()
}

async fn fetch_factor<S>(from: Currency, to: Currency, source: &S) -> Option<Decimal>
where
    S: RateSource + ?Sized,
{
    let quote = match source.fetch_rate(from, to).await {
        Ok(quote) => quote,
        Err(error) => {
            warn!(%from, %to, %error, "Live exchange rate fetch failed");
            return None;
        }
    };

    // Accept a quote in either direction; anything else is unusable here
    if quote.quotes(from, to) && quote.is_usable() {
        Some(quote.rate)
    } else if quote.quotes(to, from) {
        quote.inverse().map(|q| q.rate)
    } else {
        warn!(
            %from,
            %to,
            base = %quote.base_currency,
            target = %quote.target_currency,
            "Rate source returned a quote for a different pair"
        );
        None
    }
}
