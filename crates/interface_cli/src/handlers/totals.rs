//! Invoice totals handler

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use core_kernel::{Currency, RateSource};
use domain_invoicing::{reprice_items, InvoiceAction, InvoiceState};

use crate::config::EngineConfig;
use crate::dto::{InvoiceDocument, RepricingSummary, TotalsResponse};
use crate::error::CliResult;

/// Builds the invoice through the reducer and reports its totals
///
/// With `target` set, the items are re-priced into that currency first,
/// using the document's cached quotes and then `source`.
pub async fn compute_invoice<S>(
    document: InvoiceDocument,
    target: Option<Currency>,
    config: &EngineConfig,
    source: &S,
    now: DateTime<Utc>,
) -> CliResult<TotalsResponse>
where
    S: RateSource + ?Sized,
{
    let currency = document.currency.unwrap_or(config.default_currency);
    let round_off = document.round_off.unwrap_or(config.round_off);

    let initial = InvoiceState::new(currency)
        .with_round_off_policy(round_off)
        .reduce(InvoiceAction::SetTaxMode(document.tax_mode))?;
    let mut state = document
        .items
        .into_iter()
        .try_fold(initial, |state, item| state.reduce(InvoiceAction::AddItem(item)))?;

    let mut repricing_summary = None;
    if let Some(to) = target {
        let rates_fresh = config.freshness().all_fresh(&document.rates, now);
        if !rates_fresh {
            warn!(%currency, %to, "Re-pricing with stale cached rates");
        }

        let repricing = reprice_items(&state.items, state.currency, to, &document.rates, source).await;
        repricing_summary = Some(RepricingSummary {
            requested: to,
            origin: repricing.origin,
            rates_fresh,
        });
        state = state.reduce(InvoiceAction::ApplyRepricing(repricing))?;
    }

    info!(
        currency = %state.currency,
        items = state.items.len(),
        total = %state.totals.total,
        "Invoice totals computed"
    );

    Ok(TotalsResponse {
        currency: state.currency,
        items: state.items,
        totals: state.totals,
        repricing: repricing_summary,
    })
}
