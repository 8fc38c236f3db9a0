//! Currency conversion handler

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use core_kernel::{convert, resolve_rate, Currency, ExchangeRate};

use crate::config::EngineConfig;
use crate::dto::ConversionResponse;
use crate::error::{CliError, CliResult};

/// Converts `amount` using the cached quote set
///
/// Stale quotes are still used; the response reports their freshness.
pub fn convert_amount(
    amount: Decimal,
    from: Currency,
    to: Currency,
    rates: &[ExchangeRate],
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> CliResult<ConversionResponse> {
    let rates_fresh = config.freshness().all_fresh(rates, now);
    if !rates_fresh {
        warn!(max_age_secs = config.rate_max_age_secs, "Cached exchange rates are stale");
    }

    let rate = resolve_rate(from, to, rates).ok_or(CliError::RateUnavailable { from, to })?;

    Ok(ConversionResponse {
        result: convert(amount, from, to, rate)?,
        rate,
        rates_fresh,
    })
}
