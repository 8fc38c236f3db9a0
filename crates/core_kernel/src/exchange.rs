//! Exchange rates, rate resolution and freshness
//!
//! Rates are directional: a rate `base -> target` of `r` means one unit of
//! `base` buys `r` units of `target`. Resolution tries an ordered list of
//! strategies and stops at the first one that produces a rate:
//!
//! 1. identity (same currency)
//! 2. direct `base -> target`
//! 3. reciprocal of `target -> base`
//! 4. cross-rate through the USD anchor: `rate(base -> USD) / rate(target -> USD)`
//!
//! An unresolvable pair is `None`, never an error.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::currency::Currency;

/// Currency through which cross-rates are derived
pub const ANCHOR_CURRENCY: Currency = Currency::USD;

/// A quoted exchange rate between two currencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub base_currency: Currency,
    pub target_currency: Currency,
    /// Units of target per one unit of base
    pub rate: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ExchangeRate {
    /// Creates a new rate quote
    pub fn new(
        base_currency: Currency,
        target_currency: Currency,
        rate: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            base_currency,
            target_currency,
            rate,
            timestamp,
            source: None,
        }
    }

    /// Tags the quote with the provider it came from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns true if this quote converts `base` into `target`
    pub fn quotes(&self, base: Currency, target: Currency) -> bool {
        self.base_currency == base && self.target_currency == target
    }

    /// Returns true if the rate can be used in arithmetic
    pub fn is_usable(&self) -> bool {
        self.rate > Decimal::ZERO
    }

    /// Returns the reverse quote, or `None` for a non-positive rate
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_usable() {
            return None;
        }
        Some(Self {
            base_currency: self.target_currency,
            target_currency: self.base_currency,
            rate: Decimal::ONE.checked_div(self.rate)?,
            timestamp: self.timestamp,
            source: self.source.clone(),
        })
    }

    /// Age of the quote relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.timestamp
    }

    /// A quote is fresh when its age does not exceed `max_age`
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now) <= max_age
    }
}

/// Maximum age for cached rates before they are considered stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub max_age: Duration,
}

impl FreshnessPolicy {
    pub fn from_hours(hours: i64) -> Self {
        Self {
            max_age: Duration::hours(hours),
        }
    }

    pub fn from_secs(secs: i64) -> Self {
        Self {
            max_age: Duration::seconds(secs),
        }
    }

    /// Applies the policy to a rate set
    pub fn all_fresh(&self, rates: &[ExchangeRate], now: DateTime<Utc>) -> bool {
        are_rates_fresh(rates, self.max_age, now)
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::from_hours(1)
    }
}

/// Returns true only if every rate in the set is within `max_age`
///
/// A single stale quote marks the whole set stale. An empty set is fresh.
pub fn are_rates_fresh(rates: &[ExchangeRate], max_age: Duration, now: DateTime<Utc>) -> bool {
    rates.iter().all(|r| r.is_fresh(now, max_age))
}

/// A single rate-resolution strategy
pub trait RateResolver: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Attempts to find the `base -> target` rate from the quote set
    fn resolve(&self, base: Currency, target: Currency, rates: &[ExchangeRate]) -> Option<Decimal>;
}

/// Same currency converts at exactly 1
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRate;

impl RateResolver for IdentityRate {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn resolve(&self, base: Currency, target: Currency, _rates: &[ExchangeRate]) -> Option<Decimal> {
        (base == target).then_some(Decimal::ONE)
    }
}

/// Uses a quote for exactly `base -> target`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRate;

impl RateResolver for DirectRate {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn resolve(&self, base: Currency, target: Currency, rates: &[ExchangeRate]) -> Option<Decimal> {
        find_quote(rates, base, target).map(|q| q.rate)
    }
}

/// Uses the reciprocal of a `target -> base` quote
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseRate;

impl RateResolver for InverseRate {
    fn name(&self) -> &'static str {
        "inverse"
    }

    fn resolve(&self, base: Currency, target: Currency, rates: &[ExchangeRate]) -> Option<Decimal> {
        find_quote(rates, target, base).and_then(|q| Decimal::ONE.checked_div(q.rate))
    }
}

/// Derives a cross-rate through a common anchor currency
#[derive(Debug, Clone, Copy)]
pub struct AnchorCrossRate {
    pub anchor: Currency,
}

impl Default for AnchorCrossRate {
    fn default() -> Self {
        Self {
            anchor: ANCHOR_CURRENCY,
        }
    }
}

impl AnchorCrossRate {
    /// Rate of one unit of `currency` in anchor units
    fn leg(&self, currency: Currency, rates: &[ExchangeRate]) -> Option<Decimal> {
        if currency == self.anchor {
            return Some(Decimal::ONE);
        }
        DirectRate
            .resolve(currency, self.anchor, rates)
            .or_else(|| InverseRate.resolve(currency, self.anchor, rates))
    }
}

impl RateResolver for AnchorCrossRate {
    fn name(&self) -> &'static str {
        "anchor-cross"
    }

    fn resolve(&self, base: Currency, target: Currency, rates: &[ExchangeRate]) -> Option<Decimal> {
        let base_leg = self.leg(base, rates)?;
        let target_leg = self.leg(target, rates)?;
        base_leg.checked_div(target_leg)
    }
}

/// Ordered list of resolvers, evaluated until one succeeds
pub struct RateResolutionChain {
    resolvers: Vec<Box<dyn RateResolver>>,
}

impl RateResolutionChain {
    /// Creates an empty chain
    pub fn empty() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Appends a strategy to the end of the chain
    pub fn with(mut self, resolver: impl RateResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Names of the strategies in evaluation order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    pub fn resolve(&self, base: Currency, target: Currency, rates: &[ExchangeRate]) -> Option<Decimal> {
        for resolver in &self.resolvers {
            if let Some(rate) = resolver.resolve(base, target, rates) {
                debug!(%base, %target, %rate, strategy = resolver.name(), "Resolved exchange rate");
                return Some(rate);
            }
        }
        debug!(%base, %target, "No exchange rate could be resolved");
        None
    }
}

impl Default for RateResolutionChain {
    fn default() -> Self {
        Self::empty()
            .with(IdentityRate)
            .with(DirectRate)
            .with(InverseRate)
            .with(AnchorCrossRate::default())
    }
}

impl std::fmt::Debug for RateResolutionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateResolutionChain")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

/// Resolves the `base -> target` rate with the standard strategy order
pub fn resolve_rate(base: Currency, target: Currency, rates: &[ExchangeRate]) -> Option<Decimal> {
    RateResolutionChain::default().resolve(base, target, rates)
}

fn find_quote(rates: &[ExchangeRate], base: Currency, target: Currency) -> Option<&ExchangeRate> {
    rates.iter().find(|r| r.quotes(base, target) && r.is_usable())
}
