//! In-memory Rate Sources
//!
//! Doubles for the live rate port: a static table that counts fetches, and a
//! source that always fails with a chosen error.

use async_trait::async_trait;
use chrono::Utc;
use core_kernel::{Currency, DomainPort, ExchangeRate, PortError, PortResult, RateSource};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Rate source answering from a fixed table of quotes
#[derive(Debug, Default)]
pub struct StaticRateSource {
    quotes: Vec<ExchangeRate>,
    fetches: AtomicUsize,
}

impl StaticRateSource {
    pub fn new(quotes: Vec<ExchangeRate>) -> Self {
        Self {
            quotes,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Table with a single quote stamped now
    pub fn single(base: Currency, target: Currency, rate: Decimal) -> Self {
        Self::new(vec![ExchangeRate::new(base, target, rate, Utc::now()).with_source("static")])
    }

    /// Number of `fetch_rate` calls so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DomainPort for StaticRateSource {}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch_rate(&self, base: Currency, target: Currency) -> PortResult<ExchangeRate> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.quotes
            .iter()
            .find(|q| q.quotes(base, target))
            .cloned()
            .ok_or_else(|| PortError::not_found("ExchangeRate", format!("{}->{}", base, target)))
    }
}

/// Rate source whose every fetch fails with the error `make_error` builds
#[derive(Debug, Clone, Copy)]
pub struct FailingRateSource {
    make_error: fn() -> PortError,
}

impl FailingRateSource {
    pub fn new(make_error: fn() -> PortError) -> Self {
        Self { make_error }
    }

    pub fn timeout() -> Self {
        Self::new(|| PortError::Timeout {
            operation: "fetch_rate".to_string(),
            duration_ms: 5000,
        })
    }

    pub fn unavailable() -> Self {
        Self::new(|| PortError::unavailable("rates-api"))
    }
}

impl DomainPort for FailingRateSource {}

#[async_trait]
impl RateSource for FailingRateSource {
    async fn fetch_rate(&self, _base: Currency, _target: Currency) -> PortResult<ExchangeRate> {
        Err((self.make_error)())
    }
}
