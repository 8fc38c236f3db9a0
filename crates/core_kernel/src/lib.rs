//! Core Kernel - Foundational types for the invoice engine
//!
//! This crate provides the building blocks shared by the invoicing and
//! recurring-billing domains:
//! - Supported currencies and precision rounding
//! - Currency amounts and conversion arithmetic
//! - Exchange rates, rate resolution and freshness checks
//! - Calendar helpers for schedule arithmetic
//! - Strongly-typed identifiers and ports for external collaborators

pub mod currency;
pub mod money;
pub mod exchange;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use currency::{get_currency, round_to_precision, Currency};
pub use money::{convert, CurrencyAmount, MoneyError};
pub use exchange::{
    are_rates_fresh, resolve_rate, AnchorCrossRate, DirectRate, ExchangeRate, FreshnessPolicy,
    IdentityRate, InverseRate, RateResolutionChain, RateResolver, ANCHOR_CURRENCY,
};
pub use temporal::{add_days, add_months_clamped, TemporalError, Timezone};
pub use identifiers::{LineItemId, ScheduleId};
pub use ports::{DomainPort, OfflineRateSource, PortError, PortResult, RateSource};
