//! Engine configuration

use chrono::Duration;
use serde::Deserialize;

use core_kernel::{Currency, FreshnessPolicy, Timezone};
use domain_invoicing::RoundOffPolicy;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Currency for invoices that do not name one
    pub default_currency: Currency,
    /// Maximum age of a cached exchange rate, in seconds
    pub rate_max_age_secs: u64,
    /// Rounding applied to invoice grand totals
    pub round_off: RoundOffPolicy,
    /// Business timezone that decides "today" for schedules
    pub timezone: Timezone,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_currency: Currency::INR,
            rate_max_age_secs: 3600,
            round_off: RoundOffPolicy::WholeUnit,
            timezone: Timezone::default(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from `ENGINE_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("ENGINE"))
            .build()?
            .try_deserialize()
    }

    /// Freshness window for cached exchange rates
    pub fn freshness(&self) -> FreshnessPolicy {
        let secs = i64::try_from(self.rate_max_age_secs).unwrap_or(i64::MAX);
        FreshnessPolicy {
            max_age: Duration::try_seconds(secs).unwrap_or(Duration::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_currency, Currency::INR);
        assert_eq!(config.round_off, RoundOffPolicy::WholeUnit);
        assert_eq!(config.freshness().max_age, Duration::hours(1));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"default_currency":"USD","round_off":"currency_precision"}"#)
                .unwrap();
        assert_eq!(config.default_currency, Currency::USD);
        assert_eq!(config.round_off, RoundOffPolicy::CurrencyPrecision);
        assert_eq!(config.rate_max_age_secs, 3600);
    }
}
