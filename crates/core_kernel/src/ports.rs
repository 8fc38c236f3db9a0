//! Ports for external collaborators
//!
//! The engine itself performs no I/O. Anything that does (a live exchange
//! rate provider, a schedule store) sits behind a port trait defined here and
//! is implemented by an adapter outside the domain crates.
//!
//! ```text
//! ┌──────────────────────────┐        ┌───────────────────────────┐
//! │ domain_invoicing         │        │ adapter (HTTP, cache, ...)│
//! │  reprice_items ──────────┼──────▶ │  impl RateSource          │
//! └──────────────────────────┘        └───────────────────────────┘
//! ```
//!
//! Retry and backoff belong to the adapter. The engine makes one call and
//! treats any error as "no rate".

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::currency::Currency;
use crate::exchange::ExchangeRate;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Timeout { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

pub type PortResult<T> = Result<T, PortError>;

/// Marker trait for all ports: thread-safe and usable from async contexts
pub trait DomainPort: Send + Sync {}

/// Live source of exchange rates for a single currency pair
#[async_trait]
pub trait RateSource: DomainPort {
    /// Fetches the current `base -> target` quote
    async fn fetch_rate(&self, base: Currency, target: Currency) -> PortResult<ExchangeRate>;
}

/// Rate source for offline operation: every fetch fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRateSource;

impl DomainPort for OfflineRateSource {}

#[async_trait]
impl RateSource for OfflineRateSource {
    async fn fetch_rate(&self, base: Currency, target: Currency) -> PortResult<ExchangeRate> {
        Err(PortError::not_found("ExchangeRate", format!("{}->{}", base, target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("ExchangeRate", "USD->EUR");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("USD->EUR"));
    }

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::Timeout {
            operation: "fetch_rate".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());
        assert!(PortError::unavailable("fx-provider").is_transient());
    }

    #[tokio::test]
    async fn test_offline_source_never_returns_a_rate() {
        let result = OfflineRateSource.fetch_rate(Currency::USD, Currency::EUR).await;
        assert!(matches!(result, Err(PortError::NotFound { .. })));
    }
}
