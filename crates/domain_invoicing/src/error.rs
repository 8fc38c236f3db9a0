//! Invoicing domain errors

use core_kernel::Currency;
use thiserror::Error;

/// Errors that can occur in the invoicing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoicingError {
    /// Line item not found
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Line item failed validation
    #[error("Invalid line item {field}: {reason}")]
    InvalidLineItem {
        field: &'static str,
        reason: String,
    },

    /// Re-pricing was computed against a currency the invoice no longer uses
    #[error("Stale re-pricing: computed from {found} but invoice is in {expected}")]
    StaleRepricing {
        expected: Currency,
        found: Currency,
    },

    /// Re-pricing was computed for a different set of line items
    #[error("Stale re-pricing: line items changed since it was computed")]
    RepricingItemsChanged,
}

impl InvoicingError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        InvoicingError::InvalidLineItem {
            field,
            reason: reason.into(),
        }
    }
}
