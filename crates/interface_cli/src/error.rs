//! Command error handling

use std::path::PathBuf;

use core_kernel::{Currency, MoneyError};
use domain_invoicing::InvoicingError;
use domain_recurring::RecurringError;
use thiserror::Error;

/// Command error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invoice error: {0}")]
    Invoicing(#[from] InvoicingError),

    #[error("Schedule error: {0}")]
    Recurring(#[from] RecurringError),

    #[error("Currency error: {0}")]
    Money(#[from] MoneyError),

    #[error("No exchange rate available for {from} -> {to}")]
    RateUnavailable { from: Currency, to: Currency },
}

impl CliError {
    /// Stable machine-readable kind for error output
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Io { .. } => "io_error",
            CliError::Json(_) => "bad_input",
            CliError::Invoicing(_) => "invoice_error",
            CliError::Recurring(_) => "schedule_error",
            CliError::Money(_) => "currency_error",
            CliError::RateUnavailable { .. } => "rate_unavailable",
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
