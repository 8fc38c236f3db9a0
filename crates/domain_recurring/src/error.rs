//! Recurring billing errors

use core_kernel::TemporalError;
use thiserror::Error;

/// Errors that can occur in the recurring billing domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurringError {
    /// Frequency string is not one of weekly, monthly, quarterly, yearly
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// Schedules must advance by at least one period
    #[error("Invalid interval: {0} (must be at least 1)")]
    InvalidInterval(u32),

    /// Schedule fields are inconsistent with each other
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Calendar arithmetic left the representable date range
    #[error("Calendar error: {0}")]
    Calendar(#[from] TemporalError),

    /// Invoice number cannot be incremented
    #[error("Invalid invoice number: {0:?}")]
    InvalidInvoiceNumber(String),

    /// Incremented invoice number does not fit
    #[error("Invoice number overflow: {0}")]
    InvoiceNumberOverflow(String),

    /// Generation was recorded on a schedule that is not active
    #[error("Schedule is not active")]
    ScheduleInactive,
}
