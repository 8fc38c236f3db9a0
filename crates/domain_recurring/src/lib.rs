//! Recurring Billing Domain
//!
//! This crate decides when a recurring invoice template should produce its
//! next invoice and when it should stop. Everything here is a pure function
//! of a schedule and a reference date.
//!
//! # Schedule Lifecycle
//!
//! ```text
//! Active --(invoice generated, occurrence_count += 1)--> Active
//!        \-> Stopped   (deactivated | end date passed | max occurrences reached)
//! ```
//!
//! A stopped schedule never reactivates on its own; resuming is an explicit
//! [`RecurringSchedule::resume`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_recurring::{Frequency, RecurringSchedule, plan_generation};
//!
//! let mut schedule = RecurringSchedule::new(Frequency::Monthly, 1, start)?
//!     .with_max_occurrences(12);
//!
//! if let Some(planned) = plan_generation(&schedule, "INV-0001", today)? {
//!     // materialise planned.invoice_number dated planned.issue_date
//!     schedule.record_generation(today)?;
//! }
//! ```

pub mod frequency;
pub mod schedule;
pub mod numbering;
pub mod generation;
pub mod error;

pub use frequency::{
    calculate_next_date, calculate_occurrence_count, get_next_n_occurrences, is_schedule_due,
    Cadence, Frequency, Occurrences,
};
pub use schedule::{
    is_recurring_active, should_stop_recurring, RecurringSchedule, ScheduleBound, ScheduleStatus,
    StopReason,
};
pub use numbering::generate_invoice_number;
pub use generation::{plan_generation, PlannedInvoice};
pub use error::RecurringError;
