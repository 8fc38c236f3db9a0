//! Planning the next invoice of a recurring schedule

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RecurringError;
use crate::frequency::is_schedule_due;
use crate::numbering::generate_invoice_number;
use crate::schedule::{is_recurring_active, RecurringSchedule};

/// An invoice the scheduler should materialise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedInvoice {
    /// One-based position of this invoice in the schedule
    pub sequence: u32,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
}

/// Decides whether `schedule` produces an invoice on `today`
///
/// Returns `None` when the schedule is stopped, not yet due, or its next
/// generation date falls after the end date. The invoice number is
/// `base_number` advanced by the sequence.
pub fn plan_generation(
    schedule: &RecurringSchedule,
    base_number: &str,
    today: NaiveDate,
) -> Result<Option<PlannedInvoice>, RecurringError> {
    if !is_recurring_active(schedule, today) {
        debug!(schedule_id = %schedule.id, "Schedule is not active");
        return Ok(None);
    }
    if !is_schedule_due(schedule.next_generation_date, today) {
        return Ok(None);
    }
    if schedule
        .end_date
        .is_some_and(|end| schedule.next_generation_date > end)
    {
        debug!(schedule_id = %schedule.id, "Next generation date is past the end date");
        return Ok(None);
    }

    let sequence = schedule
        .occurrence_count
        .checked_add(1)
        .ok_or_else(|| RecurringError::InvalidSchedule("occurrence count overflow".to_string()))?;
    let invoice_number = generate_invoice_number(base_number, u64::from(sequence))?;

    Ok(Some(PlannedInvoice {
        sequence,
        invoice_number,
        issue_date: schedule.next_generation_date,
    }))
}
