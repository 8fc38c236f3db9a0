//! Schedule DTOs

use chrono::NaiveDate;
use serde::Serialize;

use domain_recurring::{PlannedInvoice, ScheduleStatus};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub today: NaiveDate,
    pub status: ScheduleStatus,
    pub active: bool,
    pub due: bool,
    pub next_generation_date: NaiveDate,
    pub occurrence_count: u32,
    /// Occurrences after the next generation date
    pub upcoming: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned: Option<PlannedInvoice>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceNumberResponse {
    pub base: String,
    pub increment: u64,
    pub invoice_number: String,
}
