//! Recurring schedule handler

use chrono::NaiveDate;

use domain_recurring::{
    is_recurring_active, is_schedule_due, plan_generation, RecurringError, RecurringSchedule,
};

use crate::dto::ScheduleReport;
use crate::error::CliResult;

/// Evaluates a stored schedule on `today`
///
/// `upcoming` lists up to `preview` anchored occurrences strictly after the
/// stored next generation date. A generation is planned only when
/// `base_number` is given.
pub fn evaluate_schedule(
    schedule: &RecurringSchedule,
    today: NaiveDate,
    preview: usize,
    base_number: Option<&str>,
) -> CliResult<ScheduleReport> {
    if schedule.interval == 0 {
        return Err(RecurringError::InvalidInterval(schedule.interval).into());
    }

    let upcoming = schedule
        .cadence()
        .occurrences_from(schedule.start_date)
        .skip_while(|date| *date <= schedule.next_generation_date)
        .take(preview)
        .collect();

    let planned = match base_number {
        Some(base) => plan_generation(schedule, base, today)?,
        None => None,
    };

    Ok(ScheduleReport {
        today,
        status: schedule.status(today),
        active: is_recurring_active(schedule, today),
        due: is_schedule_due(schedule.next_generation_date, today),
        next_generation_date: schedule.next_generation_date,
        occurrence_count: schedule.occurrence_count,
        upcoming,
        planned,
    })
}
