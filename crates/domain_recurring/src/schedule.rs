//! Recurring schedule state
//!
//! A schedule is owned by the invoice template that declares it. On the wire
//! it keeps the independent optional `end_date` and `max_occurrences`
//! fields; internally the termination rule is read through [`ScheduleBound`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::ScheduleId;

use crate::error::RecurringError;
use crate::frequency::{Cadence, Frequency};

/// When a schedule runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleBound {
    Unbounded,
    EndsOn(NaiveDate),
    EndsAfter(u32),
    /// Whichever limit is reached first
    EndsOnOrAfter {
        end_date: NaiveDate,
        max_occurrences: u32,
    },
}

impl ScheduleBound {
    pub fn from_fields(end_date: Option<NaiveDate>, max_occurrences: Option<u32>) -> Self {
        match (end_date, max_occurrences) {
            (None, None) => ScheduleBound::Unbounded,
            (Some(end_date), None) => ScheduleBound::EndsOn(end_date),
            (None, Some(max)) => ScheduleBound::EndsAfter(max),
            (Some(end_date), Some(max_occurrences)) => ScheduleBound::EndsOnOrAfter {
                end_date,
                max_occurrences,
            },
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            ScheduleBound::EndsOn(date) | ScheduleBound::EndsOnOrAfter { end_date: date, .. } => Some(*date),
            _ => None,
        }
    }

    pub fn max_occurrences(&self) -> Option<u32> {
        match self {
            ScheduleBound::EndsAfter(max)
            | ScheduleBound::EndsOnOrAfter {
                max_occurrences: max,
                ..
            } => Some(*max),
            _ => None,
        }
    }

    /// The limit that has been reached, if any
    fn exhausted_by(&self, occurrence_count: u32, today: NaiveDate) -> Option<StopReason> {
        if self.end_date().is_some_and(|end| end < today) {
            return Some(StopReason::EndDatePassed);
        }
        if self.max_occurrences().is_some_and(|max| occurrence_count >= max) {
            return Some(StopReason::MaxOccurrencesReached);
        }
        None
    }
}

/// Why a schedule is no longer active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Deactivated,
    EndDatePassed,
    MaxOccurrencesReached,
}

/// Derived state of a schedule on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Stopped(StopReason),
}

fn default_active() -> bool {
    true
}

/// Recurrence configuration of an invoice template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSchedule {
    #[serde(default)]
    pub id: ScheduleId,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurrences: Option<u32>,
    #[serde(default)]
    pub occurrence_count: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub next_generation_date: NaiveDate,
}

impl RecurringSchedule {
    /// Creates an active schedule whose first generation is one step after `start_date`
    pub fn new(frequency: Frequency, interval: u32, start_date: NaiveDate) -> Result<Self, RecurringError> {
        if interval == 0 {
            return Err(RecurringError::InvalidInterval(interval));
        }
        let next_generation_date = Cadence::new(frequency, interval).nth_after(start_date, 1)?;

        Ok(Self {
            id: ScheduleId::new(),
            frequency,
            interval,
            start_date,
            end_date: None,
            max_occurrences: None,
            occurrence_count: 0,
            is_active: true,
            next_generation_date,
        })
    }

    /// Sets the last day on which the schedule may run
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Result<Self, RecurringError> {
        if end_date < self.start_date {
            return Err(RecurringError::InvalidSchedule(format!(
                "end date {} is before start date {}",
                end_date, self.start_date
            )));
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    /// Caps the number of generated invoices
    pub fn with_max_occurrences(mut self, max_occurrences: u32) -> Self {
        self.max_occurrences = Some(max_occurrences);
        self
    }

    pub fn cadence(&self) -> Cadence {
        Cadence::new(self.frequency, self.interval)
    }

    pub fn bound(&self) -> ScheduleBound {
        ScheduleBound::from_fields(self.end_date, self.max_occurrences)
    }

    /// The reason this schedule is stopped on `today`, if it is
    pub fn stop_reason(&self, today: NaiveDate) -> Option<StopReason> {
        if !self.is_active {
            return Some(StopReason::Deactivated);
        }
        self.bound().exhausted_by(self.occurrence_count, today)
    }

    pub fn status(&self, today: NaiveDate) -> ScheduleStatus {
        match self.stop_reason(today) {
            Some(reason) => ScheduleStatus::Stopped(reason),
            None => ScheduleStatus::Active,
        }
    }

    /// Records that an invoice was materialised
    ///
    /// Increments the occurrence count, advances `next_generation_date` to the
    /// first anchored occurrence after the stored one and deactivates the
    /// schedule if a stop condition now holds. The stored date is never moved
    /// backwards, so a deferred schedule stays deferred.
    pub fn record_generation(&mut self, today: NaiveDate) -> Result<ScheduleStatus, RecurringError> {
        if let Some(reason) = self.stop_reason(today) {
            info!(schedule_id = %self.id, ?reason, "Generation recorded on a stopped schedule");
            return Err(RecurringError::ScheduleInactive);
        }

        let occurrence_count = self
            .occurrence_count
            .checked_add(1)
            .ok_or_else(|| RecurringError::InvalidSchedule("occurrence count overflow".to_string()))?;
        let next_generation_date = self
            .cadence()
            .first_after(self.start_date, self.next_generation_date)?;

        self.occurrence_count = occurrence_count;
        self.next_generation_date = next_generation_date;

        let status = self.status(today);
        if let ScheduleStatus::Stopped(reason) = status {
            self.is_active = false;
            info!(
                schedule_id = %self.id,
                occurrences = self.occurrence_count,
                ?reason,
                "Recurring schedule stopped"
            );
        }
        Ok(status)
    }

    /// Explicitly pauses the schedule
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Explicitly resumes a paused schedule
    ///
    /// Exhausted bounds still keep it stopped.
    pub fn resume(&mut self) {
        self.is_active = true;
    }
}

/// False once the schedule is deactivated, past its end date, or has
/// generated `max_occurrences` invoices
pub fn is_recurring_active(schedule: &RecurringSchedule, today: NaiveDate) -> bool {
    schedule.stop_reason(today).is_none()
}

/// Negation of [`is_recurring_active`], for the scheduler's post-generation check
pub fn should_stop_recurring(schedule: &RecurringSchedule, today: NaiveDate) -> bool {
    !is_recurring_active(schedule, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bound_from_fields() {
        assert_eq!(ScheduleBound::from_fields(None, None), ScheduleBound::Unbounded);
        assert_eq!(
            ScheduleBound::from_fields(Some(date(2024, 12, 31)), Some(3)),
            ScheduleBound::EndsOnOrAfter {
                end_date: date(2024, 12, 31),
                max_occurrences: 3
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_interval() {
        let result = RecurringSchedule::new(Frequency::Monthly, 0, date(2024, 1, 1));
        assert_eq!(result.unwrap_err(), RecurringError::InvalidInterval(0));
    }

    #[test]
    fn test_record_generation_stops_at_max() {
        let mut schedule = RecurringSchedule::new(Frequency::Monthly, 1, date(2024, 1, 1))
            .unwrap()
            .with_max_occurrences(1);

        let status = schedule.record_generation(date(2024, 2, 1)).unwrap();

        assert_eq!(status, ScheduleStatus::Stopped(StopReason::MaxOccurrencesReached));
        assert!(!schedule.is_active);
        assert_eq!(schedule.next_generation_date, date(2024, 3, 1));
    }

    #[test]
    fn test_record_generation_keeps_deferred_date_moving_forward() {
        let mut schedule = RecurringSchedule::new(Frequency::Monthly, 1, date(2024, 1, 1)).unwrap();
        schedule.next_generation_date = date(2024, 6, 1);

        schedule.record_generation(date(2024, 6, 1)).unwrap();

        assert_eq!(schedule.occurrence_count, 1);
        assert_eq!(schedule.next_generation_date, date(2024, 7, 1));
    }
}
