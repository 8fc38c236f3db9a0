//! Billing frequencies and occurrence arithmetic
//!
//! Occurrences are anchored to the start date: the k-th occurrence is
//! `start + k * step`, not the previous occurrence plus one step. A schedule
//! starting on Jan 31 therefore bills on Feb 29, Mar 31, Apr 30, ... rather
//! than drifting to the 29th after February.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{add_days, add_months_clamped, TemporalError};

use crate::error::RecurringError;

/// How often a recurring invoice is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Calendar months per period, `None` for day-based frequencies
    fn months_per_period(&self) -> Option<u32> {
        match self {
            Frequency::Weekly => None,
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::Yearly => Some(12),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RecurringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(RecurringError::InvalidFrequency(s.to_string())),
        }
    }
}

/// A frequency together with its interval (every `interval` periods)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    pub frequency: Frequency,
    pub interval: u32,
}

impl Cadence {
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval,
        }
    }

    /// The k-th occurrence after `start` (k = 0 is `start` itself)
    pub fn nth_after(&self, start: NaiveDate, k: u32) -> Result<NaiveDate, RecurringError> {
        let periods = u64::from(self.interval) * u64::from(k);
        let out_of_range =
            || TemporalError::DateOutOfRange(format!("{} + {} {} periods", start, periods, self.frequency));

        let date = match self.frequency.months_per_period() {
            None => add_days(start, periods.checked_mul(7).ok_or_else(out_of_range)?)?,
            Some(months) => {
                let total = periods
                    .checked_mul(u64::from(months))
                    .and_then(|m| u32::try_from(m).ok())
                    .ok_or_else(out_of_range)?;
                add_months_clamped(start, total)?
            }
        };
        Ok(date)
    }

    /// First occurrence anchored at `start` that falls strictly after `after`
    pub fn first_after(&self, start: NaiveDate, after: NaiveDate) -> Result<NaiveDate, RecurringError> {
        if self.interval == 0 {
            return Err(RecurringError::InvalidInterval(self.interval));
        }
        let mut k: u32 = 1;
        loop {
            let date = self.nth_after(start, k)?;
            if date > after {
                return Ok(date);
            }
            k = k.checked_add(1).ok_or_else(|| {
                TemporalError::DateOutOfRange(format!("no occurrence of {} after {}", start, after))
            })?;
        }
    }

    /// Iterator over `start`, then each following occurrence
    pub fn occurrences_from(&self, start: NaiveDate) -> Occurrences {
        Occurrences {
            cadence: *self,
            start,
            index: 0,
        }
    }
}

/// Occurrence dates of a cadence, starting with the anchor date
///
/// Pure and restartable: cloning yields an independent iterator from the
/// same position. A zero interval yields only the anchor. Iteration ends if
/// the calendar runs out.
#[derive(Debug, Clone)]
pub struct Occurrences {
    cadence: Cadence,
    start: NaiveDate,
    index: u32,
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.cadence.interval == 0 && self.index > 0 {
            return None;
        }
        let date = self.cadence.nth_after(self.start, self.index).ok()?;
        self.index = self.index.checked_add(1)?;
        Some(date)
    }
}

/// Next date one step of `interval` periods after `base`
///
/// A zero interval returns `base` unchanged.
pub fn calculate_next_date(
    base: NaiveDate,
    frequency: Frequency,
    interval: u32,
) -> Result<NaiveDate, RecurringError> {
    Cadence::new(frequency, interval).nth_after(base, 1)
}

/// True when `next` is on or before `reference`
pub fn is_schedule_due(next: NaiveDate, reference: NaiveDate) -> bool {
    next <= reference
}

/// Number of occurrences, counting `start`, that fall within `[start, end]`
///
/// Returns 0 when `end` is before `start`. A zero interval counts only
/// `start`.
pub fn calculate_occurrence_count(
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
    interval: u32,
) -> u32 {
    if end < start {
        return 0;
    }
    let count = Cadence::new(frequency, interval)
        .occurrences_from(start)
        .take_while(|date| *date <= end)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// The next `n` occurrences strictly after `start`, ascending
///
/// A zero interval has no occurrence after `start` and yields nothing.
pub fn get_next_n_occurrences(
    start: NaiveDate,
    frequency: Frequency,
    interval: u32,
    n: usize,
) -> Result<Vec<NaiveDate>, RecurringError> {
    if interval == 0 {
        return Ok(Vec::new());
    }
    let cadence = Cadence::new(frequency, interval);
    (1..=n)
        .map(|k| {
            let k = u32::try_from(k).map_err(|_| {
                TemporalError::DateOutOfRange(format!("occurrence {} of {}", k, start))
            })?;
            cadence.nth_after(start, k)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("Monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
        assert_eq!(" weekly ".parse::<Frequency>(), Ok(Frequency::Weekly));
        assert_eq!(
            "fortnightly".parse::<Frequency>(),
            Err(RecurringError::InvalidFrequency("fortnightly".to_string()))
        );
    }

    #[test]
    fn test_next_date_per_frequency() {
        let base = date(2024, 1, 15);
        assert_eq!(calculate_next_date(base, Frequency::Weekly, 2).unwrap(), date(2024, 1, 29));
        assert_eq!(calculate_next_date(base, Frequency::Monthly, 1).unwrap(), date(2024, 2, 15));
        assert_eq!(calculate_next_date(base, Frequency::Quarterly, 1).unwrap(), date(2024, 4, 15));
        assert_eq!(calculate_next_date(base, Frequency::Yearly, 2).unwrap(), date(2026, 1, 15));
    }

    #[test]
    fn test_anchored_occurrences_do_not_drift() {
        let dates: Vec<NaiveDate> = Cadence::new(Frequency::Monthly, 1)
            .occurrences_from(date(2024, 1, 31))
            .take(4)
            .collect();
        assert_eq!(
            dates,
            vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30)]
        );
    }

    #[test]
    fn test_first_after_skips_to_later_anchor() {
        let cadence = Cadence::new(Frequency::Monthly, 1);
        assert_eq!(cadence.first_after(date(2024, 1, 31), date(2024, 1, 31)).unwrap(), date(2024, 2, 29));
        assert_eq!(cadence.first_after(date(2024, 1, 31), date(2024, 3, 15)).unwrap(), date(2024, 3, 31));
        assert_eq!(cadence.first_after(date(2024, 1, 31), date(2023, 6, 1)).unwrap(), date(2024, 2, 29));
        assert_eq!(
            Cadence::new(Frequency::Weekly, 0).first_after(date(2024, 1, 1), date(2024, 1, 1)),
            Err(RecurringError::InvalidInterval(0))
        );
    }

    #[test]
    fn test_zero_interval_iterator_yields_anchor_only() {
        let dates: Vec<NaiveDate> = Cadence::new(Frequency::Weekly, 0)
            .occurrences_from(date(2024, 1, 1))
            .collect();
        assert_eq!(dates, vec![date(2024, 1, 1)]);
    }
}
