//! Menstrual cycle estimates: next period, fertile window, cycle progress.

use crate::pregnancy::add_days;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Ovulation is assumed this many days before the next period
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Estimates derived from the last period start
///
/// Only `cycle_progress` is populated when no period has been logged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CycleResult {
    pub next_period: Option<NaiveDate>,
    pub fertile_window_start: Option<NaiveDate>,
    pub fertile_window_end: Option<NaiveDate>,
    pub days_until_next_period: Option<i64>,
    /// 0–100
    pub cycle_progress: f64,
}

impl CycleResult {
    /// Whether `day` falls inside the (inclusive) fertile window
    pub fn in_fertile_window(&self, day: NaiveDate) -> bool {
        match (self.fertile_window_start, self.fertile_window_end) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}

/// Estimate the current cycle as of `today`
///
/// The fertile window runs from five days before the estimated ovulation
/// day through one day after it. Cycle length is not validated: a zero
/// length caps progress at 100 instead of panicking.
pub fn compute_cycle(
    last_period: Option<NaiveDate>,
    cycle_length: i64,
    today: NaiveDate,
) -> CycleResult {
    let Some(last_period) = last_period else {
        return CycleResult::default();
    };

    let days_since = (today - last_period).num_days();
    let next_period = add_days(last_period, cycle_length);
    let ovulation_offset = cycle_length.checked_sub(LUTEAL_PHASE_DAYS);
    let window_day = |shift: i64| {
        ovulation_offset
            .and_then(|offset| offset.checked_add(shift))
            .and_then(|days| add_days(last_period, days))
    };

    // f64::min discards NaN, so 0/0 also lands on 100
    let cycle_progress = (days_since as f64 / cycle_length as f64 * 100.0).min(100.0);

    tracing::debug!(
        "Cycle on {}: day {} of {}, next period {:?}",
        today,
        days_since,
        cycle_length,
        next_period
    );

    CycleResult {
        next_period,
        fertile_window_start: window_day(-5),
        fertile_window_end: window_day(1),
        days_until_next_period: next_period.map(|next| (next - today).num_days()),
        cycle_progress,
    }
}

/// [`compute_cycle`] evaluated against the local clock
pub fn compute_cycle_now(last_period: Option<NaiveDate>, cycle_length: i64) -> CycleResult {
    compute_cycle(last_period, cycle_length, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_last_period_gives_zero_progress() {
        let result = compute_cycle(None, 28, date("2025-03-01"));
        assert_eq!(result.cycle_progress, 0.0);
        assert!(result.next_period.is_none());
        assert!(result.fertile_window_start.is_none());
        assert!(result.fertile_window_end.is_none());
        assert!(result.days_until_next_period.is_none());
    }

    #[test]
    fn test_standard_cycle() {
        let result = compute_cycle(Some(date("2025-03-01")), 28, date("2025-03-08"));

        assert_eq!(result.next_period, Some(date("2025-03-29")));
        assert_eq!(result.days_until_next_period, Some(21));
        // Ovulation on day 14 after the period start
        assert_eq!(result.fertile_window_start, Some(date("2025-03-10")));
        assert_eq!(result.fertile_window_end, Some(date("2025-03-16")));
        assert_eq!(result.cycle_progress, 25.0);
    }

    #[test]
    fn test_long_cycle_shifts_window() {
        let result = compute_cycle(Some(date("2025-03-01")), 35, date("2025-03-01"));

        assert_eq!(result.next_period, Some(date("2025-04-05")));
        assert_eq!(result.fertile_window_start, Some(date("2025-03-17")));
        assert_eq!(result.fertile_window_end, Some(date("2025-03-23")));
        assert_eq!(result.cycle_progress, 0.0);
    }

    #[test]
    fn test_overdue_period_caps_progress() {
        let result = compute_cycle(Some(date("2025-01-01")), 28, date("2025-03-01"));
        assert_eq!(result.cycle_progress, 100.0);
        assert!(result.days_until_next_period.unwrap() < 0);
    }

    #[test]
    fn test_zero_cycle_length_does_not_panic() {
        let same_day = compute_cycle(Some(date("2025-03-01")), 0, date("2025-03-01"));
        assert_eq!(same_day.cycle_progress, 100.0);

        let later = compute_cycle(Some(date("2025-03-01")), 0, date("2025-03-05"));
        assert_eq!(later.cycle_progress, 100.0);
        assert_eq!(later.next_period, Some(date("2025-03-01")));
    }

    #[test]
    fn test_extreme_cycle_lengths_leave_dates_unset() {
        let last_period = Some(date("2025-03-01"));
        let today = date("2025-03-08");

        for cycle_length in [i64::MAX, i64::MIN] {
            let result = compute_cycle(last_period, cycle_length, today);
            assert!(result.next_period.is_none());
            assert!(result.fertile_window_start.is_none());
            assert!(result.fertile_window_end.is_none());
            assert!(result.days_until_next_period.is_none());
        }

        let progress = compute_cycle(last_period, i64::MAX, today).cycle_progress;
        assert!((0.0..1.0).contains(&progress));
    }

    #[test]
    fn test_in_fertile_window() {
        let result = compute_cycle(Some(date("2025-03-01")), 28, date("2025-03-08"));
        assert!(!result.in_fertile_window(date("2025-03-09")));
        assert!(result.in_fertile_window(date("2025-03-10")));
        assert!(result.in_fertile_window(date("2025-03-16")));
        assert!(!result.in_fertile_window(date("2025-03-17")));

        assert!(!CycleResult::default().in_fertile_window(date("2025-03-10")));
    }
}
