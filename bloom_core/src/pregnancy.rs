//! Gestational age calculations.
//!
//! A pregnancy is dated either from the estimated due date (taken as given)
//! or from the last menstrual period, shifted by how far the cycle length
//! differs from 28 days. All arithmetic is in whole calendar days.

use chrono::{Local, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Length of a full-term pregnancy counted from the LMP
pub const FULL_TERM_DAYS: i64 = 280;

/// Weeks shown on the progress bar
pub const FULL_TERM_WEEKS: u32 = 40;

/// Pregnancy trimester
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// Weeks 0–13 are the first trimester, 14–27 the second, 28+ the third
    pub fn from_weeks(weeks: u32) -> Self {
        match weeks {
            0..=13 => Trimester::First,
            14..=27 => Trimester::Second,
            _ => Trimester::Third,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trimester::First => "First Trimester",
            Trimester::Second => "Second Trimester",
            Trimester::Third => "Third Trimester",
        }
    }
}

/// Gestational age on a given day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PregnancyResult {
    /// Completed weeks, 0–40
    pub gestational_weeks: u32,
    /// Days since conception dating, clamped to 0–280
    pub gestational_days: u32,
    /// 1–7
    pub day_in_week: u32,
    pub due_date: NaiveDate,
    pub trimester: Trimester,
    /// 0–100
    pub progress_percent: f64,
}

/// Compute gestational age as of `today`
///
/// Returns `None` when neither date is known. A due date wins over the
/// LMP when both are present.
pub fn compute_gestation(
    lmp: Option<NaiveDate>,
    edd: Option<NaiveDate>,
    cycle_length: i64,
    today: NaiveDate,
) -> Option<PregnancyResult> {
    let (due_date, raw_days) = match (edd, lmp) {
        (Some(edd), _) => (edd, FULL_TERM_DAYS - (edd - today).num_days()),
        (None, Some(lmp)) => {
            let offset = cycle_length
                .checked_sub(crate::DEFAULT_CYCLE_LENGTH)
                .and_then(|adjustment| adjustment.checked_add(FULL_TERM_DAYS))?;
            let due = add_days(lmp, offset)?;
            (due, (today - lmp).num_days())
        }
        (None, None) => return None,
    };

    // Bounded to 0..=280, so the narrowing cannot truncate
    let gestational_days = raw_days.clamp(0, FULL_TERM_DAYS) as u32;
    let weeks = gestational_days / 7;
    let day_in_week = gestational_days % 7 + 1;
    let progress_percent = (f64::from(weeks) / f64::from(FULL_TERM_WEEKS) * 100.0).min(100.0);

    tracing::debug!(
        "Gestation on {}: {} days (due {})",
        today,
        gestational_days,
        due_date
    );

    Some(PregnancyResult {
        gestational_weeks: weeks.min(FULL_TERM_WEEKS),
        gestational_days,
        day_in_week,
        due_date,
        trimester: Trimester::from_weeks(weeks),
        progress_percent,
    })
}

/// [`compute_gestation`] evaluated against the local clock
pub fn compute_gestation_now(
    lmp: Option<NaiveDate>,
    edd: Option<NaiveDate>,
    cycle_length: i64,
) -> Option<PregnancyResult> {
    compute_gestation(lmp, edd, cycle_length, Local::now().date_naive())
}

/// Offset a date by a signed number of days, `None` past the calendar range
pub(crate) fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// "Day N" during week zero, "Week W, Day N" afterwards
pub fn week_display_text(pregnancy: &PregnancyResult) -> String {
    if pregnancy.gestational_weeks == 0 {
        format!("Day {}", pregnancy.day_in_week)
    } else {
        format!(
            "Week {}, Day {}",
            pregnancy.gestational_weeks, pregnancy.day_in_week
        )
    }
}

/// Long-form due date, e.g. "March 5, 2026"
pub fn format_due_date(due_date: NaiveDate) -> String {
    due_date.format("%B %-d, %Y").to_string()
}

/// Days left until the due date, never negative
pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days().max(0)
}

/// Size comparison for a pregnancy week
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeComparison {
    pub name: &'static str,
    pub description: &'static str,
}

const FRUIT_BY_WEEK: [(&str, &str); 40] = [
    ("Poppy seed", "Just a tiny beginning"),
    ("Sesame seed", "Still microscopic"),
    ("Chia seed", "About to implant"),
    ("Raspberry", "Heart starts beating"),
    ("Peppercorn", "Brain development begins"),
    ("Lentil", "Limb buds appear"),
    ("Blueberry", "Double in size this week"),
    ("Kidney bean", "Fingers and toes forming"),
    ("Grape", "Heart fully formed"),
    ("Kumquat", "All vital organs present"),
    ("Fig", "Growing rapidly now"),
    ("Lime", "End of first trimester"),
    ("Peach", "Vocal cords developing"),
    ("Lemon", "Second trimester begins"),
    ("Apple", "Bones hardening"),
    ("Avocado", "Can hear your voice"),
    ("Turnip", "Fat accumulation starts"),
    ("Bell pepper", "Yawning and hiccupping"),
    ("Tomato", "Sensory development"),
    ("Banana", "Halfway there!"),
    ("Carrot", "Rapid brain growth"),
    ("Spaghetti squash", "Hearing improves"),
    ("Large mango", "Sense of movement"),
    ("Corn", "Viability milestone"),
    ("Rutabaga", "Hair growth"),
    ("Red onion", "Eyes can open"),
    ("Cauliflower", "Third trimester soon"),
    ("Eggplant", "Third trimester begins"),
    ("Butternut squash", "Bones hardening more"),
    ("Cabbage", "Strong kicks now"),
    ("Coconut", "Rapid weight gain"),
    ("Napa cabbage", "Practicing breathing"),
    ("Pineapple", "Immune system developing"),
    ("Cantaloupe", "Central nervous system"),
    ("Honeydew melon", "Kidneys fully developed"),
    ("Romaine lettuce", "Considered full-term soon"),
    ("Swiss chard", "Full-term!"),
    ("Leek", "Ready any day"),
    ("Mini watermelon", "Organs fully mature"),
    ("Small pumpkin", "Ready to meet you!"),
];

/// Fruit or vegetable the baby is about the size of in `week` (1–40)
pub fn fruit_for_week(week: u32) -> SizeComparison {
    let (name, description) = week
        .checked_sub(1)
        .and_then(|idx| FRUIT_BY_WEEK.get(idx as usize))
        .copied()
        .unwrap_or(("Little one", "Growing beautifully"));
    SizeComparison { name, description }
}
