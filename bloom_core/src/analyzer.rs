//! Rules-based health analyzer.
//!
//! A daily [`AnalyzerEntry`] is scored by walking a fixed, ordered rule
//! table. Each matching rule adds points and may contribute a message and a
//! recommendation; the table order is the order messages appear in.
//!
//! NOT MEDICAL ADVICE. Every result ends with a disclaimer.

use crate::{AnalyzerEntry, RiskLevel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MEDICAL_DISCLAIMER: &str =
    "⚠️ This is not medical advice. If you have concerns, kindly contact a healthcare professional.";

const RED_FLAG_BANNER: &str =
    "🚨 Some concerning items detected - please contact your healthcare provider";
const HEADS_UP_BANNER: &str = "⚠️ A few areas could use attention";
const OK_BANNER: &str = "✅ Overall looking good!";

/// Score at which the level becomes heads-up
pub const HEADS_UP_THRESHOLD: u32 = 2;

/// Score at which the level becomes red-flag even without a red-flag symptom
pub const RED_FLAG_THRESHOLD: u32 = 5;

/// Number of most recent entries considered by [`trend_analysis`]
pub const TREND_WINDOW: usize = 7;

/// Outcome of scoring one entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyzerResult {
    pub score: u32,
    pub level: RiskLevel,
    pub messages: Vec<String>,
    pub recommendations: Vec<String>,
}

/// One row of the scoring table
struct Rule {
    applies: fn(&AnalyzerEntry) -> bool,
    points: u32,
    message: Option<&'static str>,
    recommendation: Option<&'static str>,
    /// Forces the red-flag level on its own
    red_flag: bool,
}

impl Rule {
    const fn red_flag(applies: fn(&AnalyzerEntry) -> bool, message: &'static str) -> Self {
        Self {
            applies,
            points: 5,
            message: Some(message),
            recommendation: None,
            red_flag: true,
        }
    }

    const fn lifestyle(
        applies: fn(&AnalyzerEntry) -> bool,
        points: u32,
        message: Option<&'static str>,
        recommendation: &'static str,
    ) -> Self {
        Self {
            applies,
            points,
            message,
            recommendation: Some(recommendation),
            red_flag: false,
        }
    }
}

// Zero counts as "not recorded" for the shortfall checks, matching how the
// entry form leaves untouched fields.
fn recorded_below(value: Option<i32>, threshold: i32) -> bool {
    matches!(value, Some(v) if v != 0 && v < threshold)
}

fn is_true(flag: Option<bool>) -> bool {
    flag == Some(true)
}

const RULES: [Rule; 12] = [
    Rule::red_flag(
        |e| is_true(e.bleeding),
        "🚨 Unexpected bleeding should be evaluated immediately",
    ),
    Rule::red_flag(
        |e| is_true(e.fever),
        "🚨 Fever during pregnancy needs medical attention",
    ),
    Rule::red_flag(
        |e| is_true(e.severe_pain),
        "🚨 Severe pain should be evaluated promptly",
    ),
    Rule::red_flag(
        |e| is_true(e.headaches_vision),
        "🚨 Severe headaches or vision changes need immediate attention",
    ),
    Rule::red_flag(
        |e| is_true(e.swelling),
        "🚨 Sudden swelling could indicate complications",
    ),
    Rule::lifestyle(
        |e| e.caffeine_mg.is_some_and(|mg| mg > 200),
        2,
        Some("High caffeine intake detected"),
        "Consider reducing caffeine to under 200mg per day",
    ),
    Rule::lifestyle(
        |e| e.alcohol_drinks.is_some_and(|drinks| drinks > 0),
        3,
        Some("Alcohol consumption noted"),
        "Alcohol is not recommended during pregnancy",
    ),
    Rule::lifestyle(
        |e| is_true(e.smoked),
        3,
        Some("Smoking detected"),
        "Consider smoking cessation resources",
    ),
    Rule::lifestyle(
        |e| matches!(e.sleep_hours, Some(h) if h != 0.0 && h < 6.0),
        1,
        Some("Limited sleep noted"),
        "Aim for 7-9 hours of sleep per night",
    ),
    Rule::lifestyle(
        |e| recorded_below(e.exercise_mins, 150),
        1,
        None,
        "Consider gentle exercise like walking or prenatal yoga",
    ),
    Rule::lifestyle(
        |e| recorded_below(e.water_cups, 6),
        1,
        Some("Low water intake"),
        "Aim for 8-10 glasses of water daily",
    ),
    Rule::lifestyle(
        |e| e.prenatal_vitamin == Some(false),
        1,
        None,
        "Consider taking prenatal vitamins as recommended by your provider",
    ),
];

/// Score one day of inputs
pub fn score(entry: &AnalyzerEntry) -> AnalyzerResult {
    let mut points = 0;
    let mut has_red_flag = false;
    let mut messages = Vec::new();
    let mut recommendations = Vec::new();

    for rule in RULES.iter().filter(|rule| (rule.applies)(entry)) {
        points += rule.points;
        has_red_flag |= rule.red_flag;
        if let Some(message) = rule.message {
            messages.push(message.to_string());
        }
        if let Some(recommendation) = rule.recommendation {
            recommendations.push(recommendation.to_string());
        }
    }

    let (level, banner) = if has_red_flag || points >= RED_FLAG_THRESHOLD {
        (RiskLevel::RedFlag, RED_FLAG_BANNER)
    } else if points >= HEADS_UP_THRESHOLD {
        (RiskLevel::HeadsUp, HEADS_UP_BANNER)
    } else {
        (RiskLevel::Ok, OK_BANNER)
    };
    messages.insert(0, banner.to_string());

    if level == RiskLevel::Ok {
        if is_true(entry.prenatal_vitamin) {
            recommendations.push("Great job taking your prenatal vitamins!".to_string());
        }
        if entry.water_cups.is_some_and(|cups| cups >= 8) {
            recommendations.push("Excellent hydration!".to_string());
        }
        if entry.exercise_mins.is_some_and(|mins| mins >= 150) {
            recommendations.push("Fantastic activity level!".to_string());
        }
    }

    messages.push(MEDICAL_DISCLAIMER.to_string());

    tracing::debug!(
        "Analyzed entry for {}: score {} -> {:?}",
        entry.date,
        points,
        level
    );

    AnalyzerResult {
        score: points,
        level,
        messages,
        recommendations,
    }
}

impl AnalyzerEntry {
    /// Attach a scoring result so later trend analysis can read it back
    pub fn with_result(mut self, result: &AnalyzerResult) -> Self {
        self.score = Some(result.score);
        self.level = Some(result.level);
        self.messages = Some(result.messages.clone());
        self
    }
}

/// Direction of the risk score over the trend window
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskTrend {
    Improving,
    Stable,
    Concerning,
}

impl RiskTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTrend::Improving => "improving",
            RiskTrend::Stable => "stable",
            RiskTrend::Concerning => "concerning",
        }
    }
}

/// Averages over the most recent week of analyzer entries
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrendSummary {
    pub avg_water: i32,
    /// Rounded to one decimal
    pub avg_sleep: f64,
    pub avg_exercise: i32,
    pub avg_caffeine: i32,
    pub risk_trend: RiskTrend,
}

impl Default for TrendSummary {
    fn default() -> Self {
        Self {
            avg_water: 0,
            avg_sleep: 0.0,
            avg_exercise: 0,
            avg_caffeine: 0,
            risk_trend: RiskTrend::Stable,
        }
    }
}

/// Summarize the seven most recent entries
///
/// Entries are ranked newest first and split by position: `newer` is the
/// first `len / 2` entries, `older` the rest. The trend reads "improving"
/// when the older half's mean stored score is more than one point below the
/// newer half's, and "concerning" in the opposite case. Unscored entries
/// count as zero.
pub fn trend_analysis(entries: &BTreeMap<NaiveDate, AnalyzerEntry>) -> TrendSummary {
    let mut recent: Vec<&AnalyzerEntry> = entries.values().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(TREND_WINDOW);

    if recent.is_empty() {
        return TrendSummary::default();
    }

    let avg_water = mean_of(&recent, |e| f64::from(e.water_cups.unwrap_or(0)));
    let avg_sleep = mean_of(&recent, |e| e.sleep_hours.unwrap_or(0.0));
    let avg_exercise = mean_of(&recent, |e| f64::from(e.exercise_mins.unwrap_or(0)));
    let avg_caffeine = mean_of(&recent, |e| f64::from(e.caffeine_mg.unwrap_or(0)));

    let (newer, older) = recent.split_at(recent.len() / 2);
    let risk_trend = match (mean_score(older), mean_score(newer)) {
        (Some(older), Some(newer)) if older < newer - 1.0 => RiskTrend::Improving,
        (Some(older), Some(newer)) if older > newer + 1.0 => RiskTrend::Concerning,
        _ => RiskTrend::Stable,
    };

    TrendSummary {
        avg_water: avg_water.round() as i32,
        avg_sleep: (avg_sleep * 10.0).round() / 10.0,
        avg_exercise: avg_exercise.round() as i32,
        avg_caffeine: avg_caffeine.round() as i32,
        risk_trend,
    }
}

fn mean_of(entries: &[&AnalyzerEntry], field: fn(&AnalyzerEntry) -> f64) -> f64 {
    entries.iter().map(|e| field(e)).sum::<f64>() / entries.len() as f64
}

fn mean_score(entries: &[&AnalyzerEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| e.score.unwrap_or(0)).sum();
    Some(f64::from(total) / entries.len() as f64)
}
