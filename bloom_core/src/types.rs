//! Core domain types for Bloom.
//!
//! This module defines the persisted application state and the value
//! records the calculators consume:
//! - User profile, settings and API keys
//! - Daily logs (symptoms, analyzer entries, period starts)
//! - Notes and appointments
//!
//! JSON field names are camelCase so state exported by earlier versions
//! of the app loads unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Current version of the persisted state layout
pub const STATE_VERSION: u32 = 1;

/// Cycle length assumed when none is recorded
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;

// ============================================================================
// Analyzer Types
// ============================================================================

/// Three-level classification produced by the health analyzer
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Ok,
    HeadsUp,
    RedFlag,
}

impl RiskLevel {
    /// Short user-facing label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Ok => "All Good",
            RiskLevel::HeadsUp => "Heads Up",
            RiskLevel::RedFlag => "Attention Needed",
        }
    }

    /// Wire name (`ok`, `heads_up`, `red_flag`)
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Ok => "ok",
            RiskLevel::HeadsUp => "heads_up",
            RiskLevel::RedFlag => "red_flag",
        }
    }
}

/// One day of lifestyle and symptom inputs for the health analyzer
///
/// Every input is optional; an unset numeric field is "not recorded" and
/// never triggers a rule. Counts are signed so out-of-range values from
/// imported state still load and are scored as given. `score`, `level` and `messages` hold the last
/// evaluation once the entry has been analyzed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerEntry {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_cups: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caffeine_mg: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol_drinks: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_mins: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prenatal_vitamin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bleeding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fever: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severe_pain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headaches_vision: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swelling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl AnalyzerEntry {
    /// An entry for `date` with nothing recorded yet
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            water_cups: None,
            caffeine_mg: None,
            alcohol_drinks: None,
            smoked: None,
            sleep_hours: None,
            exercise_mins: None,
            prenatal_vitamin: None,
            bleeding: None,
            fever: None,
            severe_pain: None,
            headaches_vision: None,
            swelling: None,
            score: None,
            level: None,
            messages: None,
        }
    }
}

// ============================================================================
// Profile and Settings
// ============================================================================

/// The person using the app
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_pregnant: bool,
    /// Last menstrual period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    /// Estimated due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edd: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_length: Option<i64>,
    #[serde(default)]
    pub premium_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_subscription: Option<bool>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            is_pregnant: false,
            lmp: None,
            edd: None,
            cycle_length: Some(DEFAULT_CYCLE_LENGTH),
            premium_active: false,
            email_subscription: Some(false),
        }
    }
}

/// Partial profile update; `None` leaves the stored value untouched
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_pregnant: Option<bool>,
    pub lmp: Option<NaiveDate>,
    pub edd: Option<NaiveDate>,
    pub cycle_length: Option<i64>,
    pub premium_active: Option<bool>,
    pub email_subscription: Option<bool>,
}

/// Third-party credentials the user may paste into their profile
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapbox_token: Option<String>,
}

/// Measurement system for display
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// Colour theme preference
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub theme: Theme,
}

// ============================================================================
// Logs
// ============================================================================

/// A free-form journal note
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub date: NaiveDate,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

/// Partial note update; `None` leaves the stored value untouched
#[derive(Clone, Debug, Default)]
pub struct NoteUpdate {
    pub date: Option<NaiveDate>,
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Logs {
    #[serde(default)]
    pub symptoms_by_date: BTreeMap<NaiveDate, Vec<String>>,
    #[serde(default)]
    pub analyzer_by_date: BTreeMap<NaiveDate, AnalyzerEntry>,
    /// Dates on which a period started
    #[serde(default)]
    pub period_logs: Vec<NaiveDate>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

// ============================================================================
// Application State
// ============================================================================

/// Everything Bloom persists for one user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Layout version; anything below [`STATE_VERSION`] is discarded on load
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub user: UserProfile,
    #[serde(default)]
    pub keys: ApiKeys,
    #[serde(default)]
    pub logs: Logs,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            user: UserProfile::default(),
            keys: ApiKeys::default(),
            logs: Logs::default(),
            settings: Settings::default(),
        }
    }
}
