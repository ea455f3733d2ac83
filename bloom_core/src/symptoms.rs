//! Built-in symptom suggestions offered when logging a day.

/// Common symptoms offered while tracking a pregnancy
pub const PREGNANCY_SYMPTOMS: [&str; 12] = [
    "Nausea",
    "Fatigue",
    "Breast Tenderness",
    "Cravings",
    "Mood Swings",
    "Headaches",
    "Back Pain",
    "Heartburn",
    "Frequent Urination",
    "Constipation",
    "Leg Cramps",
    "Insomnia",
];

/// Common symptoms offered while tracking a cycle
pub const PERIOD_SYMPTOMS: [&str; 11] = [
    "Cramps",
    "Bloating",
    "Mood Changes",
    "Fatigue",
    "Headaches",
    "Acne",
    "Breast Tenderness",
    "Back Pain",
    "Food Cravings",
    "Irritability",
    "Sleep Issues",
];

/// Suggestion list for the current tracking mode.
///
/// Suggestions are only a starting point; any free-text symptom can be logged.
pub fn suggested_symptoms(is_pregnant: bool) -> &'static [&'static str] {
    if is_pregnant {
        &PREGNANCY_SYMPTOMS
    } else {
        &PERIOD_SYMPTOMS
    }
}
