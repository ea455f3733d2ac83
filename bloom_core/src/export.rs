//! CSV export of the analyzer log.
//!
//! The CSV is written to a temp file next to the destination, synced, and
//! renamed into place so a failed export never leaves a half-written file.

use crate::{AnalyzerEntry, AppState, Error, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    water_cups: Option<i32>,
    caffeine_mg: Option<i32>,
    alcohol_drinks: Option<i32>,
    smoked: Option<bool>,
    sleep_hours: Option<f64>,
    exercise_mins: Option<i32>,
    prenatal_vitamin: Option<bool>,
    bleeding: Option<bool>,
    fever: Option<bool>,
    severe_pain: Option<bool>,
    headaches_vision: Option<bool>,
    swelling: Option<bool>,
    score: Option<u32>,
    level: Option<&'static str>,
}

impl From<&AnalyzerEntry> for CsvRow {
    fn from(entry: &AnalyzerEntry) -> Self {
        CsvRow {
            date: entry.date.to_string(),
            water_cups: entry.water_cups,
            caffeine_mg: entry.caffeine_mg,
            alcohol_drinks: entry.alcohol_drinks,
            smoked: entry.smoked,
            sleep_hours: entry.sleep_hours,
            exercise_mins: entry.exercise_mins,
            prenatal_vitamin: entry.prenatal_vitamin,
            bleeding: entry.bleeding,
            fever: entry.fever,
            severe_pain: entry.severe_pain,
            headaches_vision: entry.headaches_vision,
            swelling: entry.swelling,
            score: entry.score,
            level: entry.level.map(|level| level.as_str()),
        }
    }
}

/// Write every analyzer entry, oldest first, to `csv_path`
///
/// Returns the number of rows written. An existing file is replaced.
pub fn export_analyzer_csv(state: &AppState, csv_path: &Path) -> Result<usize> {
    let parent = match csv_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    let mut writer = csv::Writer::from_writer(temp.as_file());

    let mut count = 0;
    for entry in state.logs.analyzer_by_date.values() {
        writer.serialize(CsvRow::from(entry))?;
        count += 1;
    }

    writer.flush()?;
    drop(writer);
    temp.as_file().sync_all()?;
    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} analyzer entries to {:?}", count, csv_path);
    Ok(count)
}
