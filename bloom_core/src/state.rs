//! Application state persistence with file locking.
//!
//! The calculators never touch storage. Callers inject a
//! [`StateRepository`] and move [`AppState`] records in and out of it:
//! - [`JsonFileStore`] keeps the record in a JSON file, read under a shared
//!   lock and replaced atomically on save
//! - [`MemoryStore`] keeps it in process for tests and embedding

use crate::analyzer::{self, AnalyzerResult};
use crate::cycle::{compute_cycle, CycleResult};
use crate::pregnancy::{compute_gestation, PregnancyResult};
use crate::{
    AnalyzerEntry, ApiKeys, AppState, Appointment, Error, Note, NoteUpdate, Result, Settings,
    UserUpdate, STATE_VERSION,
};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Somewhere an [`AppState`] can be loaded from and saved to
pub trait StateRepository {
    /// Current state, or a fresh default when nothing usable is stored
    fn load(&self) -> Result<AppState>;

    fn save(&self, state: &AppState) -> Result<()>;

    /// Forget everything (data reset / account deletion)
    fn clear(&self) -> Result<()>;

    /// Load state, modify it, and save it back
    fn update<F>(&self, f: F) -> Result<AppState>
    where
        Self: Sized,
        F: FnOnce(&mut AppState) -> Result<()>,
    {
        let mut state = self.load()?;
        f(&mut state)?;
        self.save(&state)?;
        Ok(state)
    }
}

/// Older or unversioned layouts are not migrated, they start over
fn migrate_if_needed(state: AppState) -> AppState {
    if state.version < STATE_VERSION {
        tracing::warn!(
            "Discarding state with version {} (current {})",
            state.version,
            STATE_VERSION
        );
        return AppState::default();
    }
    state
}

// ============================================================================
// JSON File Store
// ============================================================================

/// JSON file-backed repository
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for JsonFileStore {
    /// Returns default state if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns
    /// default state.
    fn load(&self) -> Result<AppState> {
        let path = self.path.as_path();
        if !path.exists() {
            tracing::info!("No state file found, using default state");
            return Ok(AppState::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open state file {:?}: {}. Using defaults.", path, e);
                return Ok(AppState::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock state file {:?}: {}. Using defaults.", path, e);
            return Ok(AppState::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read state file {:?}: {}. Using defaults.", path, e);
            return Ok(AppState::default());
        }

        file.unlock()?;

        match serde_json::from_str::<AppState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded app state from {:?}", path);
                Ok(migrate_if_needed(state))
            }
            Err(e) => {
                tracing::warn!("Failed to parse state file {:?}: {}. Using defaults.", path, e);
                Ok(AppState::default())
            }
        }
    }

    /// Atomically writes state through a locked temp file in the same
    /// directory, synced before it is renamed over the original.
    fn save(&self, state: &AppState) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::State(format!("state path {:?} has no parent", self.path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(state)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved app state to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Removed state file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// Process-local repository
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<AppState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<AppState>>> {
        self.state
            .lock()
            .map_err(|_| Error::State("memory store lock poisoned".into()))
    }
}

impl StateRepository for MemoryStore {
    fn load(&self) -> Result<AppState> {
        Ok(self
            .slot()?
            .clone()
            .map(migrate_if_needed)
            .unwrap_or_default())
    }

    fn save(&self, state: &AppState) -> Result<()> {
        *self.slot()? = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

// ============================================================================
// State Helpers
// ============================================================================

/// Loose shape check: `local@domain.tld`, no whitespace, a single `@`
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

impl AppState {
    /// Merge a partial profile update
    pub fn update_user(&mut self, update: UserUpdate) {
        let user = &mut self.user;
        if let Some(name) = update.name {
            user.name = Some(name);
        }
        if let Some(email) = update.email {
            user.email = Some(email);
        }
        if let Some(is_pregnant) = update.is_pregnant {
            user.is_pregnant = is_pregnant;
        }
        // A pregnancy is dated from one reference date; setting either
        // clears the other
        if let Some(lmp) = update.lmp {
            user.lmp = Some(lmp);
            user.edd = None;
        }
        if let Some(edd) = update.edd {
            user.edd = Some(edd);
            user.lmp = None;
        }
        if let Some(cycle_length) = update.cycle_length {
            user.cycle_length = Some(cycle_length);
        }
        if let Some(premium_active) = update.premium_active {
            user.premium_active = premium_active;
        }
        if let Some(email_subscription) = update.email_subscription {
            user.email_subscription = Some(email_subscription);
        }
    }

    pub fn enable_premium(&mut self) {
        self.user.premium_active = true;
    }

    pub fn disable_premium(&mut self) {
        self.user.premium_active = false;
    }

    /// Replace only the keys that are set in `keys`
    pub fn update_api_keys(&mut self, keys: ApiKeys) {
        if keys.openai_api_key.is_some() {
            self.keys.openai_api_key = keys.openai_api_key;
        }
        if keys.mapbox_token.is_some() {
            self.keys.mapbox_token = keys.mapbox_token;
        }
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Score an entry and file it under its date, replacing that day's entry
    pub fn record_analysis(&mut self, entry: AnalyzerEntry) -> AnalyzerResult {
        let result = analyzer::score(&entry);
        let entry = entry.with_result(&result);
        self.logs.analyzer_by_date.insert(entry.date, entry);
        result
    }

    /// Store a note and return its generated id
    pub fn add_note(
        &mut self,
        date: NaiveDate,
        text: impl Into<String>,
        tags: Option<Vec<String>>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.logs.notes.push(Note {
            id,
            date,
            text: text.into(),
            tags,
            pinned: None,
        });
        id
    }

    pub fn update_note(&mut self, id: Uuid, update: NoteUpdate) -> Result<()> {
        let note = self
            .logs
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| Error::NotFound(format!("note {}", id)))?;

        if let Some(date) = update.date {
            note.date = date;
        }
        if let Some(text) = update.text {
            note.text = text;
        }
        if let Some(tags) = update.tags {
            note.tags = Some(tags);
        }
        if let Some(pinned) = update.pinned {
            note.pinned = Some(pinned);
        }
        Ok(())
    }

    pub fn delete_note(&mut self, id: Uuid) -> Result<()> {
        let before = self.logs.notes.len();
        self.logs.notes.retain(|note| note.id != id);
        if self.logs.notes.len() == before {
            return Err(Error::NotFound(format!("note {}", id)));
        }
        Ok(())
    }

    /// Store an appointment and return its generated id
    pub fn add_appointment(
        &mut self,
        title: impl Into<String>,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.logs.appointments.push(Appointment {
            id,
            title: title.into(),
            date,
            notes,
        });
        id
    }

    /// Replace the symptom list for `date`
    pub fn save_symptoms(&mut self, date: NaiveDate, symptoms: Vec<String>) {
        self.logs.symptoms_by_date.insert(date, symptoms);
    }

    /// Logged symptoms, newest day first
    pub fn symptom_history(&self) -> Vec<(NaiveDate, &[String])> {
        self.logs
            .symptoms_by_date
            .iter()
            .rev()
            .map(|(date, symptoms)| (*date, symptoms.as_slice()))
            .collect()
    }

    /// Record a period start; also becomes the LMP when newer than the stored one
    pub fn log_period_start(&mut self, date: NaiveDate) {
        if let Err(idx) = self.logs.period_logs.binary_search(&date) {
            self.logs.period_logs.insert(idx, date);
        }
        if self.user.lmp.map_or(true, |lmp| date > lmp) {
            self.user.lmp = Some(date);
        }
    }

    /// Cycle length from the profile, falling back to `default`
    pub fn cycle_length_or(&self, default: i64) -> i64 {
        self.user.cycle_length.unwrap_or(default)
    }

    /// Gestational age for the stored profile
    ///
    /// `default_cycle_length` applies when the profile has none recorded.
    pub fn pregnancy(
        &self,
        today: NaiveDate,
        default_cycle_length: i64,
    ) -> Option<PregnancyResult> {
        compute_gestation(
            self.user.lmp,
            self.user.edd,
            self.cycle_length_or(default_cycle_length),
            today,
        )
    }

    /// Cycle estimates for the stored profile
    pub fn cycle(&self, today: NaiveDate, default_cycle_length: i64) -> CycleResult {
        compute_cycle(
            self.user.lmp,
            self.cycle_length_or(default_cycle_length),
            today,
        )
    }
}
