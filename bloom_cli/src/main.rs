use bloom_core::pregnancy::{self, days_until_due, format_due_date, week_display_text};
use bloom_core::state::is_valid_email;
use bloom_core::*;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bloom")]
#[command(about = "Pregnancy and cycle tracker with a daily health check-in", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true, hide = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up or change your profile
    Onboard {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Track a pregnancy instead of a cycle
        #[arg(long, conflicts_with = "not_pregnant")]
        pregnant: bool,

        /// Switch back to cycle tracking
        #[arg(long)]
        not_pregnant: bool,

        /// First day of the last menstrual period
        #[arg(long)]
        lmp: Option<NaiveDate>,

        /// Estimated due date
        #[arg(long)]
        edd: Option<NaiveDate>,

        /// Average cycle length in days
        #[arg(long)]
        cycle_length: Option<i64>,
    },

    /// Show the dashboard (default)
    Status,

    /// Run the daily health check-in
    Analyze(AnalyzeArgs),

    /// Weekly averages and risk trend
    Trends,

    /// Log or review symptoms
    Symptoms {
        #[command(subcommand)]
        action: SymptomsAction,
    },

    /// Record the start of a period
    Period {
        /// Start date (defaults to today)
        date: Option<NaiveDate>,
    },

    /// Show tips for a pregnancy week, or general tips
    Tips {
        #[arg(long)]
        week: Option<u32>,
    },

    /// Journal notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Prenatal appointments
    Appointment {
        #[command(subcommand)]
        action: AppointmentAction,
    },

    /// Turn premium features on or off
    Premium {
        #[arg(value_enum)]
        action: Toggle,
    },

    /// Display preferences
    Settings {
        #[arg(long, value_enum)]
        units: Option<UnitsArg>,

        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Export the analyzer log as CSV
    Export {
        path: PathBuf,
    },

    /// Delete all stored data
    Reset,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Day being logged (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, allow_negative_numbers = true)]
    water_cups: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    caffeine_mg: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    alcohol_drinks: Option<i32>,

    #[arg(long)]
    sleep_hours: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    exercise_mins: Option<i32>,

    #[arg(long)]
    smoked: bool,

    /// Took a prenatal vitamin today
    #[arg(long, conflicts_with = "no_vitamin")]
    vitamin: bool,

    /// Skipped the prenatal vitamin today
    #[arg(long)]
    no_vitamin: bool,

    #[arg(long)]
    bleeding: bool,

    #[arg(long)]
    fever: bool,

    #[arg(long)]
    severe_pain: bool,

    /// Severe headaches or vision changes
    #[arg(long)]
    headaches_vision: bool,

    #[arg(long)]
    swelling: bool,

    /// Show the result without storing the entry
    #[arg(long)]
    no_save: bool,
}

impl AnalyzeArgs {
    fn to_entry(&self, today: NaiveDate) -> AnalyzerEntry {
        let prenatal_vitamin = match (self.vitamin, self.no_vitamin) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        AnalyzerEntry {
            water_cups: self.water_cups,
            caffeine_mg: self.caffeine_mg,
            alcohol_drinks: self.alcohol_drinks,
            smoked: Some(self.smoked),
            sleep_hours: self.sleep_hours,
            exercise_mins: self.exercise_mins,
            prenatal_vitamin,
            bleeding: Some(self.bleeding),
            fever: Some(self.fever),
            severe_pain: Some(self.severe_pain),
            headaches_vision: Some(self.headaches_vision),
            swelling: Some(self.swelling),
            ..AnalyzerEntry::new(self.date.unwrap_or(today))
        }
    }
}

#[derive(Subcommand)]
enum SymptomsAction {
    /// Replace the symptom list for a day
    Log {
        #[arg(required = true)]
        symptoms: Vec<String>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List logged symptoms, newest first
    History,
    /// Show common symptoms for the current tracking mode
    Suggest,
}

#[derive(Subcommand)]
enum NoteAction {
    Add {
        text: String,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    List,
    Pin {
        id: uuid::Uuid,

        /// Unpin instead
        #[arg(long)]
        off: bool,
    },
    Delete {
        id: uuid::Uuid,
    },
}

#[derive(Subcommand)]
enum AppointmentAction {
    Add {
        title: String,

        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        notes: Option<String>,
    },
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    Enable,
    Disable,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    Metric,
    Imperial,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
    System,
}

fn main() -> Result<()> {
    bloom_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = JsonFileStore::new(data_dir.join(bloom_core::config::STATE_FILE_NAME));
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Some(Commands::Onboard {
            name,
            email,
            pregnant,
            not_pregnant,
            lmp,
            edd,
            cycle_length,
        }) => {
            let is_pregnant = match (pregnant, not_pregnant) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let update = UserUpdate {
                name,
                email,
                is_pregnant,
                lmp,
                edd,
                cycle_length,
                ..Default::default()
            };
            cmd_onboard(&store, update, today, &config)
        }
        Some(Commands::Status) | None => cmd_status(&store, today, &config),
        Some(Commands::Analyze(args)) => cmd_analyze(&store, &args, today),
        Some(Commands::Trends) => cmd_trends(&store),
        Some(Commands::Symptoms { action }) => cmd_symptoms(&store, action, today),
        Some(Commands::Period { date }) => cmd_period(&store, date.unwrap_or(today), today, &config),
        Some(Commands::Tips { week }) => cmd_tips(&store, week, today, &config),
        Some(Commands::Note { action }) => cmd_note(&store, action, today),
        Some(Commands::Appointment { action }) => cmd_appointment(&store, action, today),
        Some(Commands::Premium { action }) => cmd_premium(&store, action),
        Some(Commands::Settings { units, theme }) => cmd_settings(&store, units, theme),
        Some(Commands::Export { path }) => cmd_export(&store, &path),
        Some(Commands::Reset) => cmd_reset(&store),
    }
}

fn cmd_onboard(
    store: &JsonFileStore,
    update: UserUpdate,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    if let Some(ref email) = update.email {
        if !is_valid_email(email) {
            return Err(Error::InvalidInput(format!("not an email address: {}", email)));
        }
    }
    if let Some(cycle_length) = update.cycle_length {
        if cycle_length <= 0 {
            return Err(Error::InvalidInput(format!(
                "cycle length must be positive, got {}",
                cycle_length
            )));
        }
    }

    let state = store.update(|state| {
        state.update_user(update);
        Ok(())
    })?;

    println!("✓ Profile saved");
    if state.user.is_pregnant && state.user.lmp.is_none() && state.user.edd.is_none() {
        println!("  Add --lmp or --edd to see your pregnancy progress.");
    }
    println!();
    print_dashboard(&state, today, config);
    Ok(())
}

fn cmd_status(store: &JsonFileStore, today: NaiveDate, config: &Config) -> Result<()> {
    let state = store.load()?;
    print_dashboard(&state, today, config);
    Ok(())
}

fn print_dashboard(state: &AppState, today: NaiveDate, config: &Config) {
    let user = &state.user;
    match user.name {
        Some(ref name) => println!("Hello, {}!", name),
        None => println!("Hello there!"),
    }
    println!();

    let default_cycle_length = config.tracking.default_cycle_length;
    let pregnancy_data = if user.is_pregnant {
        state.pregnancy(today, default_cycle_length)
    } else {
        None
    };

    let tips: Vec<&str> = if let Some(ref pregnancy) = pregnancy_data {
        print_pregnancy(pregnancy, today);
        tips::tips_for_week(pregnancy.gestational_weeks)
    } else {
        if user.is_pregnant {
            println!("No pregnancy dates recorded yet. Run `bloom onboard --lmp` or `--edd`.");
        } else if user.lmp.is_some() {
            print_cycle(&state.cycle(today, default_cycle_length), today);
        } else {
            println!("No period logged yet. Run `bloom period` on the first day of your period.");
        }
        tips::general_tips().to_vec()
    };

    println!();
    println!("Tips:");
    for tip in tips {
        println!("  • {}", tip);
    }

    if user.premium_active {
        println!();
        println!("★ Premium active");
    }
}

fn print_pregnancy(pregnancy: &PregnancyResult, today: NaiveDate) {
    let fruit = pregnancy::fruit_for_week(pregnancy.gestational_weeks);

    println!("╭─────────────────────────────────────────╮");
    println!("│  {}", week_display_text(pregnancy));
    println!("╰─────────────────────────────────────────╯");
    println!("  {}", pregnancy.trimester.label());
    println!(
        "  Due: {} ({} days to go)",
        format_due_date(pregnancy.due_date),
        days_until_due(pregnancy.due_date, today)
    );
    println!("  Progress: {:.0}%", pregnancy.progress_percent);
    println!("  Size: {} - {}", fruit.name, fruit.description);
}

fn print_cycle(cycle: &CycleResult, today: NaiveDate) {
    println!("╭─────────────────────────────────────────╮");
    println!("│  Cycle progress: {:.0}%", cycle.cycle_progress);
    println!("╰─────────────────────────────────────────╯");
    if let (Some(next), Some(days)) = (cycle.next_period, cycle.days_until_next_period) {
        println!("  Next period: {} (in {} days)", next, days);
    }
    if let (Some(start), Some(end)) = (cycle.fertile_window_start, cycle.fertile_window_end) {
        println!("  Fertile window: {} to {}", start, end);
    }
    if cycle.in_fertile_window(today) {
        println!("  You are in your fertile window");
    }
}

fn cmd_analyze(store: &JsonFileStore, args: &AnalyzeArgs, today: NaiveDate) -> Result<()> {
    let entry = args.to_entry(today);

    let result = if args.no_save {
        score(&entry)
    } else {
        let mut result = None;
        store.update(|state| {
            result = Some(state.record_analysis(entry));
            Ok(())
        })?;
        result.ok_or_else(|| Error::State("analysis was not recorded".into()))?
    };

    println!("{} (score {})", result.level.label(), result.score);
    println!();
    for message in &result.messages {
        println!("  {}", message);
    }
    if !result.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for recommendation in &result.recommendations {
            println!("  → {}", recommendation);
        }
    }
    Ok(())
}

fn cmd_trends(store: &JsonFileStore) -> Result<()> {
    let state = store.load()?;
    let summary = trend_analysis(&state.logs.analyzer_by_date);

    println!("Last 7 check-ins:");
    println!("  Water:    {} cups", summary.avg_water);
    println!("  Sleep:    {} hours", summary.avg_sleep);
    println!("  Exercise: {} min", summary.avg_exercise);
    println!("  Caffeine: {} mg", summary.avg_caffeine);
    println!("  Risk trend: {}", summary.risk_trend.as_str());
    Ok(())
}

fn cmd_symptoms(store: &JsonFileStore, action: SymptomsAction, today: NaiveDate) -> Result<()> {
    match action {
        SymptomsAction::Log { symptoms, date } => {
            let date = date.unwrap_or(today);
            let count = symptoms.len();
            store.update(|state| {
                state.save_symptoms(date, symptoms);
                Ok(())
            })?;
            println!("✓ Logged {} symptoms for {}", count, date);
        }
        SymptomsAction::Suggest => {
            let state = store.load()?;
            let suggestions = suggested_symptoms(state.user.is_pregnant);
            let mode = if state.user.is_pregnant { "Pregnancy" } else { "Period" };
            println!("{} symptoms:", mode);
            for symptom in suggestions {
                println!("  {}", symptom);
            }
        }
        SymptomsAction::History => {
            let state = store.load()?;
            let history = state.symptom_history();
            if history.is_empty() {
                println!("No symptoms logged yet.");
            }
            for (date, symptoms) in history {
                println!("{}: {}", date, symptoms.join(", "));
            }
        }
    }
    Ok(())
}

fn cmd_period(
    store: &JsonFileStore,
    date: NaiveDate,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    let state = store.update(|state| {
        state.log_period_start(date);
        Ok(())
    })?;

    println!("✓ Period start logged for {}", date);
    if !state.user.is_pregnant {
        let cycle = state.cycle(today, config.tracking.default_cycle_length);
        print_cycle(&cycle, today);
    }
    Ok(())
}

fn cmd_tips(
    store: &JsonFileStore,
    week: Option<u32>,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    let week = match week {
        Some(week) => Some(week),
        None => {
            let state = store.load()?;
            if state.user.is_pregnant {
                state
                    .pregnancy(today, config.tracking.default_cycle_length)
                    .map(|p| p.gestational_weeks)
            } else {
                None
            }
        }
    };

    match week {
        Some(week) => {
            println!("Week {} tips:", week);
            for tip in tips::tips_for_week(week) {
                println!("  • {}", tip);
            }
        }
        None => {
            println!("General tips:");
            for tip in tips::general_tips() {
                println!("  • {}", tip);
            }
        }
    }
    Ok(())
}

fn cmd_note(store: &JsonFileStore, action: NoteAction, today: NaiveDate) -> Result<()> {
    match action {
        NoteAction::Add { text, date, tags } => {
            let tags = if tags.is_empty() { None } else { Some(tags) };
            let mut id = None;
            store.update(|state| {
                id = Some(state.add_note(date.unwrap_or(today), text, tags));
                Ok(())
            })?;
            if let Some(id) = id {
                println!("✓ Note added ({})", id);
            }
        }
        NoteAction::List => {
            let state = store.load()?;
            let mut notes: Vec<&Note> = state.logs.notes.iter().collect();
            // Pinned first, then newest
            notes.sort_by_key(|n| (!n.pinned.unwrap_or(false), std::cmp::Reverse(n.date)));
            if notes.is_empty() {
                println!("No notes yet.");
            }
            for note in notes {
                let pin = if note.pinned.unwrap_or(false) { "★ " } else { "" };
                println!("{}{}  {}  [{}]", pin, note.date, note.text, note.id);
                if let Some(ref tags) = note.tags {
                    println!("    tags: {}", tags.join(", "));
                }
            }
        }
        NoteAction::Pin { id, off } => {
            store.update(|state| {
                state.update_note(
                    id,
                    NoteUpdate {
                        pinned: Some(!off),
                        ..Default::default()
                    },
                )
            })?;
            println!("✓ Note {}", if off { "unpinned" } else { "pinned" });
        }
        NoteAction::Delete { id } => {
            store.update(|state| state.delete_note(id))?;
            println!("✓ Note deleted");
        }
    }
    Ok(())
}

fn cmd_appointment(
    store: &JsonFileStore,
    action: AppointmentAction,
    today: NaiveDate,
) -> Result<()> {
    match action {
        AppointmentAction::Add { title, date, notes } => {
            store.update(|state| {
                state.add_appointment(title, date, notes);
                Ok(())
            })?;
            println!("✓ Appointment added for {}", date);
        }
        AppointmentAction::List => {
            let state = store.load()?;
            let mut appointments: Vec<&Appointment> = state.logs.appointments.iter().collect();
            appointments.sort_by_key(|a| a.date);
            if appointments.is_empty() {
                println!("No appointments yet.");
            }
            for appointment in appointments {
                let marker = if appointment.date < today { " (past)" } else { "" };
                println!("{}  {}{}", appointment.date, appointment.title, marker);
                if let Some(ref notes) = appointment.notes {
                    println!("    {}", notes);
                }
            }
        }
    }
    Ok(())
}

fn cmd_premium(store: &JsonFileStore, action: Toggle) -> Result<()> {
    store.update(|state| {
        match action {
            Toggle::Enable => state.enable_premium(),
            Toggle::Disable => state.disable_premium(),
        }
        Ok(())
    })?;
    match action {
        Toggle::Enable => println!("✓ Premium enabled"),
        Toggle::Disable => println!("✓ Premium disabled"),
    }
    Ok(())
}

fn cmd_settings(
    store: &JsonFileStore,
    units: Option<UnitsArg>,
    theme: Option<ThemeArg>,
) -> Result<()> {
    let state = store.update(|state| {
        let mut settings = state.settings.clone();
        if let Some(units) = units {
            settings.units = match units {
                UnitsArg::Metric => Units::Metric,
                UnitsArg::Imperial => Units::Imperial,
            };
        }
        if let Some(theme) = theme {
            settings.theme = match theme {
                ThemeArg::Light => Theme::Light,
                ThemeArg::Dark => Theme::Dark,
                ThemeArg::System => Theme::System,
            };
        }
        state.update_settings(settings);
        Ok(())
    })?;

    println!("Units: {:?}", state.settings.units);
    println!("Theme: {:?}", state.settings.theme);
    Ok(())
}

fn cmd_export(store: &JsonFileStore, path: &std::path::Path) -> Result<()> {
    let state = store.load()?;
    let count = export_analyzer_csv(&state, path)?;
    println!("✓ Exported {} check-ins", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn cmd_reset(store: &JsonFileStore) -> Result<()> {
    store.clear()?;
    println!("✓ All data deleted");
    Ok(())
}
