#![forbid(unsafe_code)]

//! Core domain model and business logic for Bloom, a pregnancy and
//! menstrual-cycle tracker.
//!
//! This crate provides:
//! - Domain types (profile, daily logs, analyzer entries)
//! - Gestation and cycle calculators
//! - Rules-based health analyzer and weekly trends
//! - Weekly tips library and symptom suggestions
//! - Persistence (state repository, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod pregnancy;
pub mod cycle;
pub mod analyzer;
pub mod tips;
pub mod symptoms;
pub mod state;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use pregnancy::{compute_gestation, PregnancyResult, Trimester};
pub use cycle::{compute_cycle, CycleResult};
pub use analyzer::{score, trend_analysis, AnalyzerResult, RiskTrend, TrendSummary};
pub use state::{JsonFileStore, MemoryStore, StateRepository};
pub use symptoms::suggested_symptoms;
pub use export::export_analyzer_csv;
