//! Shared domain model, health-advice rules, and configuration for PollenPal.

pub mod advice;
pub mod app_config;
pub mod config;
pub mod detail;
pub mod types;

use thiserror::Error;

pub use advice::{advise, title_case, AdviceReport, AlertLevel, GENERAL_TIPS, NO_DATA_ADVICE};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use detail::{non_zero_entries, parse_detail, DetailEntry};
pub use types::{
    BreakdownEntry, Category, CategoryLevel, Coordinates, DayEntry, DetailedBreakdown, PollenRecord,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
