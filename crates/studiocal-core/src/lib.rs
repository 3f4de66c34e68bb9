//! Core domain vocabulary and configuration for the studiocal client.
//!
//! Holds the canonical occupancy-status vocabulary shared by every consumer of
//! the booking calendar, plus env-var driven application configuration.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod status;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use status::{normalize_status, CanonicalStatus, StatusFallback};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
