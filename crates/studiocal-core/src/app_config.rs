use crate::status::StatusFallback;

/// Application configuration for the studiocal client, loaded from env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the booking backend, including the API prefix.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Fallback applied by the store when a status token is unrecognized.
    pub unknown_status_fallback: StatusFallback,
}
