use crate::app_config::AppConfig;
use crate::status::StatusFallback;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_fallback = |var: &str, default: &str| -> Result<StatusFallback, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "free" => Ok(StatusFallback::Free),
            "booked" => Ok(StatusFallback::Booked),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected 'free' or 'booked', got '{other}'"),
            }),
        }
    };

    let base_url = or_default("STUDIOCAL_BASE_URL", "http://localhost:3000/api");
    let request_timeout_secs = parse_u64("STUDIOCAL_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STUDIOCAL_USER_AGENT", "studiocal/0.1 (booking-calendar)");
    let log_level = or_default("STUDIOCAL_LOG_LEVEL", "info");
    let unknown_status_fallback = parse_fallback("STUDIOCAL_UNKNOWN_STATUS", "booked")?;

    Ok(AppConfig {
        base_url,
        request_timeout_secs,
        user_agent,
        log_level,
        unknown_status_fallback,
    })
}
