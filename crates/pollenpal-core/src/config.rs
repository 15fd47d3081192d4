use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_SOURCE_URL: &str =
    "https://www.kleenex.co.uk/api/sitecore/Pollen/GetPollenContentCountryCity";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("POLLENPAL_ENV", "development"))?;

    let bind_addr = or_default("POLLENPAL_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("POLLENPAL_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("POLLENPAL_LOG_LEVEL", "info");

    let source_url = or_default("POLLENPAL_SOURCE_URL", DEFAULT_SOURCE_URL);
    if !source_url.starts_with("http://") && !source_url.starts_with("https://") {
        return Err(invalid(
            "POLLENPAL_SOURCE_URL",
            format!("expected an http(s) URL, got \"{source_url}\""),
        ));
    }

    let default_country = or_default("POLLENPAL_COUNTRY", "UK");
    if default_country.trim().is_empty() {
        return Err(invalid("POLLENPAL_COUNTRY", "must not be empty".to_string()));
    }

    let request_timeout_secs = parse_u64("POLLENPAL_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("POLLENPAL_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("POLLENPAL_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("POLLENPAL_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        source_url,
        default_country,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POLLENPAL_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
