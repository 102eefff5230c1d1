use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    // Empty strings are treated as unset so a blank `.env` line does not
    // produce an empty bearer token.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let api_url = or_default("PHONESTORE_API_URL", "http://localhost:3000/api");
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "PHONESTORE_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_url}\""),
        });
    }

    let env = parse_environment(&or_default("PHONESTORE_ENV", "development"))?;
    let log_level = or_default("PHONESTORE_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "PHONESTORE_CATALOG_PATH",
        "./config/catalog.yaml",
    ));
    let request_timeout_secs = parse_u64("PHONESTORE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PHONESTORE_USER_AGENT", "phonestore/0.1 (storefront-client)");
    let search_debounce_ms = parse_u64("PHONESTORE_SEARCH_DEBOUNCE_MS", "1000")?;

    Ok(AppConfig {
        api_url,
        env,
        log_level,
        catalog_path,
        request_timeout_secs,
        user_agent,
        search_debounce_ms,
        token: optional("PHONESTORE_TOKEN"),
        admin_token: optional("PHONESTORE_ADMIN_TOKEN"),
        user_id: optional("PHONESTORE_USER_ID"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PHONESTORE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
