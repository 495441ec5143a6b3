use crate::app_config::{AppConfig, Environment, FetchOrdering};
use crate::ConfigError;

/// Default base URL of the remote catalog.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

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
/// Every variable has a default, so an empty environment yields a working
/// configuration pointed at the public Fake Store API.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("MAISON_ENV", "development"));
    let log_level = or_default("MAISON_LOG_LEVEL", "info");

    let catalog_base_url = or_default("MAISON_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL);
    if !(catalog_base_url.starts_with("http://") || catalog_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAISON_CATALOG_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{catalog_base_url}\""),
        });
    }

    let request_timeout_secs = parse_u64("MAISON_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MAISON_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let user_agent = or_default("MAISON_USER_AGENT", "maison/0.1 (storefront-engine)");
    let fetch_ordering = parse_fetch_ordering(&or_default("MAISON_FETCH_ORDERING", "latest-request"))?;
    let related_products_limit = parse_usize("MAISON_RELATED_PRODUCTS_LIMIT", "4")?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_base_url,
        request_timeout_secs,
        user_agent,
        fetch_ordering,
        related_products_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_fetch_ordering(s: &str) -> Result<FetchOrdering, ConfigError> {
    match s {
        "latest-request" => Ok(FetchOrdering::LatestRequest),
        "last-completion" => Ok(FetchOrdering::LastCompletion),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MAISON_FETCH_ORDERING".to_string(),
            reason: format!("expected \"latest-request\" or \"last-completion\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
