//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SLOTBOOK_DB_PATH`: Database file path (required)
//! - `SLOTBOOK_DB_POOL_SIZE`: Connection pool size
//! - `SLOTBOOK_STEP_MINUTES`: Slot granularity in minutes
//! - `SLOTBOOK_MIN_LEAD_TIME_MINUTES`: Minimum booking lead time
//! - `SLOTBOOK_SEARCH_HORIZON_DAYS`: Alternative-search day horizon
//! - `SLOTBOOK_NEARBY_SAME_DAY`: Same-day alternatives around the request
//! - `SLOTBOOK_MAX_ALTERNATIVES`: Upper bound on returned alternatives
//! - `SLOTBOOK_MAX_OCCURRENCES`: Hard cap on expanded recurrence occurrences
//!
//! ## File Locations
//! The loader probes `config.json` / `config.toml` and
//! `slotbook.json` / `slotbook.toml` in the current directory, then the
//! parent directory.

use std::path::{Path, PathBuf};

use slotbook_domain::constants::DEFAULT_DB_POOL_SIZE;
use slotbook_domain::{Config, DatabaseConfig, SchedulingConfig, SlotbookError};

type Result<T> = std::result::Result<T, SlotbookError>;

/// Load configuration with automatic fallback strategy.
///
/// First attempts to load from environment variables. If the required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SlotbookError::Config` if configuration cannot be loaded from
/// either source or a file has an invalid format.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables.
///
/// `SLOTBOOK_DB_PATH` is required; every scheduling value falls back to its
/// documented default.
///
/// # Errors
/// Returns `SlotbookError::Config` if the database path is missing or any
/// present variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("SLOTBOOK_DB_PATH")?;
    let pool_size = env_parse("SLOTBOOK_DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)?;

    let defaults = SchedulingConfig::default();
    let scheduling = SchedulingConfig {
        step_minutes: env_parse("SLOTBOOK_STEP_MINUTES", defaults.step_minutes)?,
        min_lead_time_minutes: env_parse(
            "SLOTBOOK_MIN_LEAD_TIME_MINUTES",
            defaults.min_lead_time_minutes,
        )?,
        search_horizon_days: env_parse(
            "SLOTBOOK_SEARCH_HORIZON_DAYS",
            defaults.search_horizon_days,
        )?,
        nearby_same_day: env_parse("SLOTBOOK_NEARBY_SAME_DAY", defaults.nearby_same_day)?,
        max_alternatives: env_parse("SLOTBOOK_MAX_ALTERNATIVES", defaults.max_alternatives)?,
        max_occurrences: env_parse("SLOTBOOK_MAX_OCCURRENCES", defaults.max_occurrences)?,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        scheduling,
    })
}

/// Load configuration from a file, probing default locations when no path
/// is given.
///
/// # Errors
/// Returns `SlotbookError::Config` when no config file is found or the
/// file cannot be parsed.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(explicit) => explicit.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            SlotbookError::Config("no config file found in default locations".into())
        })?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        SlotbookError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| SlotbookError::Config(format!("invalid JSON config: {e}")))?,
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| SlotbookError::Config(format!("invalid TOML config: {e}")))?,
        other => {
            return Err(SlotbookError::Config(format!(
                "unsupported config format: {other:?}"
            )))
        }
    };

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "slotbook.json", "slotbook.toml"];

    for dir in [".", ".."] {
        for name in NAMES {
            let candidate = Path::new(dir).join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| SlotbookError::Config(format!("missing environment variable {name}")))
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| SlotbookError::Config(format!("invalid value for {name}: {e}"))),
        Err(_) => Ok(default),
    }
}
