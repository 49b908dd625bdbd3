//! Configuration validation.
//!
//! Validates every config field before any data is fetched.

use crate::domain::config::{DEFAULT_PERIODS_PER_YEAR, DEFAULT_PRECISION};
use crate::domain::error::GemError;
use crate::domain::horizon::HorizonSet;
use crate::domain::role::AssetRole;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::str::FromStr;

pub const MAX_PRECISION: i64 = 12;

pub fn validate_gem_config(config: &dyn ConfigPort) -> Result<(), GemError> {
    validate_data_path(config)?;
    validate_instruments(config)?;
    validate_horizons(config)?;
    validate_precision(config)?;
    validate_periods_per_year(config)?;
    validate_skip_failed_steps(config)?;
    validate_optional_date(config, "backtest", "start_date")?;
    validate_optional_date(config, "decision", "date")?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), GemError> {
    match config.get_string("data", "path") {
        Some(_) => Ok(()),
        None => Err(GemError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

/// Instruments are optional; a present value must be a single token.
fn validate_instruments(config: &dyn ConfigPort) -> Result<(), GemError> {
    for role in AssetRole::ALL {
        if let Some(value) = config.get_string("instruments", role.as_str()) {
            if value.split_whitespace().count() != 1 || value.contains(['/', '\\']) {
                return Err(GemError::ConfigInvalid {
                    section: "instruments".to_string(),
                    key: role.as_str().to_string(),
                    reason: format!("'{}' is not a valid instrument identifier", value),
                });
            }
        }
    }
    Ok(())
}

fn validate_horizons(config: &dyn ConfigPort) -> Result<(), GemError> {
    if let Some(spec) = config.get_string("momentum", "horizons") {
        HorizonSet::parse(&spec).map_err(|e| GemError::ConfigInvalid {
            section: "momentum".to_string(),
            key: "horizons".to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

fn validate_precision(config: &dyn ConfigPort) -> Result<(), GemError> {
    read_precision(config).map(|_| ())
}

fn validate_periods_per_year(config: &dyn ConfigPort) -> Result<(), GemError> {
    read_periods_per_year(config).map(|_| ())
}

fn validate_skip_failed_steps(config: &dyn ConfigPort) -> Result<(), GemError> {
    read_skip_failed_steps(config).map(|_| ())
}

/// `[momentum] precision`, default 6, within `0..=MAX_PRECISION`.
pub fn read_precision(config: &dyn ConfigPort) -> Result<u32, GemError> {
    let value: i64 = read_parsed(config, "momentum", "precision", DEFAULT_PRECISION as i64)?;
    if !(0..=MAX_PRECISION).contains(&value) {
        return Err(invalid(
            "momentum",
            "precision",
            format!("precision must be between 0 and {}", MAX_PRECISION),
        ));
    }
    Ok(value as u32)
}

/// `[backtest] periods_per_year`, default 12, finite and positive.
pub fn read_periods_per_year(config: &dyn ConfigPort) -> Result<f64, GemError> {
    let value: f64 = read_parsed(
        config,
        "backtest",
        "periods_per_year",
        DEFAULT_PERIODS_PER_YEAR,
    )?;
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(
            "backtest",
            "periods_per_year",
            "periods_per_year must be positive".to_string(),
        ));
    }
    Ok(value)
}

/// `[backtest] skip_failed_steps`, default false.
pub fn read_skip_failed_steps(config: &dyn ConfigPort) -> Result<bool, GemError> {
    match config.get_string("backtest", "skip_failed_steps") {
        None => Ok(false),
        Some(value) => parse_bool(&value).ok_or_else(|| {
            invalid(
                "backtest",
                "skip_failed_steps",
                format!("'{}' is not a boolean", value),
            )
        }),
    }
}

/// true/yes/on/1 and false/no/off/0, case-insensitive.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn read_parsed<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, GemError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| invalid(section, key, format!("'{}' is not a number", value))),
    }
}

fn invalid(section: &str, key: &str, reason: String) -> GemError {
    GemError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn validate_optional_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), GemError> {
    if let Some(value) = config.get_string(section, key) {
        parse_date(&value, section, key)?;
    }
    Ok(())
}

pub fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, GemError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| GemError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("invalid {} format, expected YYYY-MM-DD", key),
    })
}
