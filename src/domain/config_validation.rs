//! Configuration validation.
//!
//! Checks every config field before any data is loaded.

use crate::domain::error::AurumError;
use crate::ports::config_port::ConfigPort;

pub const MAX_CHART_SIZE: i64 = 20_000;
pub const MIN_TERMINAL_WIDTH: i64 = 16;
pub const MAX_TERMINAL_WIDTH: i64 = 1_000;
pub const MIN_TERMINAL_HEIGHT: i64 = 6;
pub const MAX_TERMINAL_HEIGHT: i64 = 500;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), AurumError> {
    validate_chart_size(config)?;
    validate_terminal_size(config)?;
    validate_since(config)?;
    validate_gold_key(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> AurumError {
    AurumError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_chart_size(config: &dyn ConfigPort) -> Result<(), AurumError> {
    for key in ["width", "height"] {
        if let Some(raw) = config.get_string("chart", key) {
            match raw.trim().parse::<i64>() {
                Ok(v) if (1..=MAX_CHART_SIZE).contains(&v) => {}
                _ => {
                    return Err(invalid(
                        "chart",
                        key,
                        &format!("must be an integer between 1 and {MAX_CHART_SIZE}"),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_terminal_size(config: &dyn ConfigPort) -> Result<(), AurumError> {
    let limits = [
        ("terminal_width", MIN_TERMINAL_WIDTH, MAX_TERMINAL_WIDTH),
        ("terminal_height", MIN_TERMINAL_HEIGHT, MAX_TERMINAL_HEIGHT),
    ];
    for (key, minimum, maximum) in limits {
        if let Some(raw) = config.get_string("chart", key) {
            match raw.trim().parse::<i64>() {
                Ok(v) if (minimum..=maximum).contains(&v) => {}
                _ => {
                    return Err(invalid(
                        "chart",
                        key,
                        &format!("must be an integer between {minimum} and {maximum}"),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn validate_since(config: &dyn ConfigPort) -> Result<(), AurumError> {
    match config.get_string("data", "since") {
        Some(raw) if raw.trim().parse::<i32>().is_err() => {
            Err(invalid("data", "since", "must be a year, e.g. 1971"))
        }
        _ => Ok(()),
    }
}

fn validate_gold_key(config: &dyn ConfigPort) -> Result<(), AurumError> {
    match config.get_string("data", "gold_key") {
        Some(s) if s.trim().is_empty() => Err(invalid("data", "gold_key", "must not be empty")),
        _ => Ok(()),
    }
}
