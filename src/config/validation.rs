//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Resolve overrides against the environment's profile defaults
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config

use thiserror::Error;

use crate::config::schema::{LogConfig, Settings};
use crate::logger::{Level, ParseLevelError};

/// A single semantic problem in a [`LogConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("environment must not be empty")]
    EmptyEnvironment,

    #[error("level: {0}")]
    Level(#[from] ParseLevelError),
}

/// Check a config without resolving it.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    resolve_settings(config).map(|_| ())
}

/// Validate a config and apply its overrides to the profile defaults.
pub fn resolve_settings(config: &LogConfig) -> Result<Settings, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.environment.trim().is_empty() {
        errors.push(ValidationError::EmptyEnvironment);
    }

    let level = match config.level.as_deref().map(str::parse::<Level>) {
        Some(Ok(level)) => Some(level),
        Some(Err(e)) => {
            errors.push(e.into());
            None
        }
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut settings = Settings::for_environment(&config.environment);
    if let Some(level) = level {
        settings.level = level;
    }
    if let Some(format) = config.format {
        settings.format = format;
    }
    settings.output = config.output;
    if let Some(caller) = config.caller {
        settings.caller = caller;
    }
    if let Some(stack_traces) = config.stack_traces {
        settings.stack_traces = stack_traces;
    }
    Ok(settings)
}
