//! Configuration schema definitions.
//!
//! [`LogConfig`] is what a config file holds: an environment name plus
//! optional overrides. [`Settings`] is the resolved result a logger is built
//! from.

use serde::{Deserialize, Serialize};

use crate::logger::Level;

/// Environment name selecting the production profile.
pub const PRODUCTION_ENV: &str = "production";

/// Environment name of the default profile.
pub const DEVELOPMENT_ENV: &str = "development";

/// Built-in logging profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Info and above, JSON lines, no caller, no stack capture.
    Production,
    /// Everything, console lines, caller annotation, stack capture on errors.
    Development,
}

impl Profile {
    /// `"production"` selects [`Profile::Production`]; any other name,
    /// including unknown ones, selects [`Profile::Development`].
    pub fn from_environment(environment: &str) -> Self {
        if environment == PRODUCTION_ENV {
            Profile::Production
        } else {
            Profile::Development
        }
    }
}

/// Record encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One JSON object per line.
    Json,
    /// Human-readable `key=value` lines.
    Pretty,
}

/// Process stream records are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
}

/// Root logging configuration as read from a config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Environment name (e.g., "production", "development").
    pub environment: String,

    /// Minimum level (trace, debug, info, warn, error). Profile default if unset.
    pub level: Option<String>,

    /// Record encoding. Profile default if unset.
    pub format: Option<Format>,

    /// Output stream.
    pub output: Output,

    /// Annotate records with the logging call site. Profile default if unset.
    pub caller: Option<bool>,

    /// Attach error source chains and backtraces. Profile default if unset.
    pub stack_traces: Option<bool>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            environment: DEVELOPMENT_ENV.to_string(),
            level: None,
            format: None,
            output: Output::Stdout,
            caller: None,
            stack_traces: None,
        }
    }
}

/// Resolved settings a logger is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Profile,
    pub level: Level,
    pub format: Format,
    pub output: Output,
    pub caller: bool,
    pub stack_traces: bool,
}

impl Settings {
    /// Defaults of a built-in profile.
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Production => Self {
                profile,
                level: Level::Info,
                format: Format::Json,
                output: Output::Stdout,
                caller: false,
                stack_traces: false,
            },
            Profile::Development => Self {
                profile,
                level: Level::Trace,
                format: Format::Pretty,
                output: Output::Stdout,
                caller: true,
                stack_traces: true,
            },
        }
    }

    pub fn for_environment(environment: &str) -> Self {
        Self::for_profile(Profile::from_environment(environment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_selection() {
        assert_eq!(Profile::from_environment("production"), Profile::Production);
        assert_eq!(Profile::from_environment("development"), Profile::Development);
        assert_eq!(Profile::from_environment("staging"), Profile::Development);
        assert_eq!(Profile::from_environment(""), Profile::Development);
        // exact match only
        assert_eq!(Profile::from_environment("Production"), Profile::Development);
    }

    #[test]
    fn test_profile_defaults() {
        let prod = Settings::for_environment("production");
        assert_eq!(prod.level, Level::Info);
        assert_eq!(prod.format, Format::Json);
        assert!(!prod.caller);
        assert!(!prod.stack_traces);

        let dev = Settings::for_environment("anything");
        assert_eq!(dev.level, Level::Trace);
        assert_eq!(dev.format, Format::Pretty);
        assert!(dev.caller);
        assert!(dev.stack_traces);
        assert_eq!(dev.output, Output::Stdout);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.environment, "development");
        assert!(config.level.is_none());
        assert_eq!(config.output, Output::Stdout);
    }
}
