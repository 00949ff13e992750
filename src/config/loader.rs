//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{LogConfig, Settings};
use crate::config::validation::{resolve_settings, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<(LogConfig, Settings), ConfigError> {
    let config: LogConfig = toml::from_str(content)?;
    let settings = resolve_settings(&config).map_err(ConfigError::Validation)?;
    Ok((config, settings))
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<(LogConfig, Settings), ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{Format, Output};
    use crate::logger::Level;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let (config, settings) = parse_config(
            r#"
            environment = "production"
            level = "warn"
            format = "pretty"
            output = "stderr"
            caller = true
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, "production");
        assert_eq!(settings.level, Level::Warn);
        assert_eq!(settings.format, Format::Pretty);
        assert_eq!(settings.output, Output::Stderr);
        assert!(settings.caller);
        assert!(!settings.stack_traces);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let (config, settings) = parse_config("").unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(settings.level, Level::Trace);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("format = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config("environment = \"\"\nlevel = \"chatty\"").unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Validation failed: "));
        assert!(text.contains("environment must not be empty"));
        assert!(text.contains("chatty"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "environment = \"production\"").unwrap();

        let (_, settings) = load_config(file.path()).unwrap();
        assert_eq!(settings.level, Level::Info);
        assert_eq!(settings.format, Format::Json);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/fieldlog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
