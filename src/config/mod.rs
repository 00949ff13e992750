//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment name ──────────────→ Settings::for_environment
//!
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, overrides over profile defaults)
//!     → Settings (validated, immutable)
//!     → StructuredLogger::from_settings
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Unknown environment names fall back to the development profile

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{Format, LogConfig, Output, Profile, Settings};
pub use validation::{resolve_settings, validate_config, ValidationError};
