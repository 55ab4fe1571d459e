//! # Configuration Module
//!
//! Handles loading and validating the application configuration from TOML
//! files.
//!
//! The `[settings]` table holds controller settings under their persisted
//! key names (`InvertLeftX`, `DeadzoneLeft`, `BindingA`, ...) and is used
//! directly as a [`ConfigStore`](crate::store::ConfigStore):
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [settings]
//! DeadzoneLeft = 4000
//! RelativeLeft = true
//! CombinedTriggers = true
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PadBridgeError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Controller settings dictionary, keyed by persisted setting names
    #[serde(default)]
    pub settings: toml::Table,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default level directive, overridable with `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rotated log files; logs go to stderr when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

// Default value functions
fn default_log_level() -> String { "info".to_string() }

impl LoggingConfig {
    /// Parsed logging level.
    ///
    /// # Errors
    ///
    /// Returns error if `level` is not a valid tracing level.
    pub fn level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(&self.level).map_err(|_| {
            PadBridgeError::Config(toml::de::Error::custom(format!(
                "logging level '{}' must be one of: trace, debug, info, warn, error",
                self.level
            )))
        })
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pad_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing or validation fails
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Unknown or mistyped entries in `[settings]` are not errors here; the
    /// settings loader skips them the same way it does for any other store.
    fn validate(&self) -> Result<()> {
        self.logging.level()?;

        if let Some(dir) = &self.logging.log_dir {
            if dir.is_empty() {
                return Err(PadBridgeError::Config(toml::de::Error::custom(
                    "logging log_dir cannot be empty when set",
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::settings::ControllerSettings;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_none());
        assert!(config.settings.is_empty());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.logging.level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[logging]
level = "trace"

[settings]
DeadzoneLeft = 4000
RelativeLeft = true
BindingA = 1
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.logging.level().unwrap(), tracing::Level::TRACE);
        assert_eq!(config.settings.len(), 3);
    }

    #[test]
    fn test_settings_table_feeds_controller_settings() {
        let config = Config::parse(
            r#"
[settings]
InvertRightX = true
DeadzoneRight = 2500
DeadOffRight = true
XoneRumbleType = 1
"#,
        )
        .unwrap();

        let mut settings = ControllerSettings::new();
        assert_eq!(settings.load(Some(&config.settings)), 4);
        assert!(settings.right.invert_x);
        assert_eq!(settings.right.deadzone, 2500);
        assert!(settings.right.normalized);
        assert_eq!(settings.rumble_type, 1);
    }

    #[test]
    fn test_mistyped_settings_are_not_config_errors() {
        let config = Config::parse(
            r#"
[settings]
DeadzoneLeft = "big"
InvertLeftX = 1
"#,
        )
        .unwrap();

        let mut settings = ControllerSettings::new();
        assert_eq!(settings.load(Some(&config.settings)), 0);
        assert_eq!(settings, ControllerSettings::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let result = Config::parse("[logging]\nlevel = \"loud\"\n");
        match result {
            Err(PadBridgeError::Config(e)) => assert!(e.to_string().contains("loud")),
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }

    #[test]
    fn test_valid_log_levels() {
        for level in ["trace", "debug", "info", "warn", "error", "INFO"] {
            let config = Config::parse(&format!("[logging]\nlevel = \"{}\"\n", level));
            assert!(config.is_ok(), "Level {} should be valid", level);
        }
    }

    #[test]
    fn test_empty_log_dir() {
        let result = Config::parse("[logging]\nlog_dir = \"\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::parse("[logging\nlevel = 3"),
            Err(PadBridgeError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/pad-bridge.toml"),
            Err(PadBridgeError::Io(_))
        ));
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_log_level(), "info");
    }
}
