//! Configuration management
//!
//! `AppConfig` is the layered application configuration (defaults, optional
//! config files, environment). `ExportOptions` is the resolved runtime
//! configuration of one export run, decoupled from how the arguments were
//! parsed.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::validation::InputValidator;

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration section
    pub logging: LoggingConfig,
    /// Export defaults section
    pub export: ExportConfig,
}

/// Logging configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Optional log file directory; console-only when unset
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Export defaults section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default target directory for transcripts and media
    pub output_directory: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
            export: ExportConfig {
                output_directory: "./ios_sms_exports".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("export.output_directory", "./ios_sms_exports")?
            // Add config files if they exist
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("IOS_SMS_EXPORT").separator("__"))
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ExportError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            )));
        }

        if self.export.output_directory.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "output_directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Get the optional log file directory
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging.file_path.as_ref().map(PathBuf::from)
    }
}

/// Resolved configuration of one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Path to the sms.db file from the backup
    pub sms_db: PathBuf,
    /// Backup root containing the `Library/SMS/Attachments` tree
    pub attachments_root: Option<PathBuf>,
    /// Handle identifiers to export, processed in this order
    pub contacts: Vec<String>,
    /// Target directory for transcripts and copied media
    pub output_dir: PathBuf,
    /// Copy attachments into per-contact media directories
    pub include_media: bool,
    /// Replace existing export files instead of aborting
    pub overwrite: bool,
}

impl ExportOptions {
    /// Check the required input combination before any database I/O.
    pub fn validate(&self) -> Result<()> {
        if self.contacts.is_empty() {
            return Err(ExportError::InvalidConfig(
                "At least one contact must be given".to_string(),
            ));
        }

        for identifier in &self.contacts {
            InputValidator::validate_contact_identifier(identifier)?;
        }

        if self.include_media && self.attachments_root.is_none() {
            return Err(ExportError::InvalidConfig(
                "An attachments root is required to export media".to_string(),
            ));
        }

        InputValidator::validate_sms_db_path(&self.sms_db)?;

        if let Some(root) = &self.attachments_root {
            InputValidator::validate_attachments_root(root)?;
        }

        Ok(())
    }
}
