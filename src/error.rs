//! Error types for the ios-sms-export library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while exporting conversations from a backup.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors while loading the layered configuration
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Missing or contradictory inputs, detected before any database I/O
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A referenced path (database or attachments root) does not exist
    #[error("Required path does not exist: {}", .0.display())]
    MissingResource(PathBuf),

    /// A target output file or directory is already present
    #[error("Output '{}' already exists; pass --overwrite to replace it", .0.display())]
    OutputExists(PathBuf),

    /// A requested contact matched no rows in the message store
    #[error("No messages found for contact '{0}'")]
    NoMessages(String),
}

/// Convenience type alias for Result with ExportError
pub type Result<T> = std::result::Result<T, ExportError>;
