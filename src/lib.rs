//! ios-sms-export - Backup Transcript Export
//!
//! A Rust library for exporting per-contact SMS/iMessage conversations from
//! the `sms.db` database of an unencrypted iOS backup.
//!
//! # Features
//!
//! - One human-readable `.txt` transcript per contact
//! - Optional copying of media attachments with collision-safe naming
//! - Apple-epoch timestamp normalization (seconds and nanoseconds encodings)
//! - Read-only access; the backup is never modified
//!
//! The tool does not break any encryption: a password-protected backup must
//! first be re-exported unencrypted.

/// Attachment resolution and media copying
pub mod attachments;
/// Configuration management
pub mod config;
/// Read-only message store access
pub mod db;
/// Error types
pub mod error;
/// Transcript writing and export orchestration
pub mod export;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Backup database schema definitions
pub mod schema;
/// Apple timestamp normalization
pub mod timestamp;
/// Input validation and sanitization
pub mod validation;

// Re-export key components for easier access
pub use config::{AppConfig, ExportOptions};
pub use db::MessageStore;
pub use error::{ExportError, Result};
pub use export::{export_chats, TranscriptExporter};
pub use models::{AttachmentRef, MessageRow};
