//! Validation utilities for input sanitization and edge case handling

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ExportError, Result};

/// Placeholder token used when a contact identifier sanitizes to nothing.
pub const FALLBACK_FILENAME: &str = "contact";

fn forbidden_chars() -> &'static Regex {
    static FORBIDDEN: OnceLock<Regex> = OnceLock::new();
    FORBIDDEN.get_or_init(|| Regex::new(r"[^\w.-]+").expect("hard-coded regex is valid"))
}

/// Validation utilities for operator-supplied inputs
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a contact identifier before it is used as a lookup key.
    ///
    /// Identifiers are matched verbatim against `handle.id`, so only inputs
    /// that could never be stored there are rejected.
    pub fn validate_contact_identifier(identifier: &str) -> Result<()> {
        if identifier.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "Contact identifier cannot be empty".to_string(),
            ));
        }

        if identifier.len() > 255 {
            return Err(ExportError::InvalidConfig(
                "Contact identifier too long (max 255 characters)".to_string(),
            ));
        }

        if identifier.contains('\0') || identifier.contains('\r') || identifier.contains('\n') {
            return Err(ExportError::InvalidConfig(
                "Contact identifier contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the sms.db path from the backup.
    pub fn validate_sms_db_path(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ExportError::MissingResource(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(ExportError::InvalidConfig(format!(
                "Database path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Validate the backup root containing the attachments tree.
    pub fn validate_attachments_root(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ExportError::MissingResource(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Err(ExportError::InvalidConfig(format!(
                "Attachments root is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Reduce a contact identifier to a filesystem-safe filename token.
    ///
    /// Every run of characters outside letters, digits, `_`, `.`, and `-`
    /// collapses to a single underscore. Two identifiers that sanitize to
    /// the same token collide; they are not disambiguated.
    #[must_use]
    pub fn sanitize_filename(handle: &str) -> String {
        let sanitized = forbidden_chars().replace_all(handle.trim(), "_");
        if sanitized.is_empty() {
            FALLBACK_FILENAME.to_string()
        } else {
            sanitized.into_owned()
        }
    }
}
