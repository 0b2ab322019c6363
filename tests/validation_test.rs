//! Unit tests for the validation module

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::tempdir;

use ios_sms_export::config::ExportOptions;
use ios_sms_export::error::ExportError;
use ios_sms_export::validation::{InputValidator, FALLBACK_FILENAME};

#[test]
fn test_sanitize_phone_number() {
    assert_eq!(
        InputValidator::sanitize_filename("+491701234567"),
        "_491701234567"
    );
}

#[test]
fn test_sanitize_email() {
    assert_eq!(
        InputValidator::sanitize_filename("max@example.com"),
        "max_example.com"
    );
}

#[test]
fn test_sanitize_name_with_spaces() {
    assert_eq!(
        InputValidator::sanitize_filename("Max Mustermann"),
        "Max_Mustermann"
    );
}

#[test]
fn test_sanitize_preserves_unicode_letters() {
    assert_eq!(
        InputValidator::sanitize_filename("José García"),
        "José_García"
    );
}

#[test]
fn test_sanitize_collapses_runs_to_single_underscore() {
    assert_eq!(InputValidator::sanitize_filename("a / b"), "a_b");
}

#[test]
fn test_sanitize_trims_before_replacing() {
    assert_eq!(InputValidator::sanitize_filename("  abc  "), "abc");
}

#[test]
fn test_sanitize_empty_falls_back_to_placeholder() {
    assert_eq!(InputValidator::sanitize_filename(""), FALLBACK_FILENAME);
    assert_eq!(InputValidator::sanitize_filename("   "), FALLBACK_FILENAME);
}

#[test]
fn test_sanitize_is_deterministic() {
    let first = InputValidator::sanitize_filename("+49 170 1234567");
    let second = InputValidator::sanitize_filename("+49 170 1234567");
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn test_sanitized_names_use_allowed_characters_only(identifier in "[ -~]{0,40}") {
        let sanitized = InputValidator::sanitize_filename(&identifier);
        prop_assert!(!sanitized.is_empty());
        prop_assert!(sanitized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'));
    }
}

#[test]
fn test_validate_contact_identifier_valid() {
    assert!(InputValidator::validate_contact_identifier("+15551234567").is_ok());
    assert!(InputValidator::validate_contact_identifier("max@example.com").is_ok());
}

#[test]
fn test_validate_contact_identifier_empty() {
    assert!(InputValidator::validate_contact_identifier("").is_err());
    assert!(InputValidator::validate_contact_identifier("   ").is_err());
}

#[test]
fn test_validate_contact_identifier_with_newline() {
    assert!(InputValidator::validate_contact_identifier("max\nmustermann").is_err());
}

#[test]
fn test_validate_contact_identifier_too_long() {
    let long = "a".repeat(256);
    assert!(InputValidator::validate_contact_identifier(&long).is_err());
}

fn valid_options(sms_db: PathBuf) -> ExportOptions {
    ExportOptions {
        sms_db,
        attachments_root: None,
        contacts: vec!["+15551234567".to_string()],
        output_dir: PathBuf::from("exports"),
        include_media: false,
        overwrite: false,
    }
}

#[test]
fn test_options_validate_ok() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");
    fs::write(&db_path, b"").expect("Failed to create db fixture");

    assert!(valid_options(db_path).validate().is_ok());
}

#[test]
fn test_options_require_at_least_one_contact() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");
    fs::write(&db_path, b"").expect("Failed to create db fixture");

    let mut options = valid_options(db_path);
    options.contacts.clear();
    assert!(matches!(
        options.validate(),
        Err(ExportError::InvalidConfig(_))
    ));
}

#[test]
fn test_options_media_requires_attachments_root() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");
    fs::write(&db_path, b"").expect("Failed to create db fixture");

    let mut options = valid_options(db_path);
    options.include_media = true;
    assert!(matches!(
        options.validate(),
        Err(ExportError::InvalidConfig(_))
    ));
}

#[test]
fn test_options_missing_database_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let options = valid_options(temp_dir.path().join("absent.db"));
    assert!(matches!(
        options.validate(),
        Err(ExportError::MissingResource(_))
    ));
}

#[test]
fn test_options_missing_attachments_root_is_reported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("sms.db");
    fs::write(&db_path, b"").expect("Failed to create db fixture");

    let mut options = valid_options(db_path);
    options.include_media = true;
    options.attachments_root = Some(temp_dir.path().join("absent"));
    assert!(matches!(
        options.validate(),
        Err(ExportError::MissingResource(_))
    ));
}
