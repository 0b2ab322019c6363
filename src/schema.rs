//! Backup database schema definitions
//!
//! This module provides constants for the table and column names the export
//! query reads from an iOS backup's `sms.db`. The schema is externally
//! defined by the Messages app; only the columns this tool depends on are
//! listed.

/// Message table schema
pub mod message {
    /// Table name
    pub const TABLE: &str = "message";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
    /// Foreign key to the handle table
    pub const HANDLE_ID: &str = "handle_id";
    /// Raw Apple-epoch timestamp column (seconds or nanoseconds)
    pub const DATE: &str = "date";
    /// Flag indicating if the message was sent by the device owner
    pub const IS_FROM_ME: &str = "is_from_me";
    /// Message text content column
    pub const TEXT: &str = "text";
    /// Cached group-chat room names column
    pub const CACHE_ROOMNAMES: &str = "cache_roomnames";
}

/// Handle (contact endpoint) table schema
pub mod handle {
    /// Table name
    pub const TABLE: &str = "handle";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
    /// Identifier string column (phone number, e-mail address, or name)
    pub const ID: &str = "id";
}

/// Attachment table schema
pub mod attachment {
    /// Table name
    pub const TABLE: &str = "attachment";
    /// Primary key column
    pub const ROWID: &str = "ROWID";
    /// Stored path fragment column
    pub const FILENAME: &str = "filename";
    /// Preferred display name column
    pub const TRANSFER_NAME: &str = "transfer_name";
    /// MIME type column
    pub const MIME_TYPE: &str = "mime_type";
}

/// Message-to-attachment join table schema
pub mod message_attachment_join {
    /// Table name
    pub const TABLE: &str = "message_attachment_join";
    /// Foreign key to the message table
    pub const MESSAGE_ID: &str = "message_id";
    /// Foreign key to the attachment table
    pub const ATTACHMENT_ID: &str = "attachment_id";
}
