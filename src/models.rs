//! Data models for message rows read from the backup database
//!
//! All structures here are read-only projections over the joined export
//! query; nothing is ever written back to the store.

use chrono::NaiveDateTime;

/// One joined row of the export query.
///
/// A message with N attachments surfaces as N rows sharing the same
/// `message_id` because of the attachment join; callers must not assume one
/// row equals one message.
#[derive(Debug, Clone)]
pub struct MessageRow {
    /// Message primary key, unique per message (not per row)
    pub message_id: i64,
    /// Normalized send time, `None` when the stored value is zero, null,
    /// or malformed
    pub timestamp: Option<NaiveDateTime>,
    /// True if the message was sent by the device owner
    pub is_from_me: bool,
    /// Message text content
    pub text: Option<String>,
    /// Group-chat room names, passed through unchanged (unused for
    /// formatting)
    pub room_name: Option<String>,
    /// At most one attachment recorded on this row
    pub attachment: Option<AttachmentRef>,
}

/// An attachment descriptor as recorded in the store.
///
/// The referenced file is not guaranteed to exist in the backup; resolving
/// the fragment against the filesystem is a separate, fallible step.
#[derive(Debug, Clone)]
pub struct AttachmentRef {
    /// Stored path fragment, typically `.../Library/SMS/Attachments/<hash-path>`
    pub filename: String,
    /// Preferred display name for the copied file
    pub transfer_name: Option<String>,
    /// MIME type of the attachment
    pub mime_type: Option<String>,
}
