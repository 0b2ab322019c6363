//! Read-only access to the backup's message store.
//!
//! The connection is opened once per export run, passed explicitly to the
//! exporter, and released when the store is dropped.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, Row};

use crate::error::{ExportError, Result};
use crate::models::{AttachmentRef, MessageRow};
use crate::schema::{attachment, handle, message, message_attachment_join};
use crate::timestamp;

/// Read handle over an `sms.db` file.
pub struct MessageStore {
    connection: Connection,
}

impl MessageStore {
    /// Open the backup database read-only.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() || !path.is_file() {
            return Err(ExportError::MissingResource(path.to_path_buf()));
        }

        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Self { connection })
    }

    /// Fetch every message row for a handle identifier.
    ///
    /// The match on `handle.id` is exact and case-sensitive; no normalization
    /// across formats of the same phone number is attempted. Rows are ordered
    /// by raw timestamp, then message ROWID, so ordering is deterministic even
    /// when timestamps collide or are unset. A message with multiple
    /// attachments is returned as multiple rows.
    pub fn fetch_messages(&self, handle_identifier: &str) -> Result<Vec<MessageRow>> {
        let query = format!(
            "SELECT
                m.{msg_rowid} AS message_id,
                m.{date} AS date,
                m.{is_from_me} AS is_from_me,
                m.{text} AS text,
                m.{roomnames} AS room_name,
                a.{filename} AS filename,
                a.{transfer_name} AS transfer_name,
                a.{mime_type} AS mime_type
            FROM {message} AS m
            JOIN {handle} AS h ON h.{handle_rowid} = m.{handle_id}
            LEFT JOIN {maj} AS maj ON maj.{maj_message} = m.{msg_rowid}
            LEFT JOIN {attachment} AS a ON a.{att_rowid} = maj.{maj_attachment}
            WHERE h.{handle_identifier} = ?1
            ORDER BY m.{date}, m.{msg_rowid}",
            message = message::TABLE,
            msg_rowid = message::ROWID,
            date = message::DATE,
            is_from_me = message::IS_FROM_ME,
            text = message::TEXT,
            roomnames = message::CACHE_ROOMNAMES,
            handle_id = message::HANDLE_ID,
            handle = handle::TABLE,
            handle_rowid = handle::ROWID,
            handle_identifier = handle::ID,
            maj = message_attachment_join::TABLE,
            maj_message = message_attachment_join::MESSAGE_ID,
            maj_attachment = message_attachment_join::ATTACHMENT_ID,
            attachment = attachment::TABLE,
            att_rowid = attachment::ROWID,
            filename = attachment::FILENAME,
            transfer_name = attachment::TRANSFER_NAME,
            mime_type = attachment::MIME_TYPE,
        );

        let mut statement = self.connection.prepare(&query)?;
        let row_iter = statement.query_map(params![handle_identifier], Self::map_row)?;

        let mut rows = Vec::new();
        for row in row_iter {
            rows.push(row?);
        }

        Ok(rows)
    }

    /// Map a joined query row to a `MessageRow`.
    fn map_row(row: &Row) -> rusqlite::Result<MessageRow> {
        let raw_date: Value = row.get("date")?;
        let filename: Option<String> = row.get("filename")?;
        let transfer_name: Option<String> = row.get("transfer_name")?;
        let mime_type: Option<String> = row.get("mime_type")?;

        Ok(MessageRow {
            message_id: row.get("message_id")?,
            timestamp: timestamp::from_apple_timestamp(&raw_date),
            is_from_me: row.get::<_, Option<bool>>("is_from_me")?.unwrap_or(false),
            text: row.get("text")?,
            room_name: row.get("room_name")?,
            // A join row without a stored filename carries nothing resolvable.
            attachment: filename.map(|filename| AttachmentRef {
                filename,
                transfer_name,
                mime_type,
            }),
        })
    }
}
