//! Transcript writing and export orchestration.
//!
//! One transcript file per contact, one line per fetched row. When media
//! export is enabled, each resolvable attachment is copied before the line
//! referencing it is written, so an aborted run never leaves a transcript
//! pointing at files that were not copied.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::attachments::{resolve_attachment_path, MediaDir};
use crate::config::ExportOptions;
use crate::db::MessageStore;
use crate::error::{ExportError, Result};
use crate::logging::OperationTimer;
use crate::metrics::MetricsCollector;
use crate::models::MessageRow;
use crate::timestamp;
use crate::validation::InputValidator;

/// Sender label used for messages sent by the device owner.
const FROM_ME_LABEL: &str = "Me";

/// Body placeholder for messages without text.
const EMPTY_BODY: &str = "(no text)";

/// Writes per-contact transcripts from an open message store.
pub struct TranscriptExporter<'a> {
    store: &'a MessageStore,
    options: &'a ExportOptions,
    metrics: MetricsCollector,
}

impl<'a> TranscriptExporter<'a> {
    /// Create an exporter over an open store and resolved options.
    #[must_use]
    pub fn new(store: &'a MessageStore, options: &'a ExportOptions) -> Self {
        Self {
            store,
            options,
            metrics: MetricsCollector::default(),
        }
    }

    /// Export every requested contact in input order.
    ///
    /// Contacts are processed sequentially with no isolation boundary: the
    /// first failure aborts the run, and transcripts already written stay on
    /// disk. Returns the transcript path for each contact.
    pub fn export_all(&self) -> Result<Vec<PathBuf>> {
        let timer = OperationTimer::new("export_chats");
        let mut exported = Vec::with_capacity(self.options.contacts.len());

        for identifier in &self.options.contacts {
            info!(contact = %identifier, "exporting messages");
            exported.push(self.export_contact(identifier)?);
        }

        timer.finish();
        Ok(exported)
    }

    /// Export a single contact's transcript (and media, when enabled).
    fn export_contact(&self, identifier: &str) -> Result<PathBuf> {
        let start = Instant::now();

        let sanitized = InputValidator::sanitize_filename(identifier);
        let text_path = self.options.output_dir.join(format!("{sanitized}.txt"));
        ensure_output_path(&text_path, self.options.overwrite)?;

        let media = if self.options.include_media {
            let dir = self
                .options
                .output_dir
                .join(format!("{sanitized}_attachments"));
            Some(MediaDir::prepare(dir, self.options.overwrite)?)
        } else {
            None
        };

        let rows = self.store.fetch_messages(identifier)?;
        if rows.is_empty() {
            return Err(ExportError::NoMessages(identifier.to_string()));
        }
        debug!(contact = %identifier, rows = rows.len(), "fetched message rows");

        let file = File::create(&text_path)?;
        let mut writer = BufWriter::new(file);
        for row in &rows {
            let line = self.format_row(row, identifier, media.as_ref())?;
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;

        self.metrics.record_contact_export(rows.len(), start.elapsed());
        Ok(text_path)
    }

    /// Render one fetched row as one transcript line.
    ///
    /// When media export is enabled and the row's attachment resolves, the
    /// file is copied here, before the line is returned to the writer.
    fn format_row(
        &self,
        row: &MessageRow,
        identifier: &str,
        media: Option<&MediaDir>,
    ) -> Result<String> {
        let timestamp_text = timestamp::format_timestamp(row.timestamp);
        let sender = if row.is_from_me { FROM_ME_LABEL } else { identifier };
        let body = normalize_body(row.text.as_deref());

        let mut annotation = String::new();
        if let (Some(media), Some(root)) = (media, self.options.attachments_root.as_deref()) {
            if let Some(attachment) = &row.attachment {
                match resolve_attachment_path(&attachment.filename, root) {
                    Some(source) => {
                        debug!(
                            contact = %identifier,
                            source = %source.display(),
                            mime_type = attachment.mime_type.as_deref().unwrap_or("unknown"),
                            "copying attachment"
                        );
                        let final_name =
                            media.copy_into(&source, attachment.transfer_name.as_deref())?;
                        self.metrics.record_attachment_copied();
                        annotation = format!(" [attachment: {final_name}]");
                    }
                    None => {
                        warn!(
                            contact = %identifier,
                            fragment = %attachment.filename,
                            "attachment not found in backup"
                        );
                        self.metrics.record_attachment_missing();
                        annotation = " [attachment not found in backup]".to_string();
                    }
                }
            }
        }

        Ok(format!("[{timestamp_text}] {sender}: {body}{annotation}"))
    }
}

/// Normalize a message body for a single transcript line.
fn normalize_body(text: Option<&str>) -> String {
    let body = text.unwrap_or("").replace("\r\n", "\n").replace('\r', "\n");
    if body.is_empty() {
        EMPTY_BODY.to_string()
    } else {
        body
    }
}

/// Refuse to clobber an existing output and make sure its parent exists.
fn ensure_output_path(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(ExportError::OutputExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Export transcripts for every contact in `options`.
///
/// Opens the message store once, reuses it sequentially across contacts,
/// and releases it when the run completes or fails.
pub fn export_chats(options: &ExportOptions) -> Result<Vec<PathBuf>> {
    let store = MessageStore::open(&options.sms_db)?;
    TranscriptExporter::new(&store, options).export_all()
}
