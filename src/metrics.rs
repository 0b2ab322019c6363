//! Metrics collection

use std::time::Duration;

use metrics::{counter, histogram};

use crate::error::{ExportError, Result};

/// Metrics collection and management
pub struct MetricsCollector {
    /// Contacts successfully exported
    pub contacts_exported_total: &'static str,
    /// Transcript lines written
    pub rows_exported_total: &'static str,
    /// Attachments copied into media directories
    pub attachments_copied_total: &'static str,
    /// Recorded attachments missing from the backup
    pub attachments_missing_total: &'static str,
    /// Per-contact export duration
    pub contact_export_duration: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            contacts_exported_total: "ios_sms_export_contacts_exported_total",
            rows_exported_total: "ios_sms_export_rows_exported_total",
            attachments_copied_total: "ios_sms_export_attachments_copied_total",
            attachments_missing_total: "ios_sms_export_attachments_missing_total",
            contact_export_duration: "ios_sms_export_contact_export_duration_seconds",
        }
    }
}

impl MetricsCollector {
    /// Initialize metrics collection
    pub fn init() -> Result<()> {
        metrics::set_global_recorder(metrics::NoopRecorder)
            .map_err(|e| ExportError::InvalidConfig(format!("Failed to initialize metrics recorder: {e}")))?;

        Ok(())
    }

    /// Record a finished per-contact export
    pub fn record_contact_export(&self, row_count: usize, duration: Duration) {
        counter!(self.contacts_exported_total).increment(1);
        counter!(self.rows_exported_total).increment(row_count as u64);
        histogram!(self.contact_export_duration).record(duration.as_secs_f64());
    }

    /// Record an attachment copied into a media directory
    pub fn record_attachment_copied(&self) {
        counter!(self.attachments_copied_total).increment(1);
    }

    /// Record an attachment that could not be found in the backup
    pub fn record_attachment_missing(&self) {
        counter!(self.attachments_missing_total).increment(1);
    }
}
