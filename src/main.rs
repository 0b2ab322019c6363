use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use ios_sms_export::config::{AppConfig, ExportOptions};
use ios_sms_export::export;
use ios_sms_export::logging::init_logging;
use ios_sms_export::metrics::MetricsCollector;

/// Export SMS/iMessage conversations for specific contacts from an iOS
/// backup database.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the sms.db file from the iOS backup
    #[arg(long, value_name = "PATH")]
    sms_db: PathBuf,

    /// Contact identifier (phone number, e-mail address, or name) exactly as
    /// stored in the database's handle table. May be given multiple times.
    #[arg(long = "contact", value_name = "IDENTIFIER", required = true)]
    contacts: Vec<String>,

    /// Root directory of the backup containing the 'Library/SMS/Attachments'
    /// tree. Required to copy media with --include-media.
    #[arg(long, value_name = "PATH")]
    attachments_root: Option<PathBuf>,

    /// Target directory for transcripts and copied media
    #[arg(long, value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Copy attachments (photos, videos, audio) into a per-contact directory
    #[arg(long)]
    include_media: bool,

    /// Replace existing export files instead of aborting
    #[arg(long)]
    overwrite: bool,
}

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging; the guard keeps the file writer alive
    let _guard = init_logging(Some(&config.log_level()), config.log_file().as_deref())?;

    // Parse command line arguments
    let cli = Cli::parse();

    // Resolve runtime options (CLI over configured defaults)
    let options = ExportOptions {
        sms_db: cli.sms_db,
        attachments_root: cli.attachments_root,
        contacts: cli.contacts,
        output_dir: cli
            .output_dir
            .unwrap_or_else(|| PathBuf::from(&config.export.output_directory)),
        include_media: cli.include_media,
        overwrite: cli.overwrite,
    };

    // Validate the input combination before touching the store
    options.validate()?;

    MetricsCollector::init()?;

    fs::create_dir_all(&options.output_dir)?;

    let exported = export::export_chats(&options)?;
    info!(files = exported.len(), "export complete");

    println!("Done. Exported files:");
    for path in &exported {
        println!(" - {}", path.display());
    }

    Ok(())
}
