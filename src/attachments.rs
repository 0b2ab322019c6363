//! Resolution and copying of backup media attachments.
//!
//! The store records attachment paths as device-local fragments like
//! `~/Library/SMS/Attachments/ab/cd/IMG_0001.jpeg`; backups keep the files
//! under `<root>/Library/SMS/Attachments/`, and some extraction tools drop
//! the leading directory structure entirely. Resolution tries both layouts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ExportError, Result};

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r"Library/SMS/Attachments/(.*)").expect("hard-coded regex is valid")
    })
}

/// Resolve a stored path fragment to an existing file under the backup root.
///
/// The fragment must contain the `Library/SMS/Attachments/` marker; the
/// remainder after it is tried first anchored under the full marker path,
/// then directly under `attachments_root`. Returns `None` when the marker is
/// absent or neither candidate exists on disk.
#[must_use]
pub fn resolve_attachment_path(raw_path: &str, attachments_root: &Path) -> Option<PathBuf> {
    let captures = anchor_regex().captures(raw_path)?;
    let relative = Path::new(captures.get(1)?.as_str());

    let candidate = attachments_root
        .join("Library")
        .join("SMS")
        .join("Attachments")
        .join(relative);
    if candidate.exists() {
        return Some(candidate);
    }

    // Some exports contain no leading structure.
    let candidate = attachments_root.join(relative);
    candidate.exists().then_some(candidate)
}

/// Per-contact media directory with collision-safe copy semantics.
///
/// The directory itself is created lazily on the first copy, so a contact
/// whose attachments all fail to resolve leaves no empty directory behind.
pub struct MediaDir {
    dir: PathBuf,
}

impl MediaDir {
    /// Claim a media directory path, honoring the overwrite policy.
    ///
    /// A pre-existing directory is an error without overwrite; with
    /// overwrite it is removed so the run starts from a clean slate.
    pub fn prepare(dir: PathBuf, overwrite: bool) -> Result<Self> {
        if dir.exists() {
            if !overwrite {
                return Err(ExportError::OutputExists(dir));
            }
            fs::remove_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    /// Path of the media directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Copy a resolved attachment into the directory and return the final
    /// file name.
    ///
    /// The destination name is the preferred display name when recorded,
    /// otherwise the source file's own name. When the destination already
    /// exists from a prior row in the same run, a numeric suffix is appended
    /// (`name_1.ext`, `name_2.ext`, ...) until the name is free.
    pub fn copy_into(&self, source: &Path, preferred_name: Option<&str>) -> Result<String> {
        fs::create_dir_all(&self.dir)?;

        let name = preferred_name
            .filter(|n| !n.is_empty())
            .map(str::to_owned)
            .or_else(|| {
                source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "attachment".to_string());

        let destination = unique_destination(&self.dir, &name);
        fs::copy(source, &destination)?;

        Ok(destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(name))
    }
}

/// First non-existing destination for `name` inside `dir`.
fn unique_destination(dir: &Path, name: &str) -> PathBuf {
    let destination = dir.join(name);
    if !destination.exists() {
        return destination;
    }

    let base = Path::new(name);
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let extension = base.extension().and_then(|e| e.to_str());

    let mut suffix = 1;
    loop {
        let candidate = match extension {
            Some(ext) => format!("{stem}_{suffix}.{ext}"),
            None => format!("{stem}_{suffix}"),
        };
        let destination = dir.join(candidate);
        if !destination.exists() {
            return destination;
        }
        suffix += 1;
    }
}
