//! Directory scanner
//!
//! Walks one root directory and reads the timestamps of every file found.
//!
//! A file whose metadata can't be read (permission denied, vanished during
//! the walk, dangling symlink, unsupported attribute) is logged and skipped.
//! Only a problem with the root itself is returned as an error.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{StoreError, StoreResult};
use super::types::FileEvent;

/// A file the scanner could not read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning one root
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Records in discovery order
    pub events: Vec<FileEvent>,
    /// Entries excluded because they could not be read
    pub skipped: Vec<SkippedFile>,
}

/// Scan a root and return one record per readable file
pub fn scan(root: &Path) -> StoreResult<Vec<FileEvent>> {
    scan_root(root).map(|report| report.events)
}

/// Scan a root, also reporting the files that were skipped
pub fn scan_root(root: &Path) -> StoreResult<ScanReport> {
    check_root(root)?;

    let mut report = ScanReport::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Unreadable subdirectory or entry vanished mid-walk
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                report.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }

        let path = entry.path();

        // Follows symlinks, so a dangling link fails here
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                skip(&mut report, path, &e);
                continue;
            }
        };

        if !metadata.is_file() {
            continue;
        }

        match FileEvent::from_metadata(path, &metadata) {
            Ok(event) => report.events.push(event),
            Err(e) => skip(&mut report, path, &e),
        }
    }

    tracing::debug!(
        root = %root.display(),
        files = report.events.len(),
        skipped = report.skipped.len(),
        "Scan complete"
    );

    Ok(report)
}

fn skip(report: &mut ScanReport, path: &Path, error: &std::io::Error) {
    tracing::warn!(path = %path.display(), error = %error, "Error reading file metadata");
    report.skipped.push(SkippedFile {
        path: path.to_path_buf(),
        reason: error.to_string(),
    });
}

/// Verify the root exists and is a directory
fn check_root(root: &Path) -> StoreResult<()> {
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(StoreError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::RootNotFound(root.to_path_buf()))
        }
        Err(e) => Err(StoreError::RootUnreadable {
            path: root.to_path_buf(),
            source: e,
        }),
    }
}
