//! Core data types for the file timeline
//!
//! This module defines the fundamental types used throughout the crate:
//! - `FileEvent`: The three timestamps of one file plus its location
//! - `TimestampKind`: Which timestamp a query operates on
//! - `DateRange`: An inclusive range of calendar days for queries
//! - `DayBucket`: One (date, count) pair of a timeline

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// One record of a file's timestamps
///
/// Field order is the column order of the CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEvent {
    /// Name of the immediate containing directory
    pub folder: String,
    /// Base name of the file
    pub file_name: String,
    /// Creation time (see [`TimestampKind::Created`] for platform semantics)
    pub created_time: NaiveDateTime,
    /// Last modification time
    pub modified_time: NaiveDateTime,
    /// Last access time
    pub accessed_time: NaiveDateTime,
    /// Full path as discovered by the scan
    pub file_path: String,
}

impl FileEvent {
    /// Build a record from a path and its already-read metadata.
    ///
    /// Fails if any of the three timestamps is unavailable or out of range;
    /// a record is never created with a missing timestamp. Paths that are
    /// not valid UTF-8 are rejected, since a lossy conversion could give
    /// two distinct files the same `file_path`.
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> io::Result<Self> {
        let file_path = path.to_str().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8")
        })?;
        let path = Path::new(file_path);

        let (created_time, modified_time, accessed_time) = read_timestamps(metadata)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let folder = path
            .parent()
            .map(|parent| {
                parent
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_else(|| parent.to_str().unwrap_or_default())
                    .to_string()
            })
            .unwrap_or_default();

        Ok(Self {
            folder,
            file_name,
            created_time,
            modified_time,
            accessed_time,
            file_path: file_path.to_string(),
        })
    }

    /// Get the timestamp selected by `kind`
    pub fn timestamp(&self, kind: TimestampKind) -> NaiveDateTime {
        match kind {
            TimestampKind::Created => self.created_time,
            TimestampKind::Modified => self.modified_time,
            TimestampKind::Accessed => self.accessed_time,
        }
    }

    /// Date-only projection of the timestamp selected by `kind`.
    ///
    /// Computed on every call so one store can be queried by any kind.
    pub fn date(&self, kind: TimestampKind) -> NaiveDate {
        self.timestamp(kind).date()
    }
}

/// Read (created, modified, accessed) from file metadata in local time.
///
/// On Unix "created" is the inode status-change time (`st_ctime`), which
/// is always available. Elsewhere it is the file system's birth time, and
/// the read fails where the platform does not record one.
pub fn read_timestamps(
    metadata: &Metadata,
) -> io::Result<(NaiveDateTime, NaiveDateTime, NaiveDateTime)> {
    let created = created_time(metadata)?;
    let modified = to_local(metadata.modified()?)?;
    let accessed = to_local(metadata.accessed()?)?;
    Ok((created, modified, accessed))
}

#[cfg(unix)]
fn created_time(metadata: &Metadata) -> io::Result<NaiveDateTime> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    from_unix(Some(metadata.ctime()), nanos)
}

#[cfg(not(unix))]
fn created_time(metadata: &Metadata) -> io::Result<NaiveDateTime> {
    to_local(metadata.created()?)
}

/// Convert an OS timestamp to the local wall clock, dropping the offset.
///
/// Fails with `InvalidData` when the time lies outside the representable
/// calendar range.
pub fn to_local(time: SystemTime) -> io::Result<NaiveDateTime> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok(), after.subsec_nanos()),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok().map(|s| -s);
            match before.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.and_then(|s| s.checked_sub(1)), 1_000_000_000 - n),
            }
        }
    };
    from_unix(secs, nanos)
}

fn from_unix(secs: Option<i64>, nanos: u32) -> io::Result<NaiveDateTime> {
    secs.and_then(|secs| DateTime::from_timestamp(secs, nanos))
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "timestamp out of range"))
}

/// Which of the three timestamps a query operates on
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimestampKind {
    /// Creation time. On Unix this is the status-change time (ctime), which
    /// also moves on permission or ownership changes.
    Created,
    /// Last content modification time
    #[default]
    Modified,
    /// Last access time (may be coarse or disabled, e.g. `noatime` mounts)
    Accessed,
}

impl TimestampKind {
    /// Get all kinds for iteration
    pub fn all() -> &'static [TimestampKind] {
        &[
            TimestampKind::Created,
            TimestampKind::Modified,
            TimestampKind::Accessed,
        ]
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TimestampKind::Created => "File Created",
            TimestampKind::Modified => "File Modified",
            TimestampKind::Accessed => "File Accessed",
        }
    }

    /// What the timestamp actually means on this platform
    pub fn description(&self) -> &'static str {
        match self {
            #[cfg(unix)]
            TimestampKind::Created => {
                "Inode status-change time (st_ctime); updated on content, permission and ownership changes"
            }
            #[cfg(not(unix))]
            TimestampKind::Created => "File system creation (birth) time",
            TimestampKind::Modified => "Last modification of the file contents",
            TimestampKind::Accessed => {
                "Last read access; precision depends on mount options"
            }
        }
    }

    /// Name of the matching export column
    pub fn column(&self) -> &'static str {
        match self {
            TimestampKind::Created => "created_time",
            TimestampKind::Modified => "modified_time",
            TimestampKind::Accessed => "accessed_time",
        }
    }
}

impl std::fmt::Display for TimestampKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampKind::Created => write!(f, "created"),
            TimestampKind::Modified => write!(f, "modified"),
            TimestampKind::Accessed => write!(f, "accessed"),
        }
    }
}

/// Error for an unrecognised timestamp kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown timestamp kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for TimestampKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" | "created_time" | "ctime" => Ok(TimestampKind::Created),
            "modified" | "modified_time" | "mtime" => Ok(TimestampKind::Modified),
            "accessed" | "accessed_time" | "atime" => Ok(TimestampKind::Accessed),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range. The range may be invalid (start after end).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one day
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Check that start <= end
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Check if a date falls within this range (inclusive on both ends).
    /// An invalid range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Number of events on one day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: usize,
}
