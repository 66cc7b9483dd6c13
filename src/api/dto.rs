//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::query::DetailEntry;
use crate::storage::{DayBucket, StoreStats, TimestampKind};

// ============================================
// TIMELINE DTOs
// ============================================

/// Query string for the timeline endpoint
#[derive(Debug, Deserialize)]
pub struct TimelineParams {
    /// First day (YYYY-MM-DD, RFC 3339, or "now-7d"); defaults to earliest
    #[serde(default)]
    pub start: Option<String>,
    /// Last day; defaults to latest
    #[serde(default)]
    pub end: Option<String>,
    /// created, modified, or accessed
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    TimestampKind::default().to_string()
}

/// Timeline response
#[derive(Debug, Serialize, Deserialize)]
pub struct TimelineResponse {
    /// Kind the buckets were computed for (echoes the request)
    pub kind: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Ascending per-day counts, days without events omitted
    pub buckets: Vec<DayBucket>,
    /// Sum of all bucket counts
    pub total: usize,
}

// ============================================
// DETAIL DTOs
// ============================================

/// Query string for the detail endpoint
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Day whose files are listed
    pub date: String,
}

/// Detail response
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub date: NaiveDate,
    pub kind: String,
    pub files: Vec<DetailEntry>,
}

// ============================================
// EXPORT DTOs
// ============================================

/// Export parameters
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// Output format: csv, json, ndjson
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// STORE DTOs
// ============================================

/// Query string for the range endpoint
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    #[serde(default = "default_kind")]
    pub kind: String,
}

/// Earliest and latest day in the store for one kind
#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub kind: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// One selectable timestamp kind
#[derive(Debug, Serialize)]
pub struct KindInfo {
    pub value: TimestampKind,
    pub label: String,
    pub column: String,
    pub description: String,
}

impl From<TimestampKind> for KindInfo {
    fn from(kind: TimestampKind) -> Self {
        Self {
            value: kind,
            label: kind.label().to_string(),
            column: kind.column().to_string(),
            description: kind.description().to_string(),
        }
    }
}

/// Rescan response
#[derive(Debug, Serialize)]
pub struct RescanResponse {
    pub status: String,
    pub stats: StoreStats,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Number of records in the current store
    pub events: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// API version
    pub version: String,
}
