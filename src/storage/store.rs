//! Event store
//!
//! The store is built once from a fixed list of roots and never mutated
//! afterwards. Queries borrow it; a rescan builds a fresh store and swaps
//! the shared reference in [`StoreHandle`] as a whole.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use super::error::{StoreError, StoreResult};
use super::scanner::{scan_root, SkippedFile};
use super::types::{DateRange, FileEvent, TimestampKind};

/// What to do when a configured root can't be scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootErrorPolicy {
    /// Fail the whole build
    #[default]
    Abort,
    /// Log the failure and continue with the remaining roots
    Skip,
}

/// Per-root scan outcome
#[derive(Debug, Clone, Serialize)]
pub struct RootStats {
    pub root: PathBuf,
    pub files: usize,
    pub skipped: usize,
    /// Set when the root itself could not be scanned (skip policy only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Store statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub total_events: usize,
    pub total_skipped: usize,
    pub roots: Vec<RootStats>,
    pub built_at: Option<DateTime<Utc>>,
    pub build_duration_ms: u64,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "events={}, skipped={}, roots={}, build={}ms",
            self.total_events,
            self.total_skipped,
            self.roots.len(),
            self.build_duration_ms
        )
    }
}

/// Ordered, immutable collection of file events for one run
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<FileEvent>,
    skipped: Vec<SkippedFile>,
    stats: StoreStats,
}

impl EventStore {
    /// Scan every root in order, failing on the first root error
    pub fn build<P: AsRef<Path>>(roots: &[P]) -> StoreResult<Self> {
        Self::build_with_policy(roots, RootErrorPolicy::Abort)
    }

    /// Scan every root in order.
    ///
    /// Records keep root-list order, then scan order within each root.
    /// Nothing is deduplicated: a file reachable from two roots appears twice.
    pub fn build_with_policy<P: AsRef<Path>>(
        roots: &[P],
        policy: RootErrorPolicy,
    ) -> StoreResult<Self> {
        let started = Instant::now();
        let mut events = Vec::new();
        let mut skipped = Vec::new();
        let mut root_stats = Vec::with_capacity(roots.len());

        for root in roots {
            let root = root.as_ref();
            tracing::info!(root = %root.display(), "Scanning root");

            match scan_root(root) {
                Ok(report) => {
                    root_stats.push(RootStats {
                        root: root.to_path_buf(),
                        files: report.events.len(),
                        skipped: report.skipped.len(),
                        error: None,
                    });
                    events.extend(report.events);
                    skipped.extend(report.skipped);
                }
                Err(e) if policy == RootErrorPolicy::Skip => {
                    tracing::error!(root = %root.display(), error = %e, "Root scan failed, continuing with remaining roots");
                    root_stats.push(RootStats {
                        root: root.to_path_buf(),
                        files: 0,
                        skipped: 0,
                        error: Some(e.to_string()),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let stats = StoreStats {
            total_events: events.len(),
            total_skipped: skipped.len(),
            roots: root_stats,
            built_at: Some(Utc::now()),
            build_duration_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!("Event store built: {}", stats);

        Ok(Self {
            events,
            skipped,
            stats,
        })
    }

    /// Build a store from records that were already collected
    pub fn from_events(events: Vec<FileEvent>) -> Self {
        let stats = StoreStats {
            total_events: events.len(),
            built_at: Some(Utc::now()),
            ..Default::default()
        };
        Self {
            events,
            skipped: Vec::new(),
            stats,
        }
    }

    /// All records in insertion order
    pub fn events(&self) -> &[FileEvent] {
        &self.events
    }

    /// Files excluded during the scan
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEvent> {
        self.events.iter()
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Earliest and latest date for a kind, or None for an empty store
    pub fn date_bounds(&self, kind: TimestampKind) -> Option<DateRange> {
        let mut dates = self.events.iter().map(|e| e.date(kind));
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateRange::new(start, end))
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a FileEvent;
    type IntoIter = std::slice::Iter<'a, FileEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Shared reference to the current store
///
/// Readers clone the inner `Arc` and query without holding the lock.
/// Replacement swaps the whole store, never mutating one in place.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    current: Arc<RwLock<Arc<EventStore>>>,
}

impl StoreHandle {
    pub fn new(store: EventStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// Get the current store
    pub async fn snapshot(&self) -> Arc<EventStore> {
        Arc::clone(&*self.current.read().await)
    }

    /// Swap in a new store, returning the previous one
    pub async fn replace(&self, store: EventStore) -> Arc<EventStore> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(store))
    }

    /// Rebuild from `roots` on a blocking thread and swap the result in.
    ///
    /// On failure the current store stays in place.
    pub async fn rescan(
        &self,
        roots: Vec<PathBuf>,
        policy: RootErrorPolicy,
    ) -> StoreResult<Arc<EventStore>> {
        let store = tokio::task::spawn_blocking(move || EventStore::build_with_policy(&roots, policy))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))??;

        self.replace(store).await;
        Ok(self.snapshot().await)
    }
}
