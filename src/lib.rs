//! # FTV
//!
//! Forensic file timeline - collects the created, modified and accessed
//! timestamps of every file under one or more directory trees and answers
//! timeline queries over them.
//!
//! ## Features
//!
//! - **One-shot collection**: Recursive scan of every configured root at startup
//! - **Three timestamp kinds**: Switch between created/modified/accessed per query
//! - **Per-day timeline**: Sparse, ascending (date, count) buckets
//! - **Drill-down**: The exact files behind any bucket
//! - **Full export**: Round-trippable CSV (plus JSON/NDJSON)
//!
//! ## Modules
//!
//! - [`storage`]: Scanner and immutable event store
//! - [`query`]: Filter, aggregate and detail queries
//! - [`export`]: CSV/JSON serialization of the store
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use ftv::query::TimelineService;
//! use ftv::storage::{DateRange, EventStore, TimestampKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Scan the evidence roots
//!     let store = EventStore::build(&["/cases/extract/Data", "/cases/extract/System"])?;
//!
//!     // Count modifications per day in January
//!     let range = DateRange::new(
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     );
//!     for bucket in TimelineService::filter_and_aggregate(&store, range, TimestampKind::Modified) {
//!         println!("{}: {}", bucket.date, bucket.count);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod export;
pub mod query;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    DateRange, DayBucket, EventStore, FileEvent, RootErrorPolicy, StoreError, StoreHandle,
    StoreResult, StoreStats, TimestampKind,
};

pub use query::{DetailEntry, QueryError, TimelineService};

pub use export::{ExportError, ExportFormat};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, ScanConfig};
