//! FTV Event Storage
//!
//! This module provides metadata collection and the in-memory event table:
//!
//! - **types**: Core data structures (FileEvent, TimestampKind, DateRange)
//! - **scanner**: Recursive directory walk reading file timestamps
//! - **store**: Immutable event store and the swappable shared handle
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Build Path:
//!   Roots → Scanner (per root, in order) → Concatenate → EventStore
//!
//! Read Path:
//!   StoreHandle::snapshot → &EventStore → Filter / Aggregate / Detail / Export
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use ftv::storage::{EventStore, TimestampKind};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EventStore::build(&["/cases/data", "/cases/system"])?;
//!
//!     if let Some(range) = store.date_bounds(TimestampKind::Modified) {
//!         println!("{} files modified between {}", store.len(), range);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod scanner;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use scanner::{scan, scan_root, ScanReport, SkippedFile};
pub use store::{EventStore, RootErrorPolicy, RootStats, StoreHandle, StoreStats};
pub use types::{DateRange, DayBucket, FileEvent, TimestampKind, UnknownKind};
