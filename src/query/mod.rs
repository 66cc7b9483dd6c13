//! FTV Timeline Queries
//!
//! Read-only queries over an [`EventStore`](crate::storage::EventStore).
//!
//! # Pipeline
//!
//! ```text
//! EventStore → filter(range, kind) → aggregate(kind) → [(date, count)]
//!                                  → detail(date, kind) → [FileEvent]
//! ```
//!
//! All functions are pure: the same store and parameters always give the
//! same result, regardless of earlier calls.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ftv::query::TimelineService;
//! use ftv::storage::{DateRange, EventStore, TimestampKind};
//!
//! let store = EventStore::default();
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//! );
//!
//! let buckets = TimelineService::filter_and_aggregate(&store, range, TimestampKind::Modified);
//! assert!(buckets.is_empty());
//! ```

pub mod aggregate;
pub mod detail;
pub mod error;
pub mod filter;
pub mod params;
pub mod service;

pub use aggregate::aggregate;
pub use detail::detail;
pub use error::{QueryError, QueryResult};
pub use filter::filter;
pub use params::{parse_date, parse_date_at, resolve_range};
pub use service::{DetailEntry, TimelineService};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::storage::FileEvent;

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Event named `name` with the given (y, m, d) created/modified/accessed days
    pub fn event(
        name: &str,
        created: (i32, u32, u32),
        modified: (i32, u32, u32),
        accessed: (i32, u32, u32),
    ) -> FileEvent {
        let at = |(y, m, d): (i32, u32, u32)| day(y, m, d).and_hms_opt(14, 30, 0).unwrap();
        FileEvent {
            folder: "case".to_string(),
            file_name: name.to_string(),
            created_time: at(created),
            modified_time: at(modified),
            accessed_time: at(accessed),
            file_path: format!("/case/{name}"),
        }
    }
}
