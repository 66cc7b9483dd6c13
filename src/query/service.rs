//! Timeline query interface
//!
//! The request/response surface used by the presentation layer. Every call
//! takes the store and all parameters explicitly and keeps no state
//! between calls.

use chrono::NaiveDate;
use serde::Serialize;

use super::aggregate::aggregate;
use super::detail::detail;
use super::filter::filter;
use crate::export::{export, ExportFormat, ExportResult};
use crate::storage::{DateRange, DayBucket, EventStore, TimestampKind};

/// One file behind a timeline bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    pub file_name: String,
    pub file_path: String,
}

/// Stateless query operations over an event store
pub struct TimelineService;

impl TimelineService {
    /// Filter by date range and kind, then count per day
    pub fn filter_and_aggregate(
        store: &EventStore,
        range: DateRange,
        kind: TimestampKind,
    ) -> Vec<DayBucket> {
        let filtered = filter(store, range, kind);
        let buckets = aggregate(filtered.iter().copied(), kind);

        tracing::debug!(
            %range,
            %kind,
            matched = filtered.len(),
            buckets = buckets.len(),
            "Timeline aggregated"
        );

        buckets
    }

    /// Files in one bucket, after applying the same range filter
    pub fn detail(
        store: &EventStore,
        range: DateRange,
        kind: TimestampKind,
        target: NaiveDate,
    ) -> Vec<DetailEntry> {
        let filtered = filter(store, range, kind);
        detail(filtered, target, kind)
            .into_iter()
            .map(|event| DetailEntry {
                file_name: event.file_name.clone(),
                file_path: event.file_path.clone(),
            })
            .collect()
    }

    /// Serialize the whole store, regardless of any filter in use
    pub fn export_all(store: &EventStore, format: ExportFormat) -> ExportResult<Vec<u8>> {
        export(store, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{day, event};

    fn scenario_store() -> EventStore {
        EventStore::from_events(vec![
            event("A", (2023, 6, 1), (2024, 1, 1), (2024, 3, 1)),
            event("B", (2023, 6, 1), (2024, 1, 1), (2024, 3, 1)),
            event("C", (2023, 6, 1), (2024, 1, 2), (2024, 3, 1)),
        ])
    }

    #[test]
    fn test_two_day_scenario() {
        let store = scenario_store();
        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 2));

        let buckets = TimelineService::filter_and_aggregate(&store, range, TimestampKind::Modified);
        assert_eq!(
            buckets,
            vec![
                DayBucket { date: day(2024, 1, 1), count: 2 },
                DayBucket { date: day(2024, 1, 2), count: 1 },
            ]
        );

        let files = TimelineService::detail(&store, range, TimestampKind::Modified, day(2024, 1, 1));
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(files[0].file_path, "/case/A");
    }

    #[test]
    fn test_empty_store_queries() {
        let store = EventStore::default();
        let range = DateRange::new(day(2000, 1, 1), day(2100, 1, 1));

        for kind in TimestampKind::all() {
            assert!(TimelineService::filter_and_aggregate(&store, range, *kind).is_empty());
            assert!(TimelineService::detail(&store, range, *kind, day(2024, 1, 1)).is_empty());
        }
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let store = scenario_store();
        let range = DateRange::new(day(2024, 1, 2), day(2024, 1, 1));

        assert!(TimelineService::filter_and_aggregate(&store, range, TimestampKind::Modified).is_empty());
        assert!(TimelineService::detail(&store, range, TimestampKind::Modified, day(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_detail_outside_range_is_empty() {
        let store = scenario_store();
        let range = DateRange::single_day(day(2024, 1, 2));

        let files = TimelineService::detail(&store, range, TimestampKind::Modified, day(2024, 1, 1));
        assert!(files.is_empty());
    }

    #[test]
    fn test_export_ignores_range() {
        let store = scenario_store();
        let bytes = TimelineService::export_all(&store, ExportFormat::Csv).unwrap();
        let events = crate::export::read_csv(bytes.as_slice()).unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_scanned_tree_end_to_end() {
        use chrono::{Local, TimeZone};
        use std::fs;

        let data = tempfile::tempdir().unwrap();
        let system = tempfile::tempdir().unwrap();

        let touch = |path: std::path::PathBuf, date: NaiveDate| {
            let file = fs::File::create(path).unwrap();
            let local = Local
                .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
                .single()
                .unwrap();
            file.set_modified(local.into()).unwrap();
        };
        touch(data.path().join("A"), day(2024, 1, 1));
        touch(data.path().join("B"), day(2024, 1, 1));
        touch(system.path().join("C"), day(2024, 1, 2));

        let store = EventStore::build(&[data.path(), system.path()]).unwrap();
        assert_eq!(store.len(), 3);

        let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 2));
        let buckets = TimelineService::filter_and_aggregate(&store, range, TimestampKind::Modified);
        assert_eq!(
            buckets,
            vec![
                DayBucket { date: day(2024, 1, 1), count: 2 },
                DayBucket { date: day(2024, 1, 2), count: 1 },
            ]
        );

        let mut names: Vec<_> =
            TimelineService::detail(&store, range, TimestampKind::Modified, day(2024, 1, 1))
                .into_iter()
                .map(|f| f.file_name)
                .collect();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);

        let bytes = TimelineService::export_all(&store, ExportFormat::Csv).unwrap();
        let reparsed = crate::export::read_csv(bytes.as_slice()).unwrap();
        assert_eq!(reparsed, store.events());
    }
}
