//! Date-range filter
//!
//! Selects the records whose chosen timestamp falls within an inclusive
//! range of days. Order follows the store.

use crate::storage::{DateRange, FileEvent, TimestampKind};

/// Select every record with `range.start <= date(kind) <= range.end`.
///
/// An inverted range selects nothing.
pub fn filter<'a, I>(events: I, range: DateRange, kind: TimestampKind) -> Vec<&'a FileEvent>
where
    I: IntoIterator<Item = &'a FileEvent>,
{
    if !range.is_valid() {
        tracing::debug!(%range, "Inverted date range, returning no events");
        return Vec::new();
    }

    events
        .into_iter()
        .filter(|event| range.contains(event.date(kind)))
        .collect()
}
