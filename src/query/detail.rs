//! Per-day detail lookup
//!
//! Returns the records behind one bucket of an aggregate.

use chrono::NaiveDate;

use crate::storage::{FileEvent, TimestampKind};

/// Records with `date(kind) == target`, in their original relative order
pub fn detail<'a, I>(events: I, target: NaiveDate, kind: TimestampKind) -> Vec<&'a FileEvent>
where
    I: IntoIterator<Item = &'a FileEvent>,
{
    events
        .into_iter()
        .filter(|event| event.date(kind) == target)
        .collect()
}
