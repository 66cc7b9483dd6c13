//! Per-day aggregation
//!
//! Groups filtered records by date and counts them. The output is sparse:
//! days without records are not emitted.

use std::collections::BTreeMap;

use crate::storage::{DayBucket, FileEvent, TimestampKind};

/// Count records per `date(kind)`, ascending by date.
///
/// The counts always sum to the number of input records.
pub fn aggregate<'a, I>(events: I, kind: TimestampKind) -> Vec<DayBucket>
where
    I: IntoIterator<Item = &'a FileEvent>,
{
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for event in events {
        *counts.entry(event.date(kind)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(date, count)| DayBucket { date, count })
        .collect()
}
