//! Summary numbers for a dashboard view of a tree.

use crate::model::{DirectoryNode, Record, RecordSummary, Status};
use serde::Serialize;
use std::collections::BTreeMap;

/// Months kept in [`Stats::timeline`].
pub const TIMELINE_MONTHS: usize = 12;
/// Records kept in [`Stats::recent`].
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    /// Direct subdirectories of the root, plus one for the root itself.
    pub categories: usize,
    /// Every status is present, zero counts included.
    pub by_status: BTreeMap<Status, usize>,
    /// Oldest month first; only the latest [`TIMELINE_MONTHS`] buckets.
    pub timeline: Vec<MonthBucket>,
    /// Newest first, undated records last.
    pub recent: Vec<RecordSummary>,
}

/// `2024-03` for `2024-03-10`; `None` for dates that do not start `YYYY-MM`.
fn month_of(date: &str) -> Option<&str> {
    let month = date.get(..7)?;
    let bytes = month.as_bytes();
    let shaped = bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit);
    shaped.then_some(month)
}

pub fn stats(tree: &DirectoryNode) -> Stats {
    let records = tree.flatten();

    let mut by_status: BTreeMap<Status, usize> = Status::ALL.iter().map(|s| (*s, 0)).collect();
    for record in &records {
        *by_status.entry(record.status).or_default() += 1;
    }

    let mut months: BTreeMap<&str, usize> = BTreeMap::new();
    for month in records.iter().filter_map(|r| r.date.as_deref().and_then(month_of)) {
        *months.entry(month).or_default() += 1;
    }
    let skip = months.len().saturating_sub(TIMELINE_MONTHS);
    let timeline = months
        .into_iter()
        .skip(skip)
        .map(|(month, count)| MonthBucket {
            month: month.to_string(),
            count,
        })
        .collect();

    Stats {
        total: records.len(),
        categories: tree.subdirectories.len() + 1,
        by_status,
        timeline,
        recent: most_recent(&records, RECENT_LIMIT),
    }
}

/// Up to `limit` records, newest date first. Undated records sort last and
/// ties keep tree order.
pub fn most_recent(records: &[Record], limit: usize) -> Vec<RecordSummary> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| match (&a.date, &b.date) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted
        .into_iter()
        .take(limit)
        .map(RecordSummary::from)
        .collect()
}
