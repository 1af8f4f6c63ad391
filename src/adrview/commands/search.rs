use crate::commands::{adr_count, CmdMessage, CmdResult, SearchHit};
use crate::highlight::{highlight, matching_lines};
use crate::model::{DirectoryNode, RecordSummary};
use crate::search::{count, search, search_terms};

/// Highlighted content lines kept per hit.
pub const MAX_LINES_PER_HIT: usize = 3;

pub fn run(tree: &DirectoryNode, query: &str) -> CmdResult {
    let terms = search_terms(query);
    let filtered = search(tree, query);

    let hits = filtered
        .flatten()
        .iter()
        .map(|record| SearchHit {
            record: RecordSummary::from(record),
            title: highlight(&record.title, &terms),
            lines: matching_lines(&record.content, &terms, MAX_LINES_PER_HIT),
        })
        .collect();

    let mut result = CmdResult::default();
    let total = count(&filtered);
    if terms.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Empty query, showing all {}.",
            adr_count(total)
        )));
    } else if total == 0 {
        result.add_message(CmdMessage::info(format!(
            "No ADRs match '{}'.",
            query.trim()
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} match{} '{}'.",
            adr_count(total),
            if total == 1 { "es" } else { "" },
            query.trim()
        )));
    }

    result.with_hits(hits).with_tree(filtered.into_owned())
}
