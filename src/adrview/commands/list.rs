use crate::commands::{adr_count, CmdMessage, CmdResult};
use crate::model::{DirectoryNode, Record, RecordSummary, Status};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<Status>,
    /// Compared case-insensitively with the record's category.
    pub category: Option<String>,
}

impl ListFilter {
    pub fn accepts(&self, record: &Record) -> bool {
        let status_ok = self.status.map_or(true, |status| record.status == status);
        let category_ok = match (&self.category, &record.category) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
            (Some(_), None) => false,
        };
        status_ok && category_ok
    }

    fn is_empty(&self) -> bool {
        self.status.is_none() && self.category.is_none()
    }
}

pub fn run(tree: &DirectoryNode, filter: &ListFilter) -> CmdResult {
    let listed: Vec<RecordSummary> = tree
        .flatten()
        .iter()
        .filter(|record| filter.accepts(record))
        .map(RecordSummary::from)
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        if filter.is_empty() {
            result.add_message(CmdMessage::info("No ADRs found."));
        } else {
            result.add_message(CmdMessage::info("No ADRs match the given filters."));
        }
    }
    result.with_listed(listed)
}

/// The whole tree, for hierarchical display.
pub fn run_tree(tree: &DirectoryNode) -> CmdResult {
    let mut result = CmdResult::default();
    if tree.is_empty() {
        result.add_message(CmdMessage::info("No ADRs found."));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} in {} director{}",
            adr_count(tree.record_count()),
            directory_count(tree),
            if directory_count(tree) == 1 { "y" } else { "ies" }
        )));
    }
    result.with_tree(tree.clone())
}

fn directory_count(node: &DirectoryNode) -> usize {
    1 + node
        .subdirectories
        .iter()
        .map(directory_count)
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ROOT_NAME;
    use crate::test_utils::sample_tree;

    fn ids(result: &CmdResult) -> Vec<&str> {
        result.listed.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_list_all_in_tree_order() {
        let result = run(&sample_tree(), &ListFilter::default());
        assert_eq!(
            ids(&result),
            vec![
                "0001-record-decisions",
                "0002-use-rust",
                "2023-05-02-use-postgres",
                "0005-use-cockroach",
                "0004-use-react",
            ]
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_filter_by_status() {
        let filter = ListFilter {
            status: Some(Status::Accepted),
            ..Default::default()
        };
        let result = run(&sample_tree(), &filter);
        assert_eq!(ids(&result), vec!["0001-record-decisions", "0005-use-cockroach"]);
    }

    #[test]
    fn test_filter_by_category_ignores_case() {
        let filter = ListFilter {
            category: Some("Frontend".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&run(&sample_tree(), &filter)), vec!["0004-use-react"]);
    }

    #[test]
    fn test_no_match_message() {
        let filter = ListFilter {
            status: Some(Status::Deprecated),
            ..Default::default()
        };
        let result = run(&sample_tree(), &filter);
        assert!(result.listed.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("filters"));
    }

    #[test]
    fn test_empty_tree() {
        let result = run(&DirectoryNode::new(ROOT_NAME, "/x"), &ListFilter::default());
        assert_eq!(result.messages[0].content, "No ADRs found.");
    }

    #[test]
    fn test_tree_view() {
        let result = run_tree(&sample_tree());
        let tree = result.tree.as_ref().unwrap();
        assert_eq!(tree.record_count(), 5);
        assert_eq!(result.messages[0].content, "5 ADRs in 4 directories");
    }
}
