//! # Search / Filter Engine
//!
//! Conjunctive substring search over a [`DirectoryNode`] tree.
//!
//! A record matches when every query term occurs, case-insensitively, somewhere
//! in its title, content or category. The result is a pruned tree: matching
//! records keep their order, directories with no match anywhere beneath them
//! disappear, and ancestors of a match stay.
//!
//! A blank query is not a filter. [`search`] then hands back the input itself
//! as [`Cow::Borrowed`], so callers can tell "no filter" from "filtered" without
//! comparing trees. Any other query produces a fresh tree, the input is never
//! touched.

use crate::model::{DirectoryNode, Record};
use std::borrow::Cow;

/// Lowercased, whitespace-separated terms of `query`, duplicates removed,
/// first occurrence order kept.
pub fn search_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query.split_whitespace().map(str::to_lowercase) {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// True when every term appears in the record. `terms` must already be
/// lowercase, as returned by [`search_terms`].
pub fn matches(record: &Record, terms: &[String]) -> bool {
    let haystack = format!(
        "{} {} {}",
        record.title,
        record.content,
        record.category.as_deref().unwrap_or("")
    )
    .to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

pub fn search<'a>(tree: &'a DirectoryNode, query: &str) -> Cow<'a, DirectoryNode> {
    let terms = search_terms(query);
    if terms.is_empty() {
        return Cow::Borrowed(tree);
    }
    Cow::Owned(filter_node(tree, &terms))
}

fn filter_node(node: &DirectoryNode, terms: &[String]) -> DirectoryNode {
    DirectoryNode {
        name: node.name.clone(),
        path: node.path.clone(),
        records: node
            .records
            .iter()
            .filter(|record| matches(record, terms))
            .cloned()
            .collect(),
        subdirectories: node
            .subdirectories
            .iter()
            .map(|subdir| filter_node(subdir, terms))
            .filter(|subdir| !subdir.is_empty())
            .collect(),
    }
}

/// Total number of records in the tree.
pub fn count(tree: &DirectoryNode) -> usize {
    tree.record_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, ROOT_NAME};
    use std::path::PathBuf;

    fn record(id: &str, title: &str, content: &str, category: Option<&str>) -> Record {
        Record {
            id: id.to_string(),
            title: title.to_string(),
            status: Status::Accepted,
            date: None,
            path: PathBuf::from(format!("/adr/{}.md", id)),
            content: content.to_string(),
            category: category.map(String::from),
        }
    }

    fn dir(name: &str, records: Vec<Record>, subdirectories: Vec<DirectoryNode>) -> DirectoryNode {
        DirectoryNode {
            name: name.to_string(),
            path: PathBuf::from(format!("/adr/{}", name)),
            records,
            subdirectories,
        }
    }

    fn sample() -> DirectoryNode {
        dir(
            ROOT_NAME,
            vec![record("0001", "Use Rust", "Memory safety matters.", None)],
            vec![
                dir(
                    "backend",
                    vec![],
                    vec![dir(
                        "db",
                        vec![
                            record("0002", "Use PostgreSQL", "Relational data.", Some("db")),
                            record("0003", "Use Redis", "Cache layer in Rust.", Some("db")),
                        ],
                        vec![],
                    )],
                ),
                dir("frontend", vec![record("0004", "Use React", "UI.", Some("frontend"))], vec![]),
                dir("ops", vec![record("0005", "Use Nomad", "Scheduling.", Some("ops"))], vec![]),
            ],
        )
    }

    fn ids(tree: &DirectoryNode) -> Vec<String> {
        tree.flatten().into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_search_terms() {
        assert_eq!(search_terms("  Rust   cache rust "), vec!["rust", "cache"]);
        assert!(search_terms(" \t ").is_empty());
    }

    #[test]
    fn test_blank_query_returns_input() {
        let tree = sample();
        let result = search(&tree, "   ");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(result.as_ref(), &tree));
    }

    #[test]
    fn test_terms_are_anded() {
        let tree = sample();
        assert_eq!(ids(&search(&tree, "rust")), vec!["0001", "0003"]);
        assert_eq!(ids(&search(&tree, "RUST cache")), vec!["0003"]);
        assert!(ids(&search(&tree, "rust nomad")).is_empty());
    }

    #[test]
    fn test_category_is_searched() {
        let tree = sample();
        assert_eq!(ids(&search(&tree, "frontend")), vec!["0004"]);
    }

    #[test]
    fn test_prunes_branches_and_keeps_ancestors() {
        let tree = sample();
        let result = search(&tree, "postgresql");

        assert!(result.records.is_empty());
        assert_eq!(result.subdirectories.len(), 1);
        let backend = &result.subdirectories[0];
        assert_eq!(backend.name, "backend");
        assert!(backend.records.is_empty());
        assert_eq!(backend.subdirectories[0].name, "db");
        assert_eq!(count(&result), 1);
    }

    #[test]
    fn test_no_match_leaves_empty_root() {
        let tree = sample();
        let result = search(&tree, "kubernetes");
        assert_eq!(result.name, ROOT_NAME);
        assert!(result.is_empty());
        assert_eq!(count(&result), 0);
    }

    #[test]
    fn test_input_is_untouched() {
        let tree = sample();
        let before = tree.clone();
        let _ = search(&tree, "redis");
        assert_eq!(tree, before);
    }

    #[test]
    fn test_search_is_idempotent() {
        let tree = sample();
        let once = search(&tree, "use rust").into_owned();
        let twice = search(&once, "use rust").into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_count() {
        assert_eq!(count(&sample()), 5);
    }
}
