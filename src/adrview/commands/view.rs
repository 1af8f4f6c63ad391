use crate::commands::CmdResult;
use crate::error::{AdrError, Result};
use crate::model::DirectoryNode;

pub fn run(tree: &DirectoryNode, id: &str) -> Result<CmdResult> {
    let record = tree
        .find(id)
        .ok_or_else(|| AdrError::NotFound(id.to_string()))?;
    Ok(CmdResult::default().with_records(vec![record.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::test_utils::sample_tree;

    #[test]
    fn test_view_nested_record() {
        let result = run(&sample_tree(), "0005-use-cockroach").unwrap();
        let record = &result.records[0];
        assert_eq!(record.title, "Use CockroachDB");
        assert_eq!(record.status, Status::Accepted);
        assert_eq!(record.category.as_deref(), Some("db"));
        assert!(record.content.starts_with("# Use CockroachDB"));
    }

    #[test]
    fn test_view_missing() {
        let err = run(&sample_tree(), "9999").unwrap_err();
        assert!(matches!(err, AdrError::NotFound(ref id) if id == "9999"));
        assert_eq!(err.to_string(), "ADR not found: 9999");
    }
}
