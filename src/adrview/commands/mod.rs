//! # Command Layer
//!
//! Each command lives in its own submodule as a plain function over an already
//! discovered [`DirectoryNode`] (or a [`crate::lexicon::Lexicon`]) and returns a
//! [`CmdResult`]. Commands do no terminal output and know nothing about
//! arguments or exit codes; the CLI decides how to render what they return.
//!
//! [`CmdResult`] serializes directly, which is what `--output json` prints.
//! Empty sections are left out.
//!
//! ## Command Modules
//!
//! - [`list`]: flat listing with status/category filters, and the tree view
//! - [`search`]: conjunctive search with highlighted hits
//! - [`view`]: one full record
//! - [`stats`]: dashboard numbers
//! - [`export`]: static site
//! - [`lexicon`]: the keyword tables in use

use crate::highlight::{HighlightedLine, Segment};
use crate::model::{DirectoryNode, Record, RecordSummary};
use crate::site::ExportReport;
use crate::stats::Stats;
use serde::Serialize;
use std::path::PathBuf;

pub mod export;
pub mod lexicon;
pub mod list;
pub mod search;
pub mod stats;
pub mod view;

/// Where content is read from and where exports go.
#[derive(Debug, Clone)]
pub struct AdrPaths {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Relative to `output_dir`.
    pub asset_dir: String,
}

/// Severity of a [`CmdMessage`]. Failures are not messages; they come back as
/// [`crate::error::AdrError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn new(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, content)
    }
}

/// A record that matched a search, with its hits highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub record: RecordSummary,
    pub title: Vec<Segment>,
    pub lines: Vec<HighlightedLine>,
}

/// Keywords of one language for one field or status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    pub language: String,
    /// `status`, `date`, or a status name such as `Accepted`.
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub listed: Vec<RecordSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<DirectoryNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hits: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lexicon: Vec<LexiconEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listed: Vec<RecordSummary>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_tree(mut self, tree: DirectoryNode) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_export(mut self, export: ExportReport) -> Self {
        self.export = Some(export);
        self
    }

    pub fn with_lexicon(mut self, entries: Vec<LexiconEntry>) -> Self {
        self.lexicon = entries;
        self
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// `"1 ADR"`, `"3 ADRs"`.
pub(crate) fn adr_count(count: usize) -> String {
    format!("{} ADR{}", count, plural(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adr_count() {
        assert_eq!(adr_count(0), "0 ADRs");
        assert_eq!(adr_count(1), "1 ADR");
        assert_eq!(adr_count(12), "12 ADRs");
    }

    #[test]
    fn test_messages_serialize_level_in_lowercase() {
        let result = CmdResult::default().with_listed(Vec::new());
        assert_eq!(serde_json::to_string(&result).unwrap(), "{}");

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning("careful"));
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"messages":[{"level":"warning","content":"careful"}]}"#
        );
    }
}
