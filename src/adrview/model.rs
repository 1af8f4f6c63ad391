//! # Domain Model: Records and the Directory Tree
//!
//! This module defines the core data structures for adrview: [`Status`], [`Record`]
//! and [`DirectoryNode`].
//!
//! ## Records
//!
//! A [`Record`] is the structured form of one ADR markdown file. Everything except
//! `content` is derived: `id` from the file name, `title`/`status`/`date` from the
//! prose (see [`crate::parse`]), `category` from the parent directory. `content`
//! is the raw file text and is never rewritten.
//!
//! ## The Tree
//!
//! ```text
//! root                      <-- DirectoryNode { name: "root", .. }
//! ├── 0001-use-rust.md      <-- Record (category: None)
//! └── backend/              <-- DirectoryNode { name: "backend", .. }
//!     └── 0002-postgres.md  <-- Record (category: Some("backend"))
//! ```
//!
//! Nodes own their children outright; there are no parent links. Traversal is
//! always top-down, and a filtered tree is a fresh value rather than a view.
//! Directories that hold no records anywhere beneath them are never part of a
//! tree produced by discovery or search.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name given to the top-level node of a discovered tree.
pub const ROOT_NAME: &str = "root";

/// Title used when a document has no top-level heading.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Proposed,
    Accepted,
    Deprecated,
    Superseded,
    Rejected,
    Unknown,
}

impl Default for Status {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 6] = [
        Status::Proposed,
        Status::Accepted,
        Status::Deprecated,
        Status::Superseded,
        Status::Rejected,
        Status::Unknown,
    ];

    /// Order in which keyword lists are tried during classification. The first
    /// list with a hit wins.
    pub const CLASSIFICATION_ORDER: [Status; 6] = [
        Status::Accepted,
        Status::Deprecated,
        Status::Superseded,
        Status::Rejected,
        Status::Proposed,
        Status::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Proposed => "Proposed",
            Status::Accepted => "Accepted",
            Status::Deprecated => "Deprecated",
            Status::Superseded => "Superseded",
            Status::Rejected => "Rejected",
            Status::Unknown => "Unknown",
        }
    }

    /// Color name a presentation layer should use for a status badge.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Accepted => "green",
            Status::Rejected => "red",
            Status::Deprecated => "purple",
            Status::Superseded => "orange",
            Status::Proposed => "blue",
            Status::Unknown => "gray",
        }
    }

    /// Three letter tag for compact listings.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Status::Accepted => "ACC",
            Status::Rejected => "REJ",
            Status::Deprecated => "DEP",
            Status::Superseded => "SUP",
            Status::Proposed => "PRO",
            Status::Unknown => "UNK",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

/// One parsed ADR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub date: Option<String>,
    pub path: PathBuf,
    pub content: String,
    pub category: Option<String>,
}

impl Record {
    /// Derives a record id from a file name: the name with its extension stripped.
    ///
    /// Only the last extension goes, so `0003-api.draft.md` becomes `0003-api.draft`.
    pub fn id_from_file_name(file_name: &str) -> String {
        Path::new(file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string())
    }
}

/// A record without its body, for listings and indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub date: Option<String>,
    pub category: Option<String>,
}

impl From<&Record> for RecordSummary {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            status: record.status,
            date: record.date.clone(),
            category: record.category.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: PathBuf,
    pub records: Vec<Record>,
    pub subdirectories: Vec<DirectoryNode>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            records: Vec::new(),
            subdirectories: Vec::new(),
        }
    }

    /// True when the node holds neither records nor (non-empty) subdirectories.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.subdirectories.is_empty()
    }

    /// All records in the tree, depth-first: a node's own records come before
    /// those of its subdirectories.
    pub fn flatten(&self) -> Vec<Record> {
        let mut records = Vec::new();
        self.collect_into(&mut records);
        records
    }

    fn collect_into(&self, out: &mut Vec<Record>) {
        out.extend(self.records.iter().cloned());
        for subdir in &self.subdirectories {
            subdir.collect_into(out);
        }
    }

    /// Number of records in this node and every node beneath it.
    pub fn record_count(&self) -> usize {
        self.records.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryNode::record_count)
                .sum::<usize>()
    }

    /// Looks a record up by id anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id).or_else(|| {
            self.subdirectories
                .iter()
                .find_map(|subdir| subdir.find(id))
        })
    }
}
