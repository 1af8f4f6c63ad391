//! # File Discovery
//!
//! Walks a content directory depth-first and builds the [`DirectoryNode`] tree.
//!
//! ## Per Directory
//!
//! 1. List the entries. A listing failure is logged and the directory becomes
//!    an empty node, which its parent then drops.
//! 2. Ask the source for the kind of every entry. Entries that cannot be
//!    inspected are logged and skipped.
//! 3. Files that pass the [`FileFilter`] are read and parsed in parallel. The
//!    results keep listing order, and the first read failure aborts the whole
//!    pass with [`AdrError::FileRead`].
//! 4. Subdirectories are visited in listing order; those without records
//!    anywhere beneath them are pruned.
//!
//! Directory failures are soft and file failures are hard. A tree with a
//! missing record is never returned.

use crate::error::{AdrError, Result};
use crate::lexicon::Lexicon;
use crate::model::{DirectoryNode, Record, ROOT_NAME};
use crate::parse::MetadataParser;
use crate::source::{ContentSource, EntryKind};
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decides which files are loaded as records.
#[derive(Debug, Clone)]
pub struct FileFilter {
    allowed_extensions: Vec<String>,
    excluded_filenames: Vec<String>,
    excluded_patterns: Vec<Regex>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".md".to_string()],
            excluded_filenames: Vec::new(),
            excluded_patterns: Vec::new(),
        }
    }
}

impl FileFilter {
    /// Builds a filter. Extensions get a leading dot when missing; patterns are
    /// globs where `*` matches any run of characters.
    pub fn new(
        allowed_extensions: &[String],
        excluded_filenames: &[String],
        excluded_patterns: &[String],
    ) -> Result<Self> {
        Ok(Self {
            allowed_extensions: allowed_extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            excluded_filenames: excluded_filenames.to_vec(),
            excluded_patterns: excluded_patterns
                .iter()
                .map(|p| glob_to_regex(p))
                .collect::<Result<_>>()?,
        })
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
            && !self.excluded_filenames.iter().any(|name| name == file_name)
            && !self.excluded_patterns.iter().any(|re| re.is_match(file_name))
    }
}

pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// `draft-*` becomes `^draft\-.*$`. Everything but `*` is literal.
pub fn glob_to_regex(glob: &str) -> Result<Regex> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    let pattern = format!("^{}$", body);
    Regex::new(&pattern).map_err(|source| AdrError::Pattern {
        pattern: glob.to_string(),
        source,
    })
}

pub struct Discovery<'a, S: ContentSource> {
    source: &'a S,
    filter: FileFilter,
    parser: MetadataParser,
}

impl<'a, S: ContentSource + Sync> Discovery<'a, S> {
    pub fn new(source: &'a S, filter: FileFilter, lexicon: &Lexicon) -> Result<Self> {
        Ok(Self {
            source,
            filter,
            parser: MetadataParser::new(lexicon)?,
        })
    }

    /// Builds the tree rooted at `root`. The root node is named [`ROOT_NAME`].
    pub fn discover(&self, root: &Path) -> Result<DirectoryNode> {
        let parser = self.parser.clone().with_content_root(root);
        let tree = self.scan_directory(root, ROOT_NAME, &parser)?;
        debug!(
            root = %root.display(),
            records = tree.record_count(),
            "discovery finished"
        );
        Ok(tree)
    }

    fn scan_directory(
        &self,
        dir: &Path,
        name: &str,
        parser: &MetadataParser,
    ) -> Result<DirectoryNode> {
        let mut node = DirectoryNode::new(name, dir);

        let entries = match self.source.list_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "Failed to scan directory");
                return Ok(node);
            }
        };

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        let mut subdirs: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let path = dir.join(&entry);
            match self.source.entry_kind(&path) {
                Ok(EntryKind::File) if self.filter.accepts(&entry) => files.push((entry, path)),
                Ok(EntryKind::File) | Ok(EntryKind::Other) => {}
                Ok(EntryKind::Directory) => subdirs.push((entry, path)),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable entry");
                }
            }
        }

        node.records = files
            .par_iter()
            .map(|(file_name, path)| self.load_record(parser, file_name, path))
            .collect::<Result<Vec<_>>>()?;

        for (sub_name, sub_path) in subdirs {
            let child = self.scan_directory(&sub_path, &sub_name, parser)?;
            if !child.is_empty() {
                node.subdirectories.push(child);
            }
        }

        debug!(
            path = %dir.display(),
            records = node.records.len(),
            subdirectories = node.subdirectories.len(),
            "scanned directory"
        );
        Ok(node)
    }

    fn load_record(&self, parser: &MetadataParser, file_name: &str, path: &Path) -> Result<Record> {
        let content = self
            .source
            .read_to_string(path)
            .map_err(|source| AdrError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(parser.parse(&content, file_name, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::source::MemSource;
    use std::collections::BTreeSet;

    fn discover(source: &MemSource) -> Result<DirectoryNode> {
        Discovery::new(source, FileFilter::default(), &Lexicon::default())
            .unwrap()
            .discover(Path::new("/adr"))
    }

    fn ids(node: &DirectoryNode) -> BTreeSet<String> {
        node.records.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> MemSource {
        MemSource::new()
            .with_file("/adr/0001-root.md", "# Root\n## Status\nAccepted\n")
            .with_file("/adr/README.txt", "not an adr")
            .with_file("/adr/backend/0002-db.md", "# DB\n## Status\nProposed\n")
            .with_file("/adr/backend/cache/0003-cache.md", "# Cache\n")
            .with_file("/adr/frontend/logo.png", "")
            .with_dir("/adr/empty")
    }

    #[test]
    fn test_builds_tree_and_prunes_empty_directories() {
        let tree = discover(&sample()).unwrap();

        assert_eq!(tree.name, ROOT_NAME);
        assert_eq!(tree.path, PathBuf::from("/adr"));
        assert_eq!(ids(&tree), BTreeSet::from(["0001-root".to_string()]));
        assert_eq!(tree.records[0].status, Status::Accepted);
        assert_eq!(tree.records[0].category, None);

        let names: Vec<&str> = tree.subdirectories.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["backend"]);

        let backend = &tree.subdirectories[0];
        assert_eq!(backend.records[0].category.as_deref(), Some("backend"));
        assert_eq!(backend.subdirectories.len(), 1);
        assert_eq!(backend.subdirectories[0].records[0].category.as_deref(), Some("cache"));
        assert_eq!(tree.record_count(), 3);
    }

    #[test]
    fn test_listing_failure_is_isolated() {
        let source = sample().fail_listing("/adr/backend");
        let tree = discover(&source).unwrap();

        assert_eq!(tree.record_count(), 1);
        assert!(tree.subdirectories.is_empty());
    }

    #[test]
    fn test_unlistable_root_gives_empty_tree() {
        let tree = discover(&MemSource::new()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.name, ROOT_NAME);
    }

    #[test]
    fn test_read_failure_aborts_the_pass() {
        let source = sample().fail_read("/adr/backend/cache/0003-cache.md");
        let err = discover(&source).unwrap_err();

        match err {
            AdrError::FileRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/adr/backend/cache/0003-cache.md"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_failure_message_names_file() {
        let source = sample().fail_read("/adr/0001-root.md");
        let err = discover(&source).unwrap_err();
        assert_eq!(err.to_string(), "Failed to load ADR: /adr/0001-root.md");
    }

    #[test]
    fn test_filtered_out_file_is_never_read() {
        let source = sample().fail_read("/adr/README.txt");
        assert!(discover(&source).is_ok());
    }

    #[test]
    fn test_stat_failure_skips_entry() {
        let source = sample().fail_stat("/adr/backend");
        let tree = discover(&source).unwrap();
        assert_eq!(tree.record_count(), 1);
    }

    #[test]
    fn test_records_keep_listing_order() {
        let source = MemSource::new()
            .with_file("/adr/a.md", "# A")
            .with_file("/adr/b.md", "# B")
            .with_file("/adr/c.md", "# C");
        let tree = discover(&source).unwrap();
        let titles: Vec<&str> = tree.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_rules() {
        let filter = FileFilter::new(
            &["md".to_string(), ".markdown".to_string()],
            &["README.md".to_string()],
            &["*.template.md".to_string(), "draft-*".to_string()],
        )
        .unwrap();

        assert!(filter.accepts("0001-x.md"));
        assert!(filter.accepts("notes.markdown"));
        assert!(!filter.accepts("notes.txt"));
        assert!(!filter.accepts("README.md"));
        assert!(!filter.accepts("adr.template.md"));
        assert!(!filter.accepts("draft-idea.md"));
        assert!(filter.accepts("my-draft-idea.md"));
    }

    #[test]
    fn test_glob_is_literal_apart_from_star() {
        let re = glob_to_regex("v1.(old)*").unwrap();
        assert!(re.is_match("v1.(old)-x.md"));
        assert!(!re.is_match("v1x(old).md"));
    }

    #[test]
    fn test_custom_filter_in_discovery() {
        let filter = FileFilter::new(&[".md".to_string()], &[], &["*-draft.md".to_string()]).unwrap();
        let source = MemSource::new()
            .with_file("/adr/0001-final.md", "# Final")
            .with_file("/adr/0002-draft.md", "# Draft");
        let tree = Discovery::new(&source, filter, &Lexicon::default())
            .unwrap()
            .discover(Path::new("/adr"))
            .unwrap();
        assert_eq!(ids(&tree), BTreeSet::from(["0001-final".to_string()]));
    }
}
