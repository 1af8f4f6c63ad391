use super::{ContentSource, EntryKind};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir,
}

/// In-memory content source for testing.
///
/// Built up front with the `with_*` methods and immutable afterwards, so it can
/// be shared across the worker threads discovery uses. Listings come back
/// sorted by name.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    nodes: BTreeMap<PathBuf, Node>,
    failing_listings: BTreeSet<PathBuf>,
    failing_stats: BTreeSet<PathBuf>,
    failing_reads: BTreeSet<PathBuf>,
}

fn simulated(path: &Path, what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("simulated {} failure: {}", what, path.display()),
    )
}

impl MemSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, creating any missing parent directories.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes
            .insert(path.to_path_buf(), Node::File(content.to_string()));
        self
    }

    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.add_ancestors(path);
        self.nodes.insert(path.to_path_buf(), Node::Dir);
        self
    }

    /// Listing `path` will fail with a permission error.
    pub fn fail_listing(mut self, path: impl AsRef<Path>) -> Self {
        self.failing_listings.insert(path.as_ref().to_path_buf());
        self
    }

    /// Asking for the kind of `path` will fail.
    pub fn fail_stat(mut self, path: impl AsRef<Path>) -> Self {
        self.failing_stats.insert(path.as_ref().to_path_buf());
        self
    }

    /// Reading `path` will fail.
    pub fn fail_read(mut self, path: impl AsRef<Path>) -> Self {
        self.failing_reads.insert(path.as_ref().to_path_buf());
        self
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
    }
}

impl ContentSource for MemSource {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        if self.failing_listings.contains(dir) {
            return Err(simulated(dir, "listing"));
        }
        match self.nodes.get(dir) {
            Some(Node::Dir) => Ok(self
                .nodes
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect()),
            Some(Node::File(_)) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {}", dir.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            )),
        }
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        if self.failing_stats.contains(path) {
            return Err(simulated(path, "stat"));
        }
        match self.nodes.get(path) {
            Some(Node::Dir) => Ok(EntryKind::Directory),
            Some(Node::File(_)) => Ok(EntryKind::File),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such entry: {}", path.display()),
            )),
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.failing_reads.contains(path) {
            return Err(simulated(path, "read"));
        }
        match self.nodes.get(path) {
            Some(Node::File(content)) => Ok(content.clone()),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )),
        }
    }
}
