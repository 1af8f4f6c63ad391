//! # Content Sources
//!
//! Discovery never touches `std::fs` directly. It goes through a
//! [`ContentSource`], which answers three questions about paths: what is in this
//! directory, what kind of entry is this, and what does this file contain.
//!
//! - [`FsSource`]: the real filesystem.
//! - [`MemSource`]: an in-memory tree for tests, able to simulate listing,
//!   stat and read failures on chosen paths.
//!
//! Errors are plain [`std::io::Error`]s. Deciding whether a failure is fatal or
//! merely logged is the caller's job (see [`crate::discover`]).

mod fs;
mod memory;

pub use fs::FsSource;
pub use memory::MemSource;

use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices and anything else that is neither.
    Other,
}

pub trait ContentSource {
    /// Names of the entries directly inside `dir`. Order is whatever the source
    /// reports and is not guaranteed to be sorted.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Kind of the entry at `path`. Symlinks are followed.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}
