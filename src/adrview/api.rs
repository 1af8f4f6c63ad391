//! # API Facade
//!
//! [`AdrApi`] is the single entry point for adrview operations. It owns a
//! [`ContentSource`], the file filter, the lexicon and the paths. Each call
//! rediscovers the tree and hands it to the matching command function.
//!
//! The facade does no business logic and no terminal output. Discovery runs on
//! every call; nothing is cached between calls, so every call reflects the
//! content on disk at that moment.
//!
//! ## Generic Over ContentSource
//!
//! - Production: `AdrApi<FsSource>`
//! - Testing: `AdrApi<MemSource>`

use crate::commands::{self, list::ListFilter, AdrPaths, CmdResult};
use crate::discover::{Discovery, FileFilter};
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::model::DirectoryNode;
use crate::source::ContentSource;
use std::path::Path;

pub use crate::commands::{CmdMessage, MessageLevel};

pub struct AdrApi<S: ContentSource> {
    source: S,
    paths: AdrPaths,
    filter: FileFilter,
    lexicon: Lexicon,
}

impl<S: ContentSource + Sync> AdrApi<S> {
    pub fn new(source: S, paths: AdrPaths, filter: FileFilter, lexicon: Lexicon) -> Self {
        Self {
            source,
            paths,
            filter,
            lexicon,
        }
    }

    pub fn paths(&self) -> &AdrPaths {
        &self.paths
    }

    /// Runs a fresh discovery pass over the content directory.
    pub fn discover(&self) -> Result<DirectoryNode> {
        Discovery::new(&self.source, self.filter.clone(), &self.lexicon)?
            .discover(&self.paths.content_dir)
    }

    pub fn list(&self, filter: &ListFilter) -> Result<CmdResult> {
        Ok(commands::list::run(&self.discover()?, filter))
    }

    pub fn tree(&self) -> Result<CmdResult> {
        Ok(commands::list::run_tree(&self.discover()?))
    }

    pub fn search(&self, query: &str) -> Result<CmdResult> {
        Ok(commands::search::run(&self.discover()?, query))
    }

    pub fn view(&self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.discover()?, id)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        Ok(commands::stats::run(&self.discover()?))
    }

    pub fn export(&self, output_dir: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.discover()?, &self.paths, output_dir)
    }

    pub fn lexicon(&self, lang: Option<&str>) -> Result<CmdResult> {
        Ok(commands::lexicon::run(&self.lexicon, lang))
    }
}
