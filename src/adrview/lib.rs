//! # adrview Architecture
//!
//! adrview turns a directory of Architectural Decision Records (markdown files)
//! into structured, searchable data and a pre-rendered static site. It is a
//! library with a thin CLI client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, loads config, renders results          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Rediscovers the tree, dispatches to commands             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list, tree, search, view, stats, export, lexicon         │
//! │  - Return CmdResult, never print                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (discover, parse, search, highlight, stats, site)     │
//! │  - Discovery over a ContentSource, metadata parsing,        │
//! │    tree filtering, static export                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                                     │
//! │  - ContentSource trait                                      │
//! │  - FsSource (production), MemSource (testing)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! filesystem → [`discover`] (+ [`parse`]) → [`model::DirectoryNode`] tree →
//! [`search`] on a query → filtered tree → CLI rendering or [`site`] export.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; installing a subscriber is the
//! binary's business.
//!
//! ## Module Overview
//!
//! - **[`api`]**: Facade, generic over the content source
//! - **[`commands`]**: One module per operation
//! - **[`model`]**: `Status`, `Record`, `DirectoryNode`
//! - **[`lexicon`]**: Multilingual keyword tables
//! - **[`parse`]**: Metadata extraction from markdown prose
//! - **[`source`]**: Filesystem and in-memory content sources
//! - **[`discover`]**: File filter and tree building
//! - **[`search`]**: Conjunctive filtering of the tree
//! - **[`highlight`]**: Plain/match segments for query terms
//! - **[`stats`]**: Dashboard numbers
//! - **[`assets`]**: Image mirroring
//! - **[`site`]**: Static export
//! - **[`config`]**: Layered configuration
//! - **[`error`]**: Error types

pub mod api;
pub mod assets;
pub mod commands;
pub mod config;
pub mod discover;
pub mod error;
pub mod highlight;
pub mod lexicon;
pub mod model;
pub mod parse;
pub mod search;
pub mod site;
pub mod source;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_utils;
