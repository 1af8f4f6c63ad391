//! # Configuration
//!
//! adrview configuration is declared with [`confique`] and loaded in layers.
//!
//! ## Resolution Order
//!
//! Highest priority first:
//! 1. **Environment variables**: `ADRVIEW_CONTENT_DIR`, `ADRVIEW_OUTPUT_DIR`, `ADRVIEW_LEXICON`.
//! 2. **Local config**: `adrview.toml` in the working directory, or the file given with `--config`.
//! 3. **Global config**: `adrview.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! Command line flags such as `--content` are applied on top by the CLI.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `content_dir` | `content/adr` | Root of the ADR markdown tree |
//! | `output_dir` | `out` | Where `export` writes the site |
//! | `asset_dir` | `adr-assets` | Image mirror, relative to `output_dir` |
//! | `lexicon` | built-in | JSON file replacing the keyword tables |
//! | `filter.allowed_extensions` | `[".md"]` | File extensions loaded as ADRs |
//! | `filter.excluded_filenames` | `[]` | Exact file names to skip |
//! | `filter.excluded_patterns` | `[]` | Globs (`*` only) of file names to skip |

use crate::commands::AdrPaths;
use crate::discover::{normalize_extension, FileFilter};
use crate::error::{AdrError, Result};
use crate::lexicon::Lexicon;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "adrview.toml";

fn default_extensions() -> Vec<String> {
    vec![".md".to_string()]
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Extensions loaded as ADRs. When absent, defaults to [".md"].
    pub allowed_extensions: Option<Vec<String>>,
    pub excluded_filenames: Option<Vec<String>>,
    pub excluded_patterns: Option<Vec<String>>,
}

impl FilterConfig {
    /// Configured extensions, normalized to start with a dot.
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .clone()
            .unwrap_or_else(default_extensions)
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect()
    }

    pub fn build(&self) -> Result<FileFilter> {
        FileFilter::new(
            &self.allowed_extensions(),
            self.excluded_filenames.as_deref().unwrap_or_default(),
            self.excluded_patterns.as_deref().unwrap_or_default(),
        )
    }
}

/// Configuration for adrview, stored in `adrview.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdrConfig {
    #[config(env = "ADRVIEW_CONTENT_DIR", default = "content/adr")]
    pub content_dir: PathBuf,

    #[config(env = "ADRVIEW_OUTPUT_DIR", default = "out")]
    pub output_dir: PathBuf,

    #[config(default = "adr-assets")]
    pub asset_dir: String,

    /// JSON lexicon replacing the built-in keyword tables.
    #[config(env = "ADRVIEW_LEXICON")]
    pub lexicon: Option<PathBuf>,

    #[config(nested)]
    pub filter: FilterConfig,
}

impl Default for AdrConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content/adr"),
            output_dir: PathBuf::from("out"),
            asset_dir: "adr-assets".to_string(),
            lexicon: None,
            filter: FilterConfig::default(),
        }
    }
}

pub fn global_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "adrview").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl AdrConfig {
    /// Loads the layered configuration. An explicit file must exist; the
    /// implicit local and global files are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let local = match explicit {
            Some(path) if !path.is_file() => {
                return Err(AdrError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILE),
        };

        let mut files = vec![local];
        files.extend(global_config_file());
        Self::load_files(&files)
    }

    /// Environment first, then `files` in priority order. Missing files are skipped.
    pub fn load_files(files: &[PathBuf]) -> Result<Self> {
        let mut builder = Self::builder().env();
        for file in files {
            debug!(path = %file.display(), "config source");
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|err| AdrError::Config(err.to_string()))
    }

    pub fn file_filter(&self) -> Result<FileFilter> {
        self.filter.build()
    }

    /// The configured lexicon file, or the built-in tables.
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::default()),
        }
    }

    pub fn paths(&self) -> AdrPaths {
        AdrPaths {
            content_dir: self.content_dir.clone(),
            output_dir: self.output_dir.clone(),
            asset_dir: self.asset_dir.clone(),
        }
    }
}
