use adrview::model::Status;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overrides the log filter, e.g. `ADRVIEW_LOG=adrview=trace`.
pub const LOG_ENV: &str = "ADRVIEW_LOG";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adrview", bin_name = "adrview", version)]
#[command(about = "Browse, search and export Architectural Decision Records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// ADR content directory (overrides config)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub content: Option<PathBuf>,

    /// Config file to use instead of ./adrview.toml
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List ADRs (default command)
    #[command(alias = "ls")]
    List {
        /// Only ADRs with this status
        #[arg(long)]
        status: Option<Status>,

        /// Only ADRs in this category (parent directory name)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show ADRs grouped by directory
    Tree,

    /// Search ADRs; every term must match
    Search {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },

    /// Show one ADR in full
    View {
        /// ADR id (file name without extension)
        id: String,
    },

    /// Summary numbers
    Stats,

    /// Export a static site
    Export {
        /// Output directory (overrides config)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show the metadata keywords in use
    Lexicon {
        /// Only this language code
        #[arg(long)]
        lang: Option<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::List {
            status: None,
            category: None,
        }
    }
}

/// Installs the stderr subscriber. `ADRVIEW_LOG` wins; otherwise `warn`, or
/// `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
