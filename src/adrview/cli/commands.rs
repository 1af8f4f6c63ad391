//! # CLI Dispatch
//!
//! The CLI is one client of [`AdrApi`]. This module is the only place that
//! knows about stdout and argument parsing:
//!
//! - `run()`: parse, set up logging and context, dispatch
//! - `init_context()`: layered config plus `--content`, then the API
//! - `handle_*()`: call the API and print the result as text or JSON
//!
//! Business rules live in the library; handlers only choose what to print.

use super::render::{
    print_messages, render_hits, render_lexicon, render_list, render_record, render_stats,
    render_tree,
};
use super::setup::{init_logging, Cli, Commands, OutputFormat};
use adrview::api::AdrApi;
use adrview::commands::{list::ListFilter, CmdResult};
use adrview::config::AdrConfig;
use adrview::error::Result;
use adrview::model::Status;
use adrview::source::FsSource;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

struct AppContext {
    api: AdrApi<FsSource>,
    output: OutputFormat,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command.clone().unwrap_or_default() {
        Commands::List { status, category } => handle_list(&ctx, status, category),
        Commands::Tree => handle_tree(&ctx),
        Commands::Search { terms } => handle_search(&ctx, terms),
        Commands::View { id } => handle_view(&ctx, &id),
        Commands::Stats => handle_stats(&ctx),
        Commands::Export { out } => handle_export(&ctx, out),
        Commands::Lexicon { lang } => handle_lexicon(&ctx, lang.as_deref()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let mut config = AdrConfig::load(cli.config.as_deref())?;
    if let Some(content) = &cli.content {
        config.content_dir = content.clone();
    }
    debug!(content_dir = %config.content_dir.display(), "resolved configuration");

    let filter = config.file_filter()?;
    let lexicon = config.load_lexicon()?;
    let api = AdrApi::new(FsSource::new(), config.paths(), filter, lexicon);

    Ok(AppContext {
        api,
        output: cli.output,
    })
}

/// Prints the JSON form of `result` or, for text output, the rendered body
/// followed by any messages.
fn emit(ctx: &AppContext, result: &CmdResult, body: impl FnOnce(&CmdResult) -> String) -> Result<()> {
    match ctx.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        OutputFormat::Text => {
            let text = body(result);
            if !text.is_empty() {
                print!("{}", text);
            }
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn handle_list(ctx: &AppContext, status: Option<Status>, category: Option<String>) -> Result<()> {
    let filter = ListFilter { status, category };
    let result = ctx.api.list(&filter)?;
    emit(ctx, &result, |r| render_list(&r.listed))
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.tree()?;
    emit(ctx, &result, |r| r.tree.as_ref().map(render_tree).unwrap_or_default())
}

fn handle_search(ctx: &AppContext, terms: Vec<String>) -> Result<()> {
    let query = terms.join(" ");
    let result = ctx.api.search(&query)?;
    emit(ctx, &result, |r| render_hits(&r.hits))
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view(id)?;
    emit(ctx, &result, |r| {
        r.records.iter().map(render_record).collect::<Vec<_>>().join("\n")
    })
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    emit(ctx, &result, |r| r.stats.as_ref().map(render_stats).unwrap_or_default())
}

fn handle_export(ctx: &AppContext, out: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.export(out.as_deref())?;
    emit(ctx, &result, |_| String::new())
}

fn handle_lexicon(ctx: &AppContext, lang: Option<&str>) -> Result<()> {
    let result = ctx.api.lexicon(lang)?;
    emit(ctx, &result, |r| render_lexicon(&r.lexicon))
}
