use crate::commands::{adr_count, AdrPaths, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DirectoryNode;
use crate::site;
use std::path::Path;

/// Writes the static site for `tree`. `output_dir` overrides the configured one.
pub fn run(tree: &DirectoryNode, paths: &AdrPaths, output_dir: Option<&Path>) -> Result<CmdResult> {
    let output_dir = output_dir.unwrap_or(paths.output_dir.as_path());
    let report = site::export(tree, &paths.content_dir, output_dir, &paths.asset_dir)?;

    let mut result = CmdResult::default();
    if report.pages == 0 {
        result.add_message(CmdMessage::warning("No ADRs found, exported an empty site."));
    }
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        adr_count(report.pages),
        output_dir.display()
    )));
    if report.assets.failed > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} asset{} could not be copied",
            report.assets.failed,
            if report.assets.failed == 1 { "" } else { "s" }
        )));
    }
    Ok(result.with_export(report))
}
