use crate::commands::{CmdMessage, CmdResult};
use crate::model::DirectoryNode;
use crate::stats::stats;

pub fn run(tree: &DirectoryNode) -> CmdResult {
    let mut result = CmdResult::default();
    if tree.is_empty() {
        result.add_message(CmdMessage::info("No ADRs found."));
    }
    result.with_stats(stats(tree))
}
