use crate::discover::{Discovery, FileFilter};
use crate::lexicon::Lexicon;
use crate::model::DirectoryNode;
use crate::source::MemSource;
use std::path::Path;

pub const CONTENT_ROOT: &str = "/content/adr";

/// A small ADR collection: two records at the root, two under `backend`
/// (one of them nested in `backend/db`) and one under `frontend`.
pub fn sample_source() -> MemSource {
    MemSource::new()
        .with_file(
            "/content/adr/0001-record-decisions.md",
            "# Record architecture decisions\n\nDate: 2023-01-10\n\n## Status\n\nAccepted\n\n## Context\n\nWe need a log of decisions.\n",
        )
        .with_file(
            "/content/adr/0002-use-rust.md",
            "# Use Rust\n\n## Status\n\nProposed\n\n## Decision\n\nWrite the core in Rust for memory safety.\n",
        )
        .with_file(
            "/content/adr/backend/2023-05-02-use-postgres.md",
            "# Use PostgreSQL\n\n## Status\n\nSuperseded by 0005\n\n## Context\n\nRelational data with strong consistency.\n",
        )
        .with_file(
            "/content/adr/backend/db/0005-use-cockroach.md",
            "# Use CockroachDB\n\nCreated: 2024-02-20\n\n## Status\n\nAccepted\n\nDistributed SQL, still speaks the postgres protocol.\n",
        )
        .with_file(
            "/content/adr/frontend/0004-use-react.md",
            "# Use React\n\n## Status\n\nRejected\n\nWe chose server rendering instead.\n",
        )
        .with_file("/content/adr/frontend/logo.png", "")
        .with_dir("/content/adr/drafts")
}

pub fn sample_tree() -> DirectoryNode {
    Discovery::new(&sample_source(), FileFilter::default(), &Lexicon::default())
        .expect("default lexicon builds a parser")
        .discover(Path::new(CONTENT_ROOT))
        .expect("sample content is readable")
}
