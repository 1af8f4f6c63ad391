//! # Static Export
//!
//! Writes a pre-rendered site for a discovered tree:
//!
//! ```text
//! <output>/
//! ├── index.json              tree, flattened summaries, stats
//! ├── adr/<id>.html           one page per record
//! └── <asset_dir>/...         mirrored images (see [`crate::assets`])
//! ```
//!
//! Markdown goes through `pulldown-cmark`. Relative image references are
//! rewritten to point into the asset directory, which mirrors the content
//! tree, so `![](img/flow.png)` in `backend/0002.md` becomes
//! `../<asset_dir>/backend/img/flow.png`.
//!
//! Pages are rendered in parallel. Record ids are file stems, so two files with
//! the same name in different directories write the same page; the later one
//! wins and a warning is logged.

use crate::assets::{mirror_images, AssetReport};
use crate::error::Result;
use crate::model::{DirectoryNode, Record, RecordSummary};
use crate::stats::{stats, Stats};
use chrono::Utc;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const INDEX_FILE: &str = "index.json";
pub const PAGES_DIR: &str = "adr";

#[derive(Debug, Serialize)]
pub struct SiteIndex<'a> {
    pub generated_at: String,
    pub tree: &'a DirectoryNode,
    pub records: Vec<RecordSummary>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub index: PathBuf,
    pub pages: usize,
    pub assets: AssetReport,
}

pub fn export(
    tree: &DirectoryNode,
    content_root: &Path,
    output_dir: &Path,
    asset_dir: &str,
) -> Result<ExportReport> {
    let records = tree.flatten();
    warn_duplicate_ids(&records);

    let pages_dir = output_dir.join(PAGES_DIR);
    fs::create_dir_all(&pages_dir)?;

    let index = SiteIndex {
        generated_at: Utc::now().to_rfc3339(),
        tree,
        records: records.iter().map(RecordSummary::from).collect(),
        stats: stats(tree),
    };
    let index_path = output_dir.join(INDEX_FILE);
    fs::write(&index_path, serde_json::to_string_pretty(&index)?)?;

    records
        .par_iter()
        .map(|record| {
            let page = render_page(record, content_root, asset_dir);
            fs::write(pages_dir.join(format!("{}.html", record.id)), page)
        })
        .collect::<std::io::Result<Vec<_>>>()?;
    debug!(pages = records.len(), dir = %pages_dir.display(), "rendered pages");

    let assets = mirror_images(content_root, &output_dir.join(asset_dir));

    Ok(ExportReport {
        index: index_path,
        pages: records.len(),
        assets,
    })
}

fn warn_duplicate_ids(records: &[Record]) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            warn!(id = %record.id, path = %record.path.display(), "Duplicate ADR id, page will be overwritten");
        }
    }
}

fn is_relative_url(url: &str) -> bool {
    !(url.is_empty() || url.starts_with('/') || url.starts_with('#') || url.contains("://") || url.starts_with("data:"))
}

/// Directory of `record` relative to the content root, `/`-separated.
fn record_dir(record: &Record, content_root: &Path) -> String {
    record
        .path
        .parent()
        .and_then(|parent| parent.strip_prefix(content_root).ok())
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

/// Renders markdown to an HTML fragment, pointing relative images at the
/// mirrored asset directory.
pub fn render_markdown(markdown: &str, image_base: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_relative_url(&dest_url) => {
            let relative = dest_url.trim_start_matches("./");
            Event::Start(Tag::Image {
                link_type,
                dest_url: CowStr::from(format!("{}/{}", image_base, relative)),
                title,
                id,
            })
        }
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    pulldown_cmark_escape::escape_html(&mut out, text)
        .map(|()| out)
        .unwrap_or_default()
}

pub fn render_page(record: &Record, content_root: &Path, asset_dir: &str) -> String {
    let dir = record_dir(record, content_root);
    let image_base = if dir.is_empty() {
        format!("../{}", asset_dir)
    } else {
        format!("../{}/{}", asset_dir, dir)
    };

    let mut meta = format!(
        "<span class=\"status status-{}\">{}</span>",
        record.status.color(),
        record.status
    );
    if let Some(date) = &record.date {
        meta.push_str(&format!(" <time>{}</time>", escape_html(date)));
    }
    if let Some(category) = &record.category {
        meta.push_str(&format!(" <span class=\"category\">{}</span>", escape_html(category)));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<header data-adr-id=\"{id}\">{meta}</header>\n<article>\n{body}</article>\n</body>\n</html>\n",
        title = escape_html(&record.title),
        id = escape_html(&record.id),
        meta = meta,
        body = render_markdown(&record.content, &image_base),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Status, ROOT_NAME};
    use tempfile::tempdir;

    fn record(root: &Path, rel: &str, content: &str) -> Record {
        let path = root.join(rel);
        Record {
            id: Record::id_from_file_name(&path.file_name().unwrap().to_string_lossy()),
            title: "Use <Rust> & friends".to_string(),
            status: Status::Accepted,
            date: Some("2024-01-15".to_string()),
            category: None,
            path,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_render_markdown_rewrites_relative_images() {
        let html = render_markdown("![flow](./img/flow.png) ![x](https://e.com/x.png)", "../assets/backend");
        assert!(html.contains("src=\"../assets/backend/img/flow.png\""));
        assert!(html.contains("src=\"https://e.com/x.png\""));
    }

    #[test]
    fn test_render_markdown_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n", "..");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_render_page_escapes_metadata() {
        let root = Path::new("/adr");
        let page = render_page(&record(root, "backend/0002-db.md", "# Body"), root, "adr-assets");
        assert!(page.contains("<title>Use &lt;Rust&gt; &amp; friends</title>"));
        assert!(page.contains("status-green"));
        assert!(page.contains("<time>2024-01-15</time>"));
        assert!(page.contains("<h1>Body</h1>"));
    }

    #[test]
    fn test_render_page_escapes_attribute_values() {
        let root = Path::new("/adr");
        let mut rec = record(root, "x.md", "");
        rec.id = "0001-\"quoted\"".to_string();
        rec.category = Some("<ops>".to_string());
        let page = render_page(&rec, root, "adr-assets");
        assert!(page.contains("data-adr-id=\"0001-&quot;quoted&quot;\""));
        assert!(page.contains("<span class=\"category\">&lt;ops&gt;</span>"));
    }

    #[test]
    fn test_record_dir() {
        let root = Path::new("/adr");
        assert_eq!(record_dir(&record(root, "a/b/x.md", ""), root), "a/b");
        assert_eq!(record_dir(&record(root, "x.md", ""), root), "");
    }

    #[test]
    fn test_export_writes_index_pages_and_assets() {
        let content = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir_all(content.path().join("ops")).unwrap();
        fs::write(content.path().join("ops/diagram.png"), [1u8]).unwrap();

        let mut tree = DirectoryNode::new(ROOT_NAME, content.path());
        tree.records.push(record(content.path(), "0001-a.md", "# A\n![d](ops/diagram.png)"));
        let mut ops = DirectoryNode::new("ops", content.path().join("ops"));
        ops.records.push(record(content.path(), "ops/0002-b.md", "# B"));
        tree.subdirectories.push(ops);

        let report = export(&tree, content.path(), out.path(), "adr-assets").unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.assets.copied.len(), 1);
        assert!(out.path().join("adr/0001-a.html").is_file());
        assert!(out.path().join("adr/0002-b.html").is_file());
        assert!(out.path().join("adr-assets/ops/diagram.png").is_file());

        let page = fs::read_to_string(out.path().join("adr/0001-a.html")).unwrap();
        assert!(page.contains("src=\"../adr-assets/ops/diagram.png\""));

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.index).unwrap()).unwrap();
        assert_eq!(index["records"].as_array().unwrap().len(), 2);
        assert_eq!(index["stats"]["total"], 2);
        assert_eq!(index["tree"]["name"], ROOT_NAME);
    }
}
