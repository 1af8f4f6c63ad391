//! Text rendering of command results.
//!
//! Every `render_*` function returns a `String` so output can be tested without
//! capturing stdout. Layout math (width, truncation, padding) is Unicode-aware,
//! since titles are often CJK.

use adrview::api::{CmdMessage, MessageLevel};
use adrview::commands::{LexiconEntry, SearchHit};
use adrview::highlight::Segment;
use adrview::model::{DirectoryNode, Record, RecordSummary, Status};
use adrview::stats::Stats;
use colored::{Color, ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const DATE_WIDTH: usize = 10;
const BAR_WIDTH: usize = 30;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Accepted => Color::Green,
        Status::Rejected => Color::Red,
        Status::Deprecated => Color::Magenta,
        Status::Superseded => Color::Yellow,
        Status::Proposed => Color::Blue,
        Status::Unknown => Color::BrightBlack,
    }
}

fn status_badge(status: Status) -> ColoredString {
    status.abbreviation().color(status_color(status))
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

/// One line per record: badge, id, title, date.
pub(super) fn render_list(records: &[RecordSummary]) -> String {
    let id_width = records.iter().map(|r| r.id.width()).max().unwrap_or(0);
    // badge + spaces between columns
    let fixed = 3 + 1 + id_width + 2 + 2 + DATE_WIDTH;
    let title_width = LINE_WIDTH.saturating_sub(fixed);

    let mut out = String::new();
    for record in records {
        let title = pad_to_width(&truncate_to_width(&record.title, title_width), title_width);
        let date = record.date.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{} {}  {}  {}\n",
            status_badge(record.status),
            pad_to_width(&record.id, id_width).yellow(),
            title,
            truncate_to_width(date, DATE_WIDTH).dimmed()
        ));
    }
    out
}

pub(super) fn render_tree(tree: &DirectoryNode) -> String {
    let mut out = String::new();
    render_node(tree, 0, &mut out);
    out
}

fn render_node(node: &DirectoryNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!(
        "{}{}/ {}\n",
        indent,
        node.name.bold(),
        format!("({})", node.record_count()).dimmed()
    ));
    for record in &node.records {
        out.push_str(&format!(
            "{}  {} {} {}\n",
            indent,
            status_badge(record.status),
            record.id.yellow(),
            record.title
        ));
    }
    for subdir in &node.subdirectories {
        render_node(subdir, depth + 1, out);
    }
}

fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain(text) => text.normal().to_string(),
            Segment::Match(text) => text.bold().yellow().to_string(),
        })
        .collect()
}

pub(super) fn render_hits(hits: &[SearchHit]) -> String {
    let mut out = String::new();
    for hit in hits {
        out.push_str(&format!(
            "{} {}  {}\n",
            status_badge(hit.record.status),
            hit.record.id.yellow(),
            render_segments(&hit.title)
        ));
        for line in &hit.lines {
            out.push_str(&format!(
                "    {} {}\n",
                format!("{:>4}:", line.line_number).dimmed(),
                render_segments(&line.segments)
            ));
        }
    }
    out
}

pub(super) fn render_record(record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", record.id.yellow(), record.title.bold()));
    let mut meta = vec![record.status.as_str().color(status_color(record.status)).to_string()];
    if let Some(date) = &record.date {
        meta.push(date.clone());
    }
    if let Some(category) = &record.category {
        meta.push(category.clone());
    }
    out.push_str(&format!("{}\n", meta.join(" · ")));
    out.push_str(&format!("{}\n", record.path.display().to_string().dimmed()));
    out.push_str("--------------------------------\n");
    out.push_str(&record.content);
    if !record.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub(super) fn render_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12}{}\n", "Total", stats.total));
    out.push_str(&format!("{:<12}{}\n", "Categories", stats.categories));
    out.push('\n');
    for (status, count) in &stats.by_status {
        out.push_str(&format!(
            "{} {:<12}{}\n",
            status_badge(*status),
            status.as_str(),
            count
        ));
    }

    if !stats.timeline.is_empty() {
        out.push_str("\nTimeline\n");
        let max = stats.timeline.iter().map(|b| b.count).max().unwrap_or(1).max(1);
        for bucket in &stats.timeline {
            let bar = (bucket.count * BAR_WIDTH).div_ceil(max);
            out.push_str(&format!("{}  {} {}\n", bucket.month, "█".repeat(bar).blue(), bucket.count));
        }
    }

    if !stats.recent.is_empty() {
        out.push_str("\nRecent\n");
        out.push_str(&render_list(&stats.recent));
    }
    out
}

pub(super) fn render_lexicon(entries: &[LexiconEntry]) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;
    for entry in entries {
        if current != Some(entry.language.as_str()) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", entry.language.bold()));
            current = Some(entry.language.as_str());
        }
        out.push_str(&format!("  {:<12}{}\n", entry.label, entry.keywords.join(", ")));
    }
    out
}
