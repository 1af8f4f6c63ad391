//! # Metadata Parser
//!
//! Turns the loosely structured prose of an ADR into a [`Record`].
//!
//! ## What Gets Extracted
//!
//! ```text
//! # Use PostgreSQL            <-- title: first "# " line
//!
//! Date: 2024-03-10            <-- date: keyword line before the first "## "
//!
//! ## Status                   <-- status: "## " heading matching a status label
//!
//! Accepted                    <-- ...classified from the first non-blank line after it
//!
//! ## Context
//! ```
//!
//! ## Rules
//!
//! - One forward pass over the lines. Fenced code blocks (```` ``` ```` or `~~~`)
//!   are skipped entirely.
//! - Title: the first top-level heading wins, later ones are ignored.
//! - Status: only second-level headings are considered. The heading text must
//!   contain a status label from the [`Lexicon`] (case-insensitive substring).
//!   The first non-blank line after the heading is classified against the
//!   status synonym lists; the first resolved status sticks.
//! - Date: a date prefix in the file name (`2024-03-10-…`, `20240310-…`,
//!   `2024_03_10-…`, optionally behind a numeric prefix such as `0001-`) takes
//!   precedence and disables in-content detection. Otherwise any line before the
//!   first second-level heading containing a date label provides the date,
//!   either inline (`Date: 2024-03-10`) or from the next non-blank line.
//!   Recognized dates are normalized to `YYYY-MM-DD`, anything else is kept
//!   verbatim.
//! - Scanning stops as soon as title, status and date are all known.
//!
//! Label matching is substring based, so a heading such as `## Status Quo`
//! counts as a status section. A value candidate that is itself a heading is
//! treated as "no value".
//!
//! The parser does no I/O and never fails on content: missing pieces fall back to
//! [`UNTITLED`], [`Status::Unknown`] and `None`.

use crate::error::{AdrError, Result};
use crate::lexicon::{Field, Lexicon};
use crate::model::{Record, Status, UNTITLED};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// File name prefixes that carry a date, tried in order.
static FILE_NAME_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(\d{4})-(\d{2})-(\d{2})(?:[^0-9]|$)",
        r"^(\d{4})(\d{2})(\d{2})(?:[^0-9]|$)",
        r"^(\d{4})_(\d{2})_(\d{2})(?:[^0-9]|$)",
        r"^\d+[-_](\d{4})-(\d{2})-(\d{2})(?:[^0-9]|$)",
        r"^\d+[-_](\d{4})(\d{2})(\d{2})(?:[^0-9]|$)",
        r"^\d+[-_](\d{4})_(\d{2})_(\d{2})(?:[^0-9]|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("file name date pattern is valid"))
    .collect()
});

static CONTENT_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])(\d{4})[-/_.]?(\d{2})[-/_.]?(\d{2})(?:[^0-9]|$)")
        .expect("content date pattern is valid")
});

#[derive(Debug, Clone)]
pub struct MetadataParser {
    status_label: Option<Regex>,
    date_label: Option<Regex>,
    status_values: Vec<(Status, Vec<String>)>,
    content_root: Option<PathBuf>,
}

impl MetadataParser {
    /// Builds a parser that recognizes the labels and status values of `lexicon`.
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let status_values = Status::CLASSIFICATION_ORDER
            .iter()
            .map(|status| {
                let words = lexicon
                    .status_keywords(*status)
                    .into_iter()
                    .filter(|w| !w.trim().is_empty())
                    .map(str::to_lowercase)
                    .collect();
                (*status, words)
            })
            .collect();

        Ok(Self {
            status_label: label_regex(&lexicon.field_keywords(Field::Status))?,
            date_label: label_regex(&lexicon.field_keywords(Field::Date))?,
            status_values,
            content_root: None,
        })
    }

    /// Files directly inside `root` get no category.
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = Some(root.into());
        self
    }

    pub fn parse(&self, content: &str, file_name: &str, file_path: &Path) -> Record {
        let lines: Vec<&str> = content.lines().collect();

        let mut title: Option<String> = None;
        let mut status: Option<Status> = None;
        let mut date = date_from_file_name(file_name);
        let mut in_code_block = false;
        let mut seen_secondary_heading = false;

        for (i, line) in lines.iter().enumerate() {
            if title.is_some() && status.is_some() && date.is_some() {
                break;
            }

            if is_fence(line) {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }

            if let Some(rest) = line.strip_prefix("# ") {
                if title.is_none() {
                    title = Some(rest.trim().to_string());
                }
                continue;
            }

            if let Some(heading) = line.strip_prefix("## ") {
                seen_secondary_heading = true;
                if status.is_none() && self.is_status_heading(heading) {
                    status = next_value(&lines, i).map(|value| self.classify_status(value));
                }
                continue;
            }

            if date.is_none() && !seen_secondary_heading {
                if let Some(found) = self.date_label.as_ref().and_then(|re| re.find(line)) {
                    date = inline_value(&line[found.end()..])
                        .or_else(|| next_value(&lines, i))
                        .map(normalize_date);
                }
            }
        }

        Record {
            id: Record::id_from_file_name(file_name),
            title: title.unwrap_or_else(|| UNTITLED.to_string()),
            status: status.unwrap_or_default(),
            date,
            path: file_path.to_path_buf(),
            content: content.to_string(),
            category: extract_category(file_path, self.content_root.as_deref()),
        }
    }

    /// Maps free text such as "Approved by the board" onto a [`Status`].
    pub fn classify_status(&self, candidate: &str) -> Status {
        let candidate = candidate.to_lowercase();
        self.status_values
            .iter()
            .find(|(_, words)| words.iter().any(|w| candidate.contains(w.as_str())))
            .map(|(status, _)| *status)
            .unwrap_or(Status::Unknown)
    }

    fn is_status_heading(&self, heading: &str) -> bool {
        self.status_label
            .as_ref()
            .is_some_and(|re| re.is_match(heading))
    }
}

fn label_regex(keywords: &[&str]) -> Result<Option<Regex>> {
    let mut words: Vec<&str> = keywords
        .iter()
        .copied()
        .filter(|w| !w.trim().is_empty())
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    // Longest first so "mis à jour" wins over a shorter label sharing a prefix.
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("(?i)(?:{})", alternation);
    Regex::new(&pattern)
        .map(Some)
        .map_err(|source| AdrError::Pattern { pattern, source })
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// First non-blank line after `index`, unless that line is a heading.
fn next_value<'a>(lines: &[&'a str], index: usize) -> Option<&'a str> {
    lines
        .iter()
        .skip(index + 1)
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .filter(|l| !l.starts_with('#'))
}

/// Value written on the label line itself, e.g. the `2024-03-10` of
/// `**Date:** 2024-03-10`. Requires a colon or whitespace after the label.
fn inline_value(rest: &str) -> Option<&str> {
    let rest = rest.trim_start_matches(['*', '_']);
    let separated = rest.starts_with([':', '：']) || rest.starts_with(char::is_whitespace);
    if !separated {
        return None;
    }
    let value = rest
        .trim_start_matches(|c: char| c == ':' || c == '：' || c == '*' || c == '_' || c.is_whitespace())
        .trim_end_matches(['*', '_'])
        .trim();
    (!value.is_empty()).then_some(value)
}

fn valid_date(year: &str, month: &str, day: &str) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Extracts a `YYYY-MM-DD` date from a file name prefix.
pub fn date_from_file_name(file_name: &str) -> Option<String> {
    FILE_NAME_DATE_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(file_name)?;
        valid_date(&caps[1], &caps[2], &caps[3])
    })
}

/// Normalizes a recognizable date to `YYYY-MM-DD`; other text is returned trimmed.
pub fn normalize_date(value: &str) -> String {
    CONTENT_DATE
        .captures(value)
        .and_then(|caps| valid_date(&caps[1], &caps[2], &caps[3]))
        .unwrap_or_else(|| value.trim().to_string())
}

/// Name of the directory holding `file_path`, or `None` when that directory is
/// the content root (or there is no named parent at all).
pub fn extract_category(file_path: &Path, content_root: Option<&Path>) -> Option<String> {
    let parent = file_path.parent()?;
    if content_root.is_some_and(|root| root == parent) {
        return None;
    }
    parent
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
