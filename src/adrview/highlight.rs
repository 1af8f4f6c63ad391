//! Splits text into plain and matched segments for a set of query terms, so a
//! presentation layer can emphasize hits without knowing how matching works.

use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// A segment of text, either plain or a case-insensitive hit of a query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Match(String),
}

/// A line of a document that contains at least one hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedLine {
    /// 1-based.
    pub line_number: usize,
    pub segments: Vec<Segment>,
}

fn terms_regex<S: AsRef<str>>(terms: &[S]) -> Option<Regex> {
    let mut words: Vec<&str> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!("(?i)(?:{})", alternation)) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(error = %err, "Cannot highlight terms");
            None
        }
    }
}

fn split(text: &str, re: &Regex) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for found in re.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::Plain(text[last..found.start()].to_string()));
        }
        segments.push(Segment::Match(found.as_str().to_string()));
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(text[last..].to_string()));
    }
    segments
}

/// Without usable terms the whole text comes back as one plain segment.
pub fn highlight<S: AsRef<str>>(text: &str, terms: &[S]) -> Vec<Segment> {
    match terms_regex(terms) {
        Some(re) => split(text, &re),
        None => vec![Segment::Plain(text.to_string())],
    }
}

/// Lines of `text` containing a hit, highlighted, at most `limit` of them.
pub fn matching_lines<S: AsRef<str>>(text: &str, terms: &[S], limit: usize) -> Vec<HighlightedLine> {
    let Some(re) = terms_regex(terms) else {
        return Vec::new();
    };
    text.lines()
        .enumerate()
        .filter(|(_, line)| re.is_match(line))
        .take(limit)
        .map(|(idx, line)| HighlightedLine {
            line_number: idx + 1,
            segments: split(line.trim(), &re),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> Segment {
        Segment::Plain(s.to_string())
    }

    fn hit(s: &str) -> Segment {
        Segment::Match(s.to_string())
    }

    #[test]
    fn test_highlight_preserves_original_case() {
        assert_eq!(
            highlight("Use PostgreSQL for postgresql data", &["postgresql"]),
            vec![
                plain("Use "),
                hit("PostgreSQL"),
                plain(" for "),
                hit("postgresql"),
                plain(" data"),
            ]
        );
    }

    #[test]
    fn test_highlight_multiple_terms() {
        assert_eq!(
            highlight("rust and go", &["go", "rust"]),
            vec![hit("rust"), plain(" and "), hit("go")]
        );
    }

    #[test]
    fn test_regex_characters_are_literal() {
        assert_eq!(
            highlight("costs $5 (approx.)", &["(approx.)"]),
            vec![plain("costs $5 "), hit("(approx.)")]
        );
        assert_eq!(highlight("a.b", &["."]), vec![plain("a"), hit("."), plain("b")]);
    }

    #[test]
    fn test_blank_terms_give_single_plain_segment() {
        let none: [&str; 0] = [];
        assert_eq!(highlight("text", &none), vec![plain("text")]);
        assert_eq!(highlight("text", &["  "]), vec![plain("text")]);
    }

    #[test]
    fn test_no_hit_is_single_plain_segment() {
        assert_eq!(highlight("text", &["zzz"]), vec![plain("text")]);
    }

    #[test]
    fn test_matching_lines() {
        let text = "# Cache\n\nWe use Redis.\nNothing here.\nredis again\n";
        let lines = matching_lines(text, &["redis"], 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 3);
        assert_eq!(lines[0].segments, vec![plain("We use "), hit("Redis"), plain(".")]);
        assert_eq!(lines[1].line_number, 5);

        assert_eq!(matching_lines(text, &["redis"], 1).len(), 1);
    }

    #[test]
    fn test_segment_serialization() {
        let json = serde_json::to_string(&hit("x")).unwrap();
        assert_eq!(json, r#"{"kind":"match","text":"x"}"#);
    }
}
