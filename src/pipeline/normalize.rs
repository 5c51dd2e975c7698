//! Text normalisation ahead of the extraction cascade.
//!
//! Result sheets come out of pdfium with stray bullets, pipes, colons and
//! zero-width characters between the columns. Two views are produced from
//! the same raw text:
//!
//! - `collapsed`: a single line with all whitespace runs collapsed. Scheme
//!   detection, the strict patterns and the token window read this.
//! - `lines`: the same cleanup applied per line, with line boundaries kept.
//!   Only the line heuristic reads this.
//!
//! ## Rule Order
//!
//! Invisible characters go first so they never split a code, then line
//! endings, then punctuation, then whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

/// Both views of a document's normalised text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    pub collapsed: String,
    pub lines: Vec<String>,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self {
            collapsed: normalize_text(raw),
            lines: normalize_lines(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }
}

/// Collapse to one line and drop punctuation outside `& ( ) - .`.
pub fn normalize_text(raw: &str) -> String {
    let s = remove_invisible_chars(raw);
    let s = collapse_whitespace(&s);
    let s = strip_punctuation(&s);
    collapse_whitespace(&s)
}

/// Same cleanup per line. Blank lines are dropped.
pub fn normalize_lines(raw: &str) -> Vec<String> {
    let s = remove_invisible_chars(raw);
    normalise_line_endings(&s)
        .lines()
        .map(|line| collapse_whitespace(&strip_punctuation(line)))
        .filter(|line| !line.is_empty())
        .collect()
}

// ── Rule 1: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        ['\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}'],
        "",
    )
}

// ── Rule 2: Normalise line endings ──────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Strip punctuation ───────────────────────────────────────────────

static RE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s&()\-.]").unwrap());

fn strip_punctuation(input: &str) -> String {
    RE_PUNCTUATION.replace_all(input, " ").into_owned()
}

// ── Rule 4: Collapse whitespace ─────────────────────────────────────────────

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn collapse_whitespace(input: &str) -> String {
    RE_WHITESPACE.replace_all(input.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn test_strip_punctuation_keeps_allowed() {
        assert_eq!(strip_punctuation("A&B (x) - 1.5"), "A&B (x) - 1.5");
        assert_eq!(strip_punctuation("BCS401|ADA:49,36"), "BCS401 ADA 49 36");
    }

    #[test]
    fn test_remove_invisible_chars() {
        assert_eq!(remove_invisible_chars("BCS\u{200B}401\u{FEFF}"), "BCS401");
    }

    #[test]
    fn test_normalize_text_single_line() {
        let raw = "Subject Code | Name\r\nBCS401 | ANALYSIS & DESIGN OF ALGORITHMS | 49 | 36 | 85 | P\n";
        assert_eq!(
            normalize_text(raw),
            "Subject Code Name BCS401 ANALYSIS & DESIGN OF ALGORITHMS 49 36 85 P"
        );
    }

    #[test]
    fn test_normalize_lines_keeps_boundaries() {
        let raw = "Header: VTU\r\n\r\nBCS401 | ADA | 49 | 36 | 85\nBCS402 * MC * 40 * 30 * 70";
        assert_eq!(
            normalize_lines(raw),
            vec!["Header VTU", "BCS401 ADA 49 36 85", "BCS402 MC 40 30 70"]
        );
    }

    #[test]
    fn test_empty_input() {
        let n = NormalizedText::new("  \n\t ");
        assert!(n.is_empty());
        assert!(n.lines.is_empty());
    }
}
