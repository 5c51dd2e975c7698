//! Extraction cascade: an ordered list of strategies, first non-empty wins.
//!
//! The oracle runs ahead of these (see [`crate::pipeline::oracle`]); this
//! module holds the local, CPU-bound strategies and the runner that walks
//! them. Every strategy reads [`NormalizedText`] and either returns at least
//! one [`RawRecord`] or `None`. An empty result is never a success.
//!
//! ```text
//! strict patterns ──none──▶ line heuristic ──none──▶ token window ──none──▶ no subjects
//! ```

use crate::pipeline::normalize::NormalizedText;
use crate::progress::ParseProgressCallback;
use crate::record::{parse_mark, RawRecord};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Which cascade stage produced a document's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Oracle,
    StrictPattern,
    LineHeuristic,
    TokenWindow,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Oracle => "oracle",
            Strategy::StrictPattern => "strict_pattern",
            Strategy::LineHeuristic => "line_heuristic",
            Strategy::TokenWindow => "token_window",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One local extraction strategy.
pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> Strategy;

    /// `None` when nothing was recovered.
    fn try_extract(&self, text: &NormalizedText) -> Option<Vec<RawRecord>>;
}

/// Records of one document keyed by code. A repeated code replaces the
/// earlier record.
pub fn collect_records(records: Vec<RawRecord>) -> BTreeMap<String, RawRecord> {
    let mut map = BTreeMap::new();
    for record in records {
        let code = record.code.clone();
        if let Some(previous) = map.insert(code, record) {
            debug!(
                "Duplicate code {}: keeping the later occurrence (earlier total {})",
                previous.code, previous.total
            );
        }
    }
    map
}

// ── Code patterns ───────────────────────────────────────────────────────────

/// `BCS401`, `BCSL404`, `BCS515A`.
const STANDARD_CODE: &str = r"\b([A-Z]{3,4}\d{3}[A-Z]?)";
/// `21CS301`, `18MA11`.
const LEGACY_CODE: &str = r"\b(\d{2}[A-Z]{2,4}\d{2,3}[A-Z]?)";
/// Anything code-shaped: 2-5 letters then 2-4 digits.
const LOOSE_CODE: &str = r"\b([A-Z]{2,5}\d{2,4}[A-Z]?)";

const NAME: &str = r"([A-Z &]+(?: [A-Z]+)*)";
const MARKS: &str = r"(\d+)\s+(\d+)\s+(\d+)";

fn ci(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("static extraction pattern")
}

// ── Strategy: strict patterns ───────────────────────────────────────────────

/// How a template's capture groups map onto a record.
#[derive(Debug, Clone, Copy)]
enum Shape {
    /// code, name, internal, external, total, flag
    NamedWithFlag,
    /// code, name, internal, external, total
    Named,
    /// code, internal, external, total
    Bare,
}

struct Template {
    regex: Regex,
    shape: Shape,
}

static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    let t = |pattern: String, shape| Template {
        regex: ci(&pattern),
        shape,
    };
    vec![
        t(format!(r"{STANDARD_CODE}\s+{NAME}\s+{MARKS}\s+([PFAXWNE])\b"), Shape::NamedWithFlag),
        t(format!(r"{STANDARD_CODE}\s+{NAME}\s+{MARKS}\s+([A-Z]+)\b"), Shape::NamedWithFlag),
        t(format!(r"{STANDARD_CODE}\s+([A-Z &]+)\s+{MARKS}"), Shape::Named),
        t(format!(r"{LEGACY_CODE}\s+{NAME}\s+{MARKS}\s+([PFAXWNE])\b"), Shape::NamedWithFlag),
        t(format!(r"{LEGACY_CODE}\s+{NAME}\s+{MARKS}"), Shape::Named),
        t(format!(r"{LOOSE_CODE}\s+{NAME}\s+{MARKS}"), Shape::Named),
        t(format!(r"{LOOSE_CODE}[^0-9]*?(\d+)[^0-9]+(\d+)[^0-9]+(\d+)"), Shape::Bare),
    ]
});

fn record_from_captures(caps: &Captures<'_>, shape: Shape) -> RawRecord {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    match shape {
        Shape::NamedWithFlag => RawRecord::new(
            group(1),
            group(2),
            parse_mark(group(3)),
            parse_mark(group(4)),
            parse_mark(group(5)),
        )
        .with_flag(group(6)),
        Shape::Named => RawRecord::new(
            group(1),
            group(2),
            parse_mark(group(3)),
            parse_mark(group(4)),
            parse_mark(group(5)),
        ),
        Shape::Bare => RawRecord::new(
            group(1),
            "",
            parse_mark(group(2)),
            parse_mark(group(3)),
            parse_mark(group(4)),
        ),
    }
}

/// Ordered regular-expression templates over the collapsed text, most
/// specific first. The first template with any match supplies every record;
/// matches are never merged across templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictPatternStrategy;

impl ExtractionStrategy for StrictPatternStrategy {
    fn kind(&self) -> Strategy {
        Strategy::StrictPattern
    }

    fn try_extract(&self, text: &NormalizedText) -> Option<Vec<RawRecord>> {
        TEMPLATES.iter().enumerate().find_map(|(idx, template)| {
            let records: Vec<RawRecord> = template
                .regex
                .captures_iter(&text.collapsed)
                .map(|caps| record_from_captures(&caps, template.shape))
                .collect();
            if records.is_empty() {
                None
            } else {
                debug!("Strict template {} matched {} rows", idx + 1, records.len());
                Some(records)
            }
        })
    }
}

// ── Strategy: line heuristic ────────────────────────────────────────────────

static LINE_CODE_PATTERNS: Lazy<[Regex; 3]> =
    Lazy::new(|| [ci(LOOSE_CODE), ci(LEGACY_CODE), ci(STANDARD_CODE)]);
static RE_WHOLE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());
static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static RE_NAME_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s&]").unwrap());
static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const MAX_NAME_CHARS: usize = 50;

/// Line-by-line scan: a code, then the first three whole numbers on the line
/// taken as internal, external and total. Lines whose total is further than
/// `tolerance` from internal + external are discarded.
#[derive(Debug, Clone, Copy)]
pub struct LineHeuristicStrategy {
    pub tolerance: u32,
    pub min_line_len: usize,
}

impl Default for LineHeuristicStrategy {
    fn default() -> Self {
        Self {
            tolerance: 5,
            min_line_len: 10,
        }
    }
}

impl LineHeuristicStrategy {
    fn extract_line(&self, line: &str) -> Option<RawRecord> {
        let line = line.trim();
        if line.chars().count() < self.min_line_len {
            return None;
        }

        let code = LINE_CODE_PATTERNS
            .iter()
            .find_map(|re| re.captures(line))
            .and_then(|caps| caps.get(1))?;

        let numbers: Vec<u32> = RE_WHOLE_NUMBER
            .find_iter(line)
            .take(3)
            .map(|m| parse_mark(m.as_str()))
            .collect();
        let [internal, external, total] = numbers[..] else {
            return None;
        };

        if total.abs_diff(internal.saturating_add(external)) > self.tolerance {
            debug!(
                "Discarding line for {}: {internal} + {external} does not add up to {total}",
                code.as_str()
            );
            return None;
        }

        let rest = RE_DIGITS.replace_all(&line[code.end()..], "");
        let rest = RE_NAME_NOISE.replace_all(&rest, " ");
        let name: String = RE_SPACES
            .replace_all(rest.trim(), " ")
            .chars()
            .take(MAX_NAME_CHARS)
            .collect();
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(RawRecord::new(code.as_str(), name, internal, external, total))
    }
}

impl ExtractionStrategy for LineHeuristicStrategy {
    fn kind(&self) -> Strategy {
        Strategy::LineHeuristic
    }

    fn try_extract(&self, text: &NormalizedText) -> Option<Vec<RawRecord>> {
        let records: Vec<RawRecord> = text
            .lines
            .iter()
            .filter_map(|line| self.extract_line(line))
            .collect();
        (!records.is_empty()).then_some(records)
    }
}

// ── Strategy: token window ──────────────────────────────────────────────────

static RE_BARE_CODE: Lazy<Regex> = Lazy::new(|| ci(r"^[A-Z]{2,5}\d{2,4}[A-Z]?$"));

const LOOKAHEAD_TOKENS: usize = 9;
const LOOKBEHIND_TOKENS: usize = 5;
const NAME_WORDS: usize = 3;
const UNKNOWN_SUBJECT: &str = "UNKNOWN SUBJECT";

fn is_mark_token(token: &str) -> bool {
    !token.is_empty() && token.len() <= 3 && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_name_token(token: &str) -> bool {
    token.chars().count() > 2 && token.chars().all(char::is_alphabetic)
}

/// Last resort over whitespace tokens: each bare code takes the first three
/// short integers within the next nine tokens, and up to three words before it
/// as a name. Recovered rows are assumed passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenWindowStrategy;

impl ExtractionStrategy for TokenWindowStrategy {
    fn kind(&self) -> Strategy {
        Strategy::TokenWindow
    }

    fn try_extract(&self, text: &NormalizedText) -> Option<Vec<RawRecord>> {
        let tokens: Vec<&str> = text.collapsed.split_whitespace().collect();
        let mut records = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if !RE_BARE_CODE.is_match(token) {
                continue;
            }

            let end = (i + 1 + LOOKAHEAD_TOKENS).min(tokens.len());
            let marks: Vec<u32> = tokens[i + 1..end]
                .iter()
                .filter(|t| is_mark_token(t))
                .take(3)
                .map(|t| parse_mark(t))
                .collect();
            let [internal, external, total] = marks[..] else {
                continue;
            };

            let words: Vec<&str> = tokens[i.saturating_sub(LOOKBEHIND_TOKENS)..i]
                .iter()
                .copied()
                .filter(|t| is_name_token(t))
                .collect();
            let name = if words.is_empty() {
                UNKNOWN_SUBJECT.to_string()
            } else {
                words[words.len().saturating_sub(NAME_WORDS)..]
                    .join(" ")
                    .to_uppercase()
            };

            records.push(RawRecord::new(*token, name, internal, external, total).with_flag("P"));
        }

        (!records.is_empty()).then_some(records)
    }
}

// ── Runner ──────────────────────────────────────────────────────────────────

/// The local strategies in cascade order.
pub fn default_strategies(tolerance: u32, min_line_len: usize) -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(StrictPatternStrategy),
        Box::new(LineHeuristicStrategy {
            tolerance,
            min_line_len,
        }),
        Box::new(TokenWindowStrategy),
    ]
}

/// Walk `strategies` in order and stop at the first that recovers anything.
pub fn run_local_cascade(
    text: &NormalizedText,
    strategies: &[Box<dyn ExtractionStrategy>],
    progress: &dyn ParseProgressCallback,
) -> Option<(Strategy, Vec<RawRecord>)> {
    for strategy in strategies {
        let kind = strategy.kind();
        progress.on_strategy_attempt(kind);
        match strategy.try_extract(text) {
            Some(records) => {
                info!("{kind}: recovered {} rows", records.len());
                progress.on_strategy_result(kind, records.len());
                return Some((kind, records));
            }
            None => {
                debug!("{kind}: no match");
                progress.on_strategy_result(kind, 0);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressCallback;

    fn text(raw: &str) -> NormalizedText {
        NormalizedText::new(raw)
    }

    #[test]
    fn strict_single_row_with_flag() {
        let recs = StrictPatternStrategy
            .try_extract(&text("BCS401 ANALYSIS DESIGN ALGORITHMS 49 36 85 P"))
            .unwrap();
        assert_eq!(recs.len(), 1);
        let r = &recs[0];
        assert_eq!(r.code, "BCS401");
        assert_eq!(r.name, "ANALYSIS DESIGN ALGORITHMS");
        assert_eq!((r.internal, r.external, r.total), (49, 36, 85));
        assert_eq!(r.result_flag.as_deref(), Some("P"));
    }

    #[test]
    fn strict_multiple_rows_in_collapsed_text() {
        let raw = "Semester 4\nBCS401 ANALYSIS & DESIGN OF ALGORITHMS 49 36 85 P\n\
                   BCS402 MICROCONTROLLERS 45 20 65 P\nBBOC407 BIOLOGY FOR CSE 30 5 35 F\n";
        let recs = StrictPatternStrategy.try_extract(&text(raw)).unwrap();
        let codes: Vec<_> = recs.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["BCS401", "BCS402", "BBOC407"]);
        assert_eq!(recs[2].result_flag.as_deref(), Some("F"));
    }

    #[test]
    fn strict_lowercase_input_is_uppercased() {
        let recs = StrictPatternStrategy
            .try_extract(&text("bcs402 microcontrollers 45 20 65 p"))
            .unwrap();
        assert_eq!(recs[0].code, "BCS402");
    }

    #[test]
    fn strict_word_flag_template() {
        let recs = StrictPatternStrategy
            .try_extract(&text("BCS403 DBMS 40 30 70 PASS"))
            .unwrap();
        assert_eq!(recs[0].result_flag.as_deref(), Some("PASS"));
    }

    #[test]
    fn strict_without_flag() {
        let recs = StrictPatternStrategy
            .try_extract(&text("BCS403 DBMS 40 30 70"))
            .unwrap();
        assert_eq!(recs[0].total, 70);
        assert_eq!(recs[0].result_flag, None);
    }

    #[test]
    fn strict_legacy_code_keeps_year_prefix() {
        let recs = StrictPatternStrategy
            .try_extract(&text("21CS301 DATA STRUCTURES 38 40 78 P"))
            .unwrap();
        assert_eq!(recs[0].code, "21CS301");
        assert_eq!(recs[0].total, 78);
    }

    #[test]
    fn strict_bare_template_ignores_separators() {
        let recs = StrictPatternStrategy
            .try_extract(&text("Code BCS401 (4) - 49 / 36 = 85"))
            .unwrap();
        assert_eq!(recs[0].code, "BCS401");
        assert_eq!(recs[0].name, "");
        assert_eq!((recs[0].internal, recs[0].external), (4, 49));
    }

    #[test]
    fn strict_first_matching_template_wins() {
        // Row one fits template 1, row two only fits template 3: row two is lost.
        let recs = StrictPatternStrategy
            .try_extract(&text("BCS401 ADA 49 36 85 P BCS402 MC 40 30 70"))
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].code, "BCS401");
    }

    #[test]
    fn strict_no_match() {
        assert!(StrictPatternStrategy.try_extract(&text("no marks here")).is_none());
    }

    #[test]
    fn line_heuristic_accepts_consistent_line() {
        let strategy = LineHeuristicStrategy::default();
        let rec = strategy
            .extract_line("BCS401 ANALYSIS & DESIGN 49 36 85 P")
            .unwrap();
        assert_eq!(rec.code, "BCS401");
        assert_eq!(rec.name, "ANALYSIS & DESIGN P");
        assert_eq!(rec.total, 85);
    }

    #[test]
    fn line_heuristic_discards_bad_sum() {
        let strategy = LineHeuristicStrategy::default();
        assert!(strategy.extract_line("XY999 SOME COURSE 10 10 10").is_none());
        assert!(strategy
            .try_extract(&text("XY999 SOME COURSE 10 10 10"))
            .is_none());
    }

    #[test]
    fn line_heuristic_survives_out_of_range_marks() {
        let strategy = LineHeuristicStrategy::default();
        assert!(strategy
            .extract_line("4294967295 4294967295 7 XY999 SOME COURSE")
            .is_none());
        let rec = strategy
            .extract_line("4294967295 1 4294967295 XY999 SOME COURSE")
            .unwrap();
        assert_eq!(rec.total, u32::MAX);
    }

    #[test]
    fn line_heuristic_tolerance_is_configurable() {
        let strict = LineHeuristicStrategy {
            tolerance: 0,
            min_line_len: 10,
        };
        assert!(strict.extract_line("XY999 SOME COURSE 10 10 22").is_none());
        let loose = LineHeuristicStrategy::default();
        assert!(loose.extract_line("XY999 SOME COURSE 10 10 22").is_some());
        let wide = LineHeuristicStrategy {
            tolerance: 10,
            min_line_len: 10,
        };
        assert!(wide.extract_line("XY999 SOME COURSE 10 10 10").is_some());
    }

    #[test]
    fn line_heuristic_skips_short_and_nameless_lines() {
        let strategy = LineHeuristicStrategy::default();
        assert!(strategy.extract_line("AB12 1 2 3").is_none());
        assert!(strategy.extract_line("BCS401 49 36 85").is_none());
    }

    #[test]
    fn line_heuristic_name_truncated() {
        let long = "A".repeat(80);
        let rec = LineHeuristicStrategy::default()
            .extract_line(&format!("BCS401 {long} 49 36 85"))
            .unwrap();
        assert_eq!(rec.name.len(), 50);
    }

    #[test]
    fn token_window_reads_ahead_and_behind() {
        let recs = TokenWindowStrategy
            .try_extract(&text("of the DATA STRUCTURES LAB BCS403 x 40 y 30 z 70"))
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "DATA STRUCTURES LAB");
        assert_eq!((recs[0].internal, recs[0].external, recs[0].total), (40, 30, 70));
        assert_eq!(recs[0].result_flag.as_deref(), Some("P"));
    }

    #[test]
    fn token_window_unknown_name_and_window_limit() {
        let recs = TokenWindowStrategy
            .try_extract(&text("BCS403 40 30 70"))
            .unwrap();
        assert_eq!(recs[0].name, UNKNOWN_SUBJECT);

        let far = "BCS403 a b c d e f g 40 30 70";
        assert!(TokenWindowStrategy.try_extract(&text(far)).is_none());
    }

    #[test]
    fn token_window_skips_long_numbers() {
        assert!(TokenWindowStrategy
            .try_extract(&text("BCS403 2024 1000 5000 7 8"))
            .is_none());
    }

    #[test]
    fn collect_records_last_write_wins() {
        let map = collect_records(vec![
            RawRecord::new("BCS401", "", 10, 10, 20),
            RawRecord::new("BCS402", "", 40, 30, 70),
            RawRecord::new("bcs401", "", 40, 45, 85),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["BCS401"].total, 85);
    }

    #[test]
    fn runner_falls_through_to_line_heuristic() {
        // No template matches: the numbers sit before the code.
        let raw = "49 36 85 BCS401 ANALYSIS OF ALGORITHMS\nfooter text only";
        let strategies = default_strategies(5, 10);
        let (kind, recs) = run_local_cascade(&text(raw), &strategies, &NoopProgressCallback).unwrap();
        assert_eq!(kind, Strategy::LineHeuristic);
        assert_eq!(recs[0].code, "BCS401");
    }

    #[test]
    fn runner_returns_none_when_everything_fails() {
        let strategies = default_strategies(5, 10);
        assert!(run_local_cascade(&text("nothing to see"), &strategies, &NoopProgressCallback).is_none());
    }
}
