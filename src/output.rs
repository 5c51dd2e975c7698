//! Output types: the SGPA report and the diagnostic text dump.

use crate::pipeline::cascade::Strategy;
use crate::record::{branch_label, detect_branch, ExtractedRecord};
use crate::scheme::{detect_scheme, Scheme};
use crate::sgpa::{calculate_sgpa, detailed_breakdown, DetailedBreakdown};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Full result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct SgpaReport {
    pub success: bool,
    pub scheme: Scheme,
    /// Program tag, or `"Unknown"`.
    pub branch: String,
    pub sgpa: f64,
    pub total_credits: u32,
    pub total_weighted_points: u32,
    /// Subjects keyed by code.
    pub subjects: BTreeMap<String, ExtractedRecord>,
    pub subjects_count: usize,
    pub failed_subjects: Vec<String>,
    pub failed_count: usize,
    pub detailed_breakdown: DetailedBreakdown,
    /// Cascade stage that produced the subjects.
    pub strategy: Strategy,
}

impl SgpaReport {
    pub fn new(
        scheme: Scheme,
        strategy: Strategy,
        subjects: BTreeMap<String, ExtractedRecord>,
    ) -> Self {
        let aggregate = calculate_sgpa(subjects.values());
        let failed_subjects: Vec<String> = aggregate.failed_codes.into_iter().collect();
        let branch = detect_branch(subjects.keys().map(String::as_str));

        Self {
            success: true,
            scheme,
            branch: branch_label(branch),
            sgpa: aggregate.sgpa,
            total_credits: aggregate.total_credits,
            total_weighted_points: aggregate.total_weighted_points,
            subjects_count: subjects.len(),
            failed_count: failed_subjects.len(),
            failed_subjects,
            detailed_breakdown: detailed_breakdown(subjects.values()),
            subjects,
            strategy,
        }
    }
}

// ── Debug dump ──────────────────────────────────────────────────────────────

const PREVIEW_CHARS: usize = 1000;
const MAX_NUMBERED_LINES: usize = 10;

static RE_CANDIDATE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z]{1,5}\d{3,4}[A-Z]?").unwrap());
static RE_WHOLE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());

/// A raw line carrying at least three whole numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedLine {
    pub line: String,
    pub numbers: Vec<String>,
}

/// What the text layer of a document looks like, for diagnosing a parse
/// that found nothing.
#[derive(Debug, Clone, Serialize)]
pub struct DebugReport {
    /// First 1000 characters, with `...` appended when cut.
    pub extracted_text: String,
    pub course_codes_found: Vec<String>,
    pub lines_with_numbers: Vec<NumberedLine>,
    pub total_lines: usize,
    pub text_length: usize,
    pub detected_scheme: Scheme,
}

impl DebugReport {
    pub fn from_text(text: &str) -> Self {
        let text_length = text.chars().count();
        let extracted_text = if text_length > PREVIEW_CHARS {
            let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
            preview.push_str("...");
            preview
        } else {
            text.to_string()
        };

        let course_codes_found: BTreeSet<&str> =
            RE_CANDIDATE_CODE.find_iter(text).map(|m| m.as_str()).collect();

        let lines_with_numbers = text
            .split('\n')
            .filter_map(|line| {
                let numbers: Vec<String> = RE_WHOLE_NUMBER
                    .find_iter(line)
                    .map(|m| m.as_str().to_string())
                    .collect();
                (numbers.len() >= 3).then(|| NumberedLine {
                    line: line.trim().to_string(),
                    numbers,
                })
            })
            .take(MAX_NUMBERED_LINES)
            .collect();

        Self {
            extracted_text,
            course_codes_found: course_codes_found.into_iter().map(str::to_string).collect(),
            lines_with_numbers,
            total_lines: text.split('\n').count(),
            text_length,
            detected_scheme: detect_scheme(&crate::pipeline::normalize::normalize_text(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::record::{enrich, RawRecord};

    fn subjects(rows: &[(&str, u32)]) -> BTreeMap<String, ExtractedRecord> {
        rows.iter()
            .map(|&(code, total)| {
                let raw = RawRecord::new(code, "", total / 2, total - total / 2, total);
                let rec = enrich(raw, Scheme::Y2022, StaticCatalog::builtin(), 3, false);
                (rec.code.clone(), rec)
            })
            .collect()
    }

    #[test]
    fn report_totals() {
        // BCS401: 3 credits, A+ (9). BCS402: 4 credits, B (6). BBOC407: 2 credits, F (0).
        let report = SgpaReport::new(
            Scheme::Y2022,
            Strategy::StrictPattern,
            subjects(&[("BCS401", 85), ("BCS402", 58), ("BBOC407", 30)]),
        );
        assert!(report.success);
        assert_eq!(report.branch, "CS");
        assert_eq!(report.total_credits, 9);
        assert_eq!(report.total_weighted_points, 27 + 24);
        assert_eq!(report.sgpa, 5.67);
        assert_eq!(report.failed_subjects, vec!["BBOC407".to_string()]);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.subjects_count, 3);
        assert_eq!(report.detailed_breakdown.passed_subjects, 2);
    }

    #[test]
    fn report_json_shape() {
        let report = SgpaReport::new(
            Scheme::Y2022,
            Strategy::Oracle,
            subjects(&[("BCS401", 85)]),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scheme"], "2022");
        assert_eq!(json["strategy"], "oracle");
        assert_eq!(json["subjects"]["BCS401"]["result"], "P");
        assert_eq!(json["subjects"]["BCS401"]["credits"], 3);
        assert!(json["detailed_breakdown"]["average_total"].is_number());
    }

    #[test]
    fn debug_report_from_text() {
        let text = "VTU RESULT\nBCS401 ADA 49 36 85 P\nbcs402 MC 40 30 70 P\nUSN 1AB22CS001\nfooter";
        let dbg = DebugReport::from_text(text);
        assert_eq!(dbg.total_lines, 5);
        assert_eq!(dbg.text_length, text.len());
        assert_eq!(dbg.lines_with_numbers.len(), 2);
        assert_eq!(dbg.lines_with_numbers[0].numbers, vec!["49", "36", "85"]);
        assert!(dbg.course_codes_found.contains(&"BCS401".to_string()));
        assert!(dbg.course_codes_found.contains(&"bcs402".to_string()));
        assert_eq!(dbg.detected_scheme, Scheme::Y2022);
        assert_eq!(dbg.extracted_text, text);
    }

    #[test]
    fn debug_report_truncates_preview() {
        let text = "x".repeat(1500);
        let dbg = DebugReport::from_text(&text);
        assert_eq!(dbg.extracted_text.len(), 1003);
        assert!(dbg.extracted_text.ends_with("..."));
        assert!(dbg.course_codes_found.is_empty());
    }
}
