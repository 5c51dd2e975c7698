//! SGPA Calculator.
//!
//! A pure fold over enriched records. Failed subjects stay in the credit
//! total, so a failure pulls the average down rather than vanishing.

use crate::record::ExtractedRecord;
use crate::scheme::PASS_MARK;
use serde::Serialize;
use std::collections::BTreeSet;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted totals for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub sgpa: f64,
    pub total_credits: u32,
    pub total_weighted_points: u32,
    /// Codes with a failing result or total below the pass mark.
    pub failed_codes: BTreeSet<String>,
}

/// Mark sums, means and pass/fail counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedBreakdown {
    pub total_internal: u32,
    pub total_external: u32,
    pub total_marks: u32,
    pub passed_subjects: usize,
    pub failed_subjects_count: usize,
    pub average_internal: f64,
    pub average_external: f64,
    pub average_total: f64,
}

fn is_failed(record: &ExtractedRecord) -> bool {
    record.result.is_fail() || record.total < PASS_MARK
}

pub fn calculate_sgpa<'a>(records: impl IntoIterator<Item = &'a ExtractedRecord>) -> AggregateResult {
    let mut total_credits = 0u32;
    let mut total_weighted_points = 0u32;
    let mut failed_codes = BTreeSet::new();

    for record in records {
        total_credits = total_credits.saturating_add(record.credits);
        total_weighted_points = total_weighted_points.saturating_add(record.credit_points);
        if is_failed(record) {
            failed_codes.insert(record.code.clone());
        }
    }

    let sgpa = if total_credits > 0 {
        round2(f64::from(total_weighted_points) / f64::from(total_credits))
    } else {
        0.0
    };

    AggregateResult {
        sgpa,
        total_credits,
        total_weighted_points,
        failed_codes,
    }
}

pub fn detailed_breakdown<'a>(
    records: impl IntoIterator<Item = &'a ExtractedRecord>,
) -> DetailedBreakdown {
    let mut count = 0usize;
    let mut failed = 0usize;
    let (mut internal, mut external, mut total) = (0u32, 0u32, 0u32);

    for record in records {
        count += 1;
        // Marks come straight from the document and may be absurd.
        internal = internal.saturating_add(record.internal);
        external = external.saturating_add(record.external);
        total = total.saturating_add(record.total);
        if is_failed(record) {
            failed += 1;
        }
    }

    let mean = |sum: u32| {
        if count == 0 {
            0.0
        } else {
            round2(f64::from(sum) / count as f64)
        }
    };

    DetailedBreakdown {
        total_internal: internal,
        total_external: external,
        total_marks: total,
        passed_subjects: count - failed,
        failed_subjects_count: failed,
        average_internal: mean(internal),
        average_external: mean(external),
        average_total: mean(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ResultFlag;

    fn record(code: &str, credits: u32, grade_point: u8, total: u32) -> ExtractedRecord {
        ExtractedRecord {
            code: code.into(),
            name: code.into(),
            internal: total / 2,
            external: total - total / 2,
            total,
            result: ResultFlag::reconcile(total, None),
            credits,
            grade_point,
            grade: "-",
            credit_points: credits * u32::from(grade_point),
        }
    }

    #[test]
    fn weighted_average_rounds_to_two_places() {
        let recs = [record("A1", 4, 8, 75), record("B1", 3, 6, 58)];
        let agg = calculate_sgpa(&recs);
        assert_eq!(agg.total_credits, 7);
        assert_eq!(agg.total_weighted_points, 50);
        assert_eq!(agg.sgpa, 7.14);
        assert!(agg.failed_codes.is_empty());
    }

    #[test]
    fn order_does_not_matter() {
        let a = [record("A1", 4, 8, 75), record("B1", 3, 6, 58), record("C1", 1, 10, 95)];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(calculate_sgpa(&a), calculate_sgpa(&b));
    }

    #[test]
    fn zero_credits_gives_zero() {
        assert_eq!(calculate_sgpa(std::iter::empty()).sgpa, 0.0);
        let yoga = [record("BYOK459", 0, 10, 95)];
        let agg = calculate_sgpa(&yoga);
        assert_eq!(agg.sgpa, 0.0);
        assert_eq!(agg.total_credits, 0);
    }

    #[test]
    fn failed_subjects_count_towards_credits() {
        let recs = [record("A1", 4, 10, 95), record("F1", 4, 0, 20)];
        let agg = calculate_sgpa(&recs);
        assert_eq!(agg.total_credits, 8);
        assert_eq!(agg.sgpa, 5.0);
        assert!(agg.failed_codes.contains("F1"));
    }

    #[test]
    fn failing_flag_with_good_marks_is_failed() {
        let mut absent = record("AB1", 3, 8, 75);
        absent.result = ResultFlag::Fail;
        let agg = calculate_sgpa([&absent]);
        assert_eq!(agg.failed_codes.len(), 1);
    }

    #[test]
    fn breakdown_sums_and_means() {
        let recs = [record("A1", 4, 8, 75), record("B1", 3, 6, 58), record("F1", 3, 0, 20)];
        let b = detailed_breakdown(&recs);
        assert_eq!(b.total_marks, 153);
        assert_eq!(b.total_internal + b.total_external, 153);
        assert_eq!(b.passed_subjects, 2);
        assert_eq!(b.failed_subjects_count, 1);
        assert_eq!(b.average_total, 51.0);
    }

    #[test]
    fn huge_marks_saturate() {
        let recs = [record("A1", 4, 10, 4_000_000_000), record("B1", 3, 10, 4_000_000_000)];
        let b = detailed_breakdown(&recs);
        assert_eq!(b.total_marks, u32::MAX);
        assert_eq!(b.passed_subjects, 2);
        assert_eq!(calculate_sgpa(&recs).sgpa, 10.0);
    }

    #[test]
    fn breakdown_of_nothing() {
        let b = detailed_breakdown(std::iter::empty());
        assert_eq!(b.passed_subjects, 0);
        assert_eq!(b.average_internal, 0.0);
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(7.142857), 7.14);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(0.0), 0.0);
    }
}
