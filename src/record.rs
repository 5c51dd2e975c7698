//! Per-subject records: the raw tuple a strategy recovers, and the enriched
//! record carrying credits and grade.
//!
//! Also hosts the branch detector, which only ever looks at the codes of the
//! records a document produced.

use crate::catalog::CatalogProvider;
pub use crate::catalog::Program;
use crate::scheme::{Scheme, PASS_MARK};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Result flags that mean the subject was not cleared.
const NON_PASS_FLAGS: &[&str] = &["F", "FAIL", "A", "AB", "ABSENT", "W", "X", "NE"];

/// What an extraction strategy recovers for one subject, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Uppercased course code.
    pub code: String,
    /// Name as printed, possibly empty.
    pub name: String,
    pub internal: u32,
    pub external: u32,
    pub total: u32,
    /// Result column as printed (`P`, `F`, `AB`...), if the strategy saw one.
    pub result_flag: Option<String>,
}

impl RawRecord {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        internal: u32,
        external: u32,
        total: u32,
    ) -> Self {
        Self {
            code: code.into().trim().to_ascii_uppercase(),
            name: name.into().trim().to_string(),
            internal,
            external,
            total,
            result_flag: None,
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        let flag = flag.into();
        let flag = flag.trim();
        self.result_flag = (!flag.is_empty()).then(|| flag.to_ascii_uppercase());
        self
    }
}

/// Coerce a printed mark to an integer. Anything non-numeric becomes 0.
pub fn parse_mark(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

/// Reconciled pass/fail outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultFlag {
    #[serde(rename = "P")]
    Pass,
    #[serde(rename = "F")]
    Fail,
}

impl ResultFlag {
    /// Marks below the pass mark fail outright; so does any non-pass flag.
    /// Every other flag, recognised or not, is a pass.
    pub fn reconcile(total: u32, flag: Option<&str>) -> Self {
        if total < PASS_MARK {
            return ResultFlag::Fail;
        }
        match flag.map(|f| f.trim().to_ascii_uppercase()) {
            Some(f) if NON_PASS_FLAGS.contains(&f.as_str()) => ResultFlag::Fail,
            _ => ResultFlag::Pass,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFlag::Pass => "P",
            ResultFlag::Fail => "F",
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, ResultFlag::Fail)
    }
}

impl fmt::Display for ResultFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject after catalog resolution and grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub code: String,
    pub name: String,
    pub internal: u32,
    pub external: u32,
    pub total: u32,
    pub result: ResultFlag,
    pub credits: u32,
    pub grade_point: u8,
    pub grade: &'static str,
    pub credit_points: u32,
}

/// Resolve credits, name, grade and result for one raw record.
///
/// Credits come from the catalog, then the fallback table, then
/// `default_credits`. An unresolved name falls back to the printed name when
/// the record came from the oracle and to the code otherwise.
pub fn enrich(
    raw: RawRecord,
    scheme: Scheme,
    catalog: &dyn CatalogProvider,
    default_credits: u32,
    from_oracle: bool,
) -> ExtractedRecord {
    let code = raw.code.trim().to_ascii_uppercase();

    let (name, credits) = if let Some(entry) = catalog.lookup(&code) {
        (entry.name.to_string(), entry.credits)
    } else if let Some(entry) = catalog.fallback(&code) {
        (entry.name.to_string(), entry.credits)
    } else {
        debug!("{code} not catalogued, defaulting to {default_credits} credits");
        let name = if from_oracle && !raw.name.trim().is_empty() {
            raw.name.trim().to_string()
        } else {
            code.clone()
        };
        (name, default_credits)
    };

    let policy = scheme.grading();
    let grade = policy.grade_of(raw.total);
    let grade_point = policy.point_of(grade);

    ExtractedRecord {
        result: ResultFlag::reconcile(raw.total, raw.result_flag.as_deref()),
        credit_points: credits.saturating_mul(u32::from(grade_point)),
        code,
        name,
        internal: raw.internal,
        external: raw.external,
        total: raw.total,
        credits,
        grade_point,
        grade,
    }
}

/// Code heads of each catalog year's branch convention, newest first.
const BRANCH_CONVENTIONS: &[&str] = &["B", "21", "18", "17", "15"];

/// The program whose prefix the most codes carry.
///
/// Each code counts once, for the first convention and program it matches.
/// Ties go to the earlier program in [`Program::ALL`]. `None` when no code
/// matches any convention.
pub fn detect_branch<'a>(codes: impl IntoIterator<Item = &'a str>) -> Option<Program> {
    let mut counts = [0usize; Program::ALL.len()];

    for code in codes {
        let code = code.to_ascii_uppercase();
        let hit = BRANCH_CONVENTIONS.iter().find_map(|head| {
            code.strip_prefix(head).and_then(|rest| {
                Program::ALL
                    .iter()
                    .position(|p| rest.starts_with(p.tag()))
            })
        });
        if let Some(idx) = hit {
            counts[idx] += 1;
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (idx, &count) in counts.iter().enumerate() {
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((idx, count));
        }
    }
    best.map(|(idx, _)| Program::ALL[idx])
}

/// Display label for a detected branch.
pub fn branch_label(branch: Option<Program>) -> String {
    branch.map_or_else(|| "Unknown".to_string(), |p| p.tag().to_string())
}
