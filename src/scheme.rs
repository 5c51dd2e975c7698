//! Catalog years ("schemes"), their grading tables, and the scheme detector.
//!
//! Each scheme fixes three things: the shape of its course codes, the
//! marks-threshold → letter table, and the letter → grade-point table. The
//! detector scores raw text against every scheme's code shape and program
//! keywords and always settles on exactly one answer.

use crate::error::SgpaError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Marks at or above which a course counts as passed, in every scheme.
pub const PASS_MARK: u32 = 40;

/// A curriculum revision, named by admission year.
///
/// Defaults to 2022, the most common scheme on current result sheets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Scheme {
    #[serde(rename = "2024")]
    Y2024,
    #[serde(rename = "2022")]
    #[default]
    Y2022,
    #[serde(rename = "2021")]
    Y2021,
    #[serde(rename = "2018")]
    Y2018,
    #[serde(rename = "2017")]
    Y2017,
    #[serde(rename = "2015")]
    Y2015,
}

impl Scheme {
    /// All schemes in detector priority order. Ties go to the earlier entry.
    pub const ALL: [Scheme; 6] = [
        Scheme::Y2024,
        Scheme::Y2022,
        Scheme::Y2021,
        Scheme::Y2018,
        Scheme::Y2017,
        Scheme::Y2015,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Y2024 => "2024",
            Scheme::Y2022 => "2022",
            Scheme::Y2021 => "2021",
            Scheme::Y2018 => "2018",
            Scheme::Y2017 => "2017",
            Scheme::Y2015 => "2015",
        }
    }

    /// Course-code shape used by the detector (matched case-insensitively).
    pub fn code_pattern(&self) -> &'static str {
        match self {
            Scheme::Y2024 => r"B[A-Z]{4}\d{3}[A-Z]?",
            Scheme::Y2022 => r"B[A-Z]{2}\d{3}[A-Z]?",
            Scheme::Y2021 => r"21[A-Z]{2,4}\d{2,3}",
            Scheme::Y2018 => r"18[A-Z]{2,4}\d{2,3}",
            Scheme::Y2017 => r"17[A-Z]{2,4}\d{2,3}",
            Scheme::Y2015 => r"15[A-Z]{2,4}\d{2,3}",
        }
    }

    /// The grading table in force for this scheme.
    pub fn grading(&self) -> &'static GradingPolicy {
        match self {
            Scheme::Y2024 | Scheme::Y2022 | Scheme::Y2021 => &LETTER_PLUS_POLICY,
            Scheme::Y2018 | Scheme::Y2017 | Scheme::Y2015 => &S_TO_E_POLICY,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = SgpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s.trim())
            .ok_or_else(|| {
                SgpaError::InvalidConfig(format!(
                    "unknown scheme '{}', expected one of 2024, 2022, 2021, 2018, 2017, 2015",
                    s.trim()
                ))
            })
    }
}

// ── Grading ──────────────────────────────────────────────────────────────

/// Marks → letter → grade point for one scheme.
///
/// `thresholds` is sorted by descending minimum marks; the first entry whose
/// minimum is ≤ the marks wins. Anything below the last threshold is `F`.
#[derive(Debug)]
pub struct GradingPolicy {
    pub thresholds: &'static [(u32, &'static str)],
    pub points: &'static [(&'static str, u8)],
}

/// Letter assigned below the lowest threshold.
pub const FAIL_GRADE: &str = "F";

static LETTER_PLUS_POLICY: GradingPolicy = GradingPolicy {
    thresholds: &[
        (90, "O"),
        (80, "A+"),
        (70, "A"),
        (60, "B+"),
        (55, "B"),
        (50, "C"),
        (40, "P"),
    ],
    points: &[
        ("O", 10),
        ("A+", 9),
        ("A", 8),
        ("B+", 7),
        ("B", 6),
        ("C", 5),
        ("P", 4),
        ("F", 0),
    ],
};

static S_TO_E_POLICY: GradingPolicy = GradingPolicy {
    thresholds: &[
        (90, "S"),
        (80, "A"),
        (70, "B"),
        (60, "C"),
        (50, "D"),
        (40, "E"),
    ],
    points: &[
        ("S", 10),
        ("A", 9),
        ("B", 8),
        ("C", 7),
        ("D", 6),
        ("E", 5),
        ("F", 0),
    ],
};

impl GradingPolicy {
    /// Letter grade for `marks`.
    pub fn grade_of(&self, marks: u32) -> &'static str {
        self.thresholds
            .iter()
            .find(|(min, _)| marks >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(FAIL_GRADE)
    }

    /// Grade point for a letter; unknown letters score 0.
    pub fn point_of(&self, grade: &str) -> u8 {
        self.points
            .iter()
            .find(|(g, _)| *g == grade)
            .map(|(_, p)| *p)
            .unwrap_or(0)
    }

    /// `point_of(grade_of(marks))`.
    pub fn grade_point(&self, marks: u32) -> u8 {
        self.point_of(self.grade_of(marks))
    }

    /// Reverse lookup: the letter carrying `points`, or `F`.
    pub fn grade_for_points(&self, points: u8) -> &'static str {
        self.points
            .iter()
            .find(|(_, p)| *p == points)
            .map(|(g, _)| *g)
            .unwrap_or(FAIL_GRADE)
    }
}

/// Serialisable view of a scheme for the schemes listing.
#[derive(Debug, Clone, Serialize)]
pub struct SchemeInfo {
    pub scheme: Scheme,
    pub pattern: &'static str,
    pub grading: BTreeMap<&'static str, u8>,
    pub marks_to_grade: BTreeMap<u32, &'static str>,
}

/// Every supported scheme with its grading tables.
pub fn list_schemes() -> Vec<SchemeInfo> {
    Scheme::ALL
        .into_iter()
        .map(|scheme| {
            let policy = scheme.grading();
            SchemeInfo {
                scheme,
                pattern: scheme.code_pattern(),
                grading: policy.points.iter().copied().collect(),
                marks_to_grade: policy.thresholds.iter().copied().collect(),
            }
        })
        .collect()
}

// ── Detection ────────────────────────────────────────────────────────────

/// Points per code-shape match.
const MATCH_WEIGHT: u32 = 10;
/// Bonus when a scheme's code shape matches more than once.
const MULTI_MATCH_BONUS: u32 = 20;
/// Bonus when the scheme's program prefixes appear anywhere.
const KEYWORD_BONUS: u32 = 50;
/// Extra bonus for the `BCS###` shape, the strongest single signal.
const STRONG_KEYWORD_BONUS: u32 = 100;

struct SchemeSignature {
    scheme: Scheme,
    code: Regex,
    keywords: Option<Regex>,
    strong: Option<Regex>,
}

fn ci(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("static scheme pattern")
}

static SIGNATURES: Lazy<Vec<SchemeSignature>> = Lazy::new(|| {
    Scheme::ALL
        .into_iter()
        .map(|scheme| {
            let keywords = match scheme {
                Scheme::Y2024 => None,
                Scheme::Y2022 => Some(ci("BCS|BEC|BME|BCV|BEE|BIS|BAD|BBT|BCH")),
                _ => {
                    let yy = &scheme.as_str()[2..];
                    let alternation = ["CS", "EC", "ME", "CV", "EE", "IS", "AD", "BT", "CH"]
                        .iter()
                        .map(|p| format!("{yy}{p}"))
                        .collect::<Vec<_>>()
                        .join("|");
                    Some(ci(&alternation))
                }
            };
            let strong = match scheme {
                Scheme::Y2022 => Some(ci(r"BCS\d{3}")),
                _ => None,
            };
            SchemeSignature {
                scheme,
                code: ci(scheme.code_pattern()),
                keywords,
                strong,
            }
        })
        .collect()
});

/// Score from raw counts: 10 per match, +20 past one match, plus bonuses.
pub fn score_from_counts(match_count: usize, keyword_hit: bool, strong_hit: bool) -> u32 {
    let mut score = MATCH_WEIGHT.saturating_mul(match_count as u32);
    if match_count > 1 {
        score += MULTI_MATCH_BONUS;
    }
    if keyword_hit {
        score += KEYWORD_BONUS;
    }
    if strong_hit {
        score += STRONG_KEYWORD_BONUS;
    }
    score
}

/// Highest score wins, first in `scores` order on ties; all zero → default.
pub fn pick_scheme(scores: &[(Scheme, u32)]) -> Scheme {
    let mut best: Option<(Scheme, u32)> = None;
    for &(scheme, score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((scheme, score)),
        }
    }
    match best {
        Some((scheme, score)) if score > 0 => scheme,
        _ => Scheme::default(),
    }
}

/// Per-scheme scores for `text`, in priority order.
pub fn scheme_scores(text: &str) -> Vec<(Scheme, u32)> {
    SIGNATURES
        .iter()
        .map(|sig| {
            let matches = sig.code.find_iter(text).count();
            let keyword_hit = sig.keywords.as_ref().is_some_and(|re| re.is_match(text));
            let strong_hit = sig.strong.as_ref().is_some_and(|re| re.is_match(text));
            (sig.scheme, score_from_counts(matches, keyword_hit, strong_hit))
        })
        .collect()
}

/// Infer the scheme of a normalised result text. Never fails.
pub fn detect_scheme(text: &str) -> Scheme {
    let scores = scheme_scores(text);
    let scheme = pick_scheme(&scores);
    debug!("Scheme scores {:?} → {}", scores, scheme);
    scheme
}
