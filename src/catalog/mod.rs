//! Catalog Provider: course code → name, credits, category.
//!
//! The nested scheme → program → term tables in [`data`] are flattened once,
//! on first use, into an immutable [`StaticCatalog`]. After that the catalog
//! is only ever read, so one shared instance serves every parse.
//!
//! Lookups go through the [`CatalogProvider`] trait so enrichment can be
//! driven by any other source of subject data (or a fixture in tests).

mod data;

use crate::error::SgpaError;
use crate::scheme::Scheme;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Academic program (branch), identified by its two-letter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "CS")]
    Cs,
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "ME")]
    Me,
    #[serde(rename = "CV")]
    Cv,
    #[serde(rename = "EE")]
    Ee,
    #[serde(rename = "IS")]
    Is,
    #[serde(rename = "AD")]
    Ad,
    #[serde(rename = "BT")]
    Bt,
    #[serde(rename = "CH")]
    Ch,
}

impl Program {
    /// Every program, in branch-detector tie-break order.
    pub const ALL: [Program; 9] = [
        Program::Cs,
        Program::Ec,
        Program::Me,
        Program::Cv,
        Program::Ee,
        Program::Is,
        Program::Ad,
        Program::Bt,
        Program::Ch,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Program::Cs => "CS",
            Program::Ec => "EC",
            Program::Me => "ME",
            Program::Cv => "CV",
            Program::Ee => "EE",
            Program::Is => "IS",
            Program::Ad => "AD",
            Program::Bt => "BT",
            Program::Ch => "CH",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Program {
    type Err = SgpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Program::ALL
            .into_iter()
            .find(|p| p.tag() == wanted)
            .ok_or_else(|| SgpaError::InvalidConfig(format!("unknown program '{}'", s.trim())))
    }
}

/// A numbered term, or a named pool of electives offered across terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum TermGroup {
    Term(u8),
    Pool(&'static str),
}

impl TermGroup {
    pub fn term(&self) -> Option<u8> {
        match self {
            TermGroup::Term(t) => Some(*t),
            TermGroup::Pool(_) => None,
        }
    }
}

impl fmt::Display for TermGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermGroup::Term(t) => write!(f, "{t}"),
            TermGroup::Pool(name) => f.write_str(name),
        }
    }
}

/// One subject as published in a scheme's curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub credits: u32,
    pub category: &'static str,
    pub scheme: Scheme,
    pub program: Program,
    pub term: TermGroup,
}

/// A row of the secondary credit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallbackEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub credits: u32,
}

/// Term → entries, in table order.
pub type TermListing<'a> = BTreeMap<TermGroup, Vec<&'a CatalogEntry>>;

/// Read-only subject data source used during enrichment.
pub trait CatalogProvider: Send + Sync {
    /// Exact, case-insensitive code lookup.
    fn lookup(&self, code: &str) -> Option<&CatalogEntry>;

    /// Every entry of one scheme and program, grouped by term.
    fn list_by_year_and_program(&self, scheme: Scheme, program: Program) -> TermListing<'_>;

    /// Case-insensitive substring match on code or name.
    fn search(&self, query: &str) -> Vec<&CatalogEntry>;

    /// Secondary table consulted when [`CatalogProvider::lookup`] misses.
    fn fallback(&self, code: &str) -> Option<FallbackEntry> {
        fallback_lookup(code)
    }
}

/// The built-in catalog, indexed once.
#[derive(Debug)]
pub struct StaticCatalog {
    /// Every row of every table, in table order.
    entries: Vec<CatalogEntry>,
    /// Uppercased code → index into `entries`. Later rows replace earlier ones.
    by_code: HashMap<String, usize>,
    /// Codes in first-seen order, for stable search output.
    code_order: Vec<String>,
    /// (scheme, program) → term → indices into `entries`.
    tree: BTreeMap<(Scheme, Program), BTreeMap<TermGroup, Vec<usize>>>,
}

static BUILTIN: Lazy<StaticCatalog> = Lazy::new(StaticCatalog::build);

impl StaticCatalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static StaticCatalog {
        &BUILTIN
    }

    fn build() -> Self {
        let mut catalog = StaticCatalog {
            entries: Vec::new(),
            by_code: HashMap::new(),
            code_order: Vec::new(),
            tree: BTreeMap::new(),
        };

        for table in data::TABLES {
            for &(code, name, credits, category) in table.rows {
                let idx = catalog.entries.len();
                catalog.entries.push(CatalogEntry {
                    code,
                    name,
                    credits,
                    category,
                    scheme: table.scheme,
                    program: table.program,
                    term: table.group,
                });

                let key = code.to_ascii_uppercase();
                if catalog.by_code.insert(key.clone(), idx).is_none() {
                    catalog.code_order.push(key);
                }

                catalog
                    .tree
                    .entry((table.scheme, table.program))
                    .or_default()
                    .entry(table.group)
                    .or_default()
                    .push(idx);
            }
        }

        debug!(
            "Catalog indexed: {} rows, {} distinct codes",
            catalog.entries.len(),
            catalog.code_order.len()
        );
        catalog
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.code_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_order.is_empty()
    }

    /// Every program of one scheme, each grouped by term.
    pub fn list_by_year(&self, scheme: Scheme) -> BTreeMap<Program, TermListing<'_>> {
        self.tree
            .keys()
            .filter(|(s, _)| *s == scheme)
            .map(|&(_, program)| (program, self.list_by_year_and_program(scheme, program)))
            .collect()
    }

    /// Entries of one numbered term.
    pub fn list_by_term(&self, scheme: Scheme, program: Program, term: u8) -> Vec<&CatalogEntry> {
        self.list_by_year_and_program(scheme, program)
            .remove(&TermGroup::Term(term))
            .unwrap_or_default()
    }

    /// Sum of credits across every table row of one scheme and program.
    pub fn total_credits(&self, scheme: Scheme, program: Program) -> u32 {
        self.list_by_year_and_program(scheme, program)
            .values()
            .flatten()
            .map(|e| e.credits)
            .sum()
    }
}

impl CatalogProvider for StaticCatalog {
    fn lookup(&self, code: &str) -> Option<&CatalogEntry> {
        self.by_code
            .get(&code.trim().to_ascii_uppercase())
            .map(|&idx| &self.entries[idx])
    }

    fn list_by_year_and_program(&self, scheme: Scheme, program: Program) -> TermListing<'_> {
        self.tree
            .get(&(scheme, program))
            .map(|terms| {
                terms
                    .iter()
                    .map(|(group, idxs)| (*group, idxs.iter().map(|&i| &self.entries[i]).collect()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let needle = query.trim().to_uppercase();
        self.code_order
            .iter()
            .filter_map(|key| self.by_code.get(key).map(|&idx| (key, &self.entries[idx])))
            .filter(|(key, entry)| key.contains(&needle) || entry.name.to_uppercase().contains(&needle))
            .map(|(_, entry)| entry)
            .collect()
    }
}

/// Secondary credit table lookup (case-insensitive).
pub fn fallback_lookup(code: &str) -> Option<FallbackEntry> {
    let wanted = code.trim().to_ascii_uppercase();
    data::FALLBACK_ROWS
        .iter()
        .find(|(c, _, _)| *c == wanted)
        .map(|&(code, name, credits)| FallbackEntry {
            code,
            name,
            credits,
        })
}

/// The full secondary table, for the subjects listing.
pub fn fallback_subjects() -> Vec<FallbackEntry> {
    data::FALLBACK_ROWS
        .iter()
        .map(|&(code, name, credits)| FallbackEntry {
            code,
            name,
            credits,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static StaticCatalog {
        StaticCatalog::builtin()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let upper = catalog().lookup("BCS401").expect("BCS401 is catalogued");
        let lower = catalog().lookup("bcs401").expect("bcs401 is catalogued");
        assert_eq!(upper, lower);
        assert_eq!(upper.name, "ANALYSIS & DESIGN OF ALGORITHMS");
        assert_eq!(upper.credits, 3);
        assert_eq!(upper.term, TermGroup::Term(4));
    }

    #[test]
    fn biology_has_two_credits() {
        let bio = catalog().lookup("BBOC407").expect("BBOC407 is catalogued");
        assert_eq!(bio.credits, 2);
        assert_eq!(bio.category, "OE");
    }

    #[test]
    fn unknown_code_is_absent() {
        assert!(catalog().lookup("UNKNOWN123").is_none());
        assert!(catalog().lookup("").is_none());
    }

    #[test]
    fn duplicate_code_keeps_last_row() {
        // BMATS101 appears under CS then EC; the EC row is indexed last.
        let entry = catalog().lookup("BMATS101").unwrap();
        assert_eq!(entry.program, Program::Ec);
        assert!(entry.name.contains("ECE"));
    }

    #[test]
    fn lowercase_suffix_codes_are_reachable() {
        assert!(catalog().lookup("BCS515X").is_some());
        assert!(catalog().lookup("bcs515x").is_some());
    }

    #[test]
    fn listing_is_grouped_by_term_in_order() {
        let listing = catalog().list_by_year_and_program(Scheme::Y2022, Program::Cs);
        let groups: Vec<_> = listing.keys().copied().collect();
        assert_eq!(groups.first(), Some(&TermGroup::Term(1)));
        assert!(groups.contains(&TermGroup::Term(8)));
        assert!(groups.contains(&TermGroup::Pool("PEC")));
        let term4 = &listing[&TermGroup::Term(4)];
        assert_eq!(term4[0].code, "BCS401");
    }

    #[test]
    fn listing_for_missing_program_is_empty() {
        assert!(catalog()
            .list_by_year_and_program(Scheme::Y2015, Program::Cs)
            .is_empty());
    }

    #[test]
    fn list_by_year_contains_both_2022_programs() {
        let programs: Vec<_> = catalog().list_by_year(Scheme::Y2022).into_keys().collect();
        assert_eq!(programs, vec![Program::Cs, Program::Ec]);
    }

    #[test]
    fn list_by_term_2021() {
        let term3 = catalog().list_by_term(Scheme::Y2021, Program::Cs, 3);
        assert_eq!(term3.len(), 6);
        assert_eq!(term3[1].code, "21CS301");
    }

    #[test]
    fn search_matches_code_or_name() {
        let by_name = catalog().search("algorithm");
        assert!(by_name.iter().any(|e| e.code == "BCS401"));
        assert!(by_name.iter().any(|e| e.code == "BCSL404"));

        let by_code = catalog().search("bcs40");
        assert!(by_code.iter().all(|e| e.code.starts_with("BCS40")));
        assert!(!by_code.is_empty());
    }

    #[test]
    fn search_reports_each_code_once() {
        let hits = catalog().search("BMATS101");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn total_credits_2018_cs() {
        // Terms 1 and 3: 4+3+3+3+3+3+1 + 3+4+4+4+3+2
        assert_eq!(catalog().total_credits(Scheme::Y2018, Program::Cs), 40);
    }

    #[test]
    fn fallback_table() {
        let bio = fallback_lookup("bboc407").unwrap();
        assert_eq!(bio.credits, 2);
        assert!(fallback_lookup("BYOK459").is_some());
        assert!(fallback_lookup("BCS999").is_none());
        assert_eq!(fallback_subjects().len(), 9);
    }

    #[test]
    fn program_from_str() {
        assert_eq!("cs".parse::<Program>().unwrap(), Program::Cs);
        assert!("XX".parse::<Program>().is_err());
    }
}
