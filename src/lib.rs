//! # sgpa-extract
//!
//! Read VTU exam result PDFs into per-subject marks and compute the SGPA.
//!
//! Result sheets come from many generations of the university portal: some
//! are clean text tables, some are scans with a thin text layer, some put a
//! whole subject on one line and some scatter it over three. No single
//! extractor handles them all, so this crate runs a cascade and keeps the
//! first stage that finds anything.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input      resolve local file or download from URL
//!  ├─ 2. Text       page text via pdfium (spawn_blocking)
//!  ├─ 3. Normalise  invisible chars, punctuation, whitespace
//!  ├─ 4. Scheme     pick the grading scheme from the course codes
//!  ├─ 5. Extract    oracle → strict regex → line heuristic → token window
//!  ├─ 6. Enrich     catalog credits and names, grade, pass/fail
//!  └─ 7. Report     SGPA, branch, failures, breakdown
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sgpa_extract::{parse_result, ParseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The oracle is used when GEMINI_API_KEY or another provider key is set.
//!     let config = ParseConfig::default();
//!     let report = parse_result("result.pdf", &config).await?;
//!     println!("SGPA {} over {} credits", report.sgpa, report.total_credits);
//!     Ok(())
//! }
//! ```
//!
//! Text that was already extracted can be parsed without pdfium:
//!
//! ```rust
//! use sgpa_extract::{parse_text, ParseConfig};
//!
//! let config = ParseConfig::builder().oracle_enabled(false).build().unwrap();
//! let report = parse_text("BCS401 ANALYSIS & DESIGN OF ALGORITHMS 49 36 85 P", &config).unwrap();
//! assert_eq!(report.subjects_count, 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sgpa` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod record;
pub mod scheme;
pub mod sgpa;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::{CatalogEntry, CatalogProvider, Program, StaticCatalog, TermGroup};
pub use config::{ParseConfig, ParseConfigBuilder};
pub use error::{OracleError, SgpaError};
pub use output::{DebugReport, SgpaReport};
pub use parse::{
    debug_extract, debug_extract_bytes, parse_document, parse_result, parse_result_bytes,
    parse_text, SourceDocument,
};
pub use pipeline::cascade::Strategy;
pub use pipeline::oracle::{DocumentOracle, LlmOracle};
pub use progress::{NoopProgressCallback, ParseProgressCallback, ProgressCallback};
pub use record::{ExtractedRecord, RawRecord, ResultFlag};
pub use scheme::{detect_scheme, list_schemes, Scheme};
pub use sgpa::calculate_sgpa;
