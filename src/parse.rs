//! Top-level entry points.
//!
//! ```text
//! input ──▶ page text ──▶ normalise ──▶ scheme ──▶ oracle ──fail──▶ local cascade
//!                                                    │                  │
//!                                                    └──────┬───────────┘
//!                                                           ▼
//!                                             enrich ──▶ branch + SGPA ──▶ report
//! ```
//!
//! [`parse_result`] and [`parse_result_bytes`] take a real PDF. [`parse_text`]
//! and [`parse_document`] start from text that was already extracted, which
//! is what the integration tests drive.

use crate::catalog::StaticCatalog;
use crate::config::ParseConfig;
use crate::error::SgpaError;
use crate::output::{DebugReport, SgpaReport};
use crate::pipeline::cascade::{collect_records, default_strategies, run_local_cascade, Strategy};
use crate::pipeline::normalize::NormalizedText;
use crate::pipeline::oracle::{resolve_oracle, run_oracle};
use crate::pipeline::{input, text};
use crate::progress::{NoopProgressCallback, ParseProgressCallback};
use crate::record::{enrich, ExtractedRecord, RawRecord};
use crate::scheme::{detect_scheme, Scheme};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A document whose text has already been pulled out.
#[derive(Debug, Clone, Copy)]
pub struct SourceDocument<'a> {
    /// File name, for logs and errors.
    pub name: &'a str,
    /// The PDF itself. The oracle only runs when this is present.
    pub pdf: Option<&'a [u8]>,
    /// Raw page text joined with newlines.
    pub text: &'a str,
    pub pages: usize,
}

/// Parse a PDF file or URL into an SGPA report.
///
/// # Errors
/// Input errors (missing file, not a PDF, download failure), pdfium
/// failures, and [`SgpaError::NoSubjectsFound`] when every strategy came up
/// empty. Oracle failures are never returned.
pub async fn parse_result(
    input_str: impl AsRef<str>,
    config: &ParseConfig,
) -> Result<SgpaReport, SgpaError> {
    let input_str = input_str.as_ref();
    info!("Parsing: {}", input_str);
    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    // Local names were checked by resolve_input; downloads only need the magic bytes.
    parse_pdf(&resolved.name, &resolved.bytes, config).await
}

/// Parse an uploaded PDF held in memory. `name` must end in `.pdf`.
pub async fn parse_result_bytes(
    name: &str,
    bytes: &[u8],
    config: &ParseConfig,
) -> Result<SgpaReport, SgpaError> {
    if name.trim().is_empty() {
        return Err(SgpaError::InvalidInput {
            input: name.to_string(),
        });
    }
    input::validate_pdf_name(name)?;
    parse_pdf(name, bytes, config).await
}

async fn parse_pdf(name: &str, bytes: &[u8], config: &ParseConfig) -> Result<SgpaReport, SgpaError> {
    input::validate_pdf_bytes(name, bytes)?;

    let start = Instant::now();
    let pages = text::extract_pages(
        name,
        bytes.to_vec(),
        config.password.clone(),
        config.min_page_text_len,
    )
    .await?;
    let rebuilt = pages.iter().filter(|p| p.from_rows).count();
    info!(
        "Extracted text from {} pages ({} rebuilt from rows) in {:?}",
        pages.len(),
        rebuilt,
        start.elapsed()
    );

    let joined = text::join_pages(&pages);
    let doc = SourceDocument {
        name,
        pdf: Some(bytes),
        text: &joined,
        pages: pages.len(),
    };
    parse_document(&doc, config).await
}

/// Full cascade over already-extracted text, oracle first when the PDF is
/// attached and an oracle can be resolved.
pub async fn parse_document(
    doc: &SourceDocument<'_>,
    config: &ParseConfig,
) -> Result<SgpaReport, SgpaError> {
    let progress = progress_of(config);
    progress.on_parse_start(doc.pages);

    let normalized = NormalizedText::new(doc.text);
    let scheme = resolve_scheme(&normalized, config);
    progress.on_scheme_detected(scheme);

    if let Some(pdf) = doc.pdf {
        match resolve_oracle(config) {
            Ok(oracle) => {
                progress.on_strategy_attempt(Strategy::Oracle);
                match run_oracle(oracle.as_ref(), doc.name, pdf, config.oracle_timeout_secs).await {
                    Ok(rows) => {
                        progress.on_strategy_result(Strategy::Oracle, rows.len());
                        return Ok(finish(scheme, Strategy::Oracle, rows, true, config));
                    }
                    Err(e) => {
                        debug!("Falling back to local extraction after oracle failure: {e}");
                        progress.on_strategy_result(Strategy::Oracle, 0);
                    }
                }
            }
            Err(e) => debug!("Oracle skipped: {e}"),
        }
    }

    extract_locally(&normalized, scheme, config)
}

/// Local strategies only, synchronously. No pdfium, no network.
pub fn parse_text(raw_text: &str, config: &ParseConfig) -> Result<SgpaReport, SgpaError> {
    let progress = progress_of(config);
    progress.on_parse_start(0);

    let normalized = NormalizedText::new(raw_text);
    let scheme = resolve_scheme(&normalized, config);
    progress.on_scheme_detected(scheme);

    extract_locally(&normalized, scheme, config)
}

/// Dump what the text layer of a PDF file or URL looks like.
pub async fn debug_extract(
    input_str: impl AsRef<str>,
    config: &ParseConfig,
) -> Result<DebugReport, SgpaError> {
    let resolved = input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    debug_extract_bytes(&resolved.name, &resolved.bytes, config).await
}

/// [`debug_extract`] for a PDF held in memory.
pub async fn debug_extract_bytes(
    name: &str,
    bytes: &[u8],
    config: &ParseConfig,
) -> Result<DebugReport, SgpaError> {
    input::validate_pdf_bytes(name, bytes)?;
    // Direct text layer only: the dump shows what pdfium itself returns.
    let pages = text::extract_pages(name, bytes.to_vec(), config.password.clone(), 0).await?;
    Ok(DebugReport::from_text(&text::join_pages(&pages)))
}

// ── Internals ───────────────────────────────────────────────────────────────

fn progress_of(config: &ParseConfig) -> &dyn ParseProgressCallback {
    match config.progress_callback {
        Some(ref cb) => cb.as_ref(),
        None => &NoopProgressCallback,
    }
}

fn resolve_scheme(text: &NormalizedText, config: &ParseConfig) -> Scheme {
    match config.scheme {
        Some(scheme) => {
            debug!("Using scheme {scheme} from configuration");
            scheme
        }
        None => {
            let scheme = detect_scheme(&text.collapsed);
            info!("Detected scheme {scheme}");
            scheme
        }
    }
}

fn extract_locally(
    text: &NormalizedText,
    scheme: Scheme,
    config: &ParseConfig,
) -> Result<SgpaReport, SgpaError> {
    let strategies = default_strategies(config.sum_tolerance, config.min_line_len);
    match run_local_cascade(text, &strategies, progress_of(config)) {
        Some((strategy, rows)) => Ok(finish(scheme, strategy, rows, false, config)),
        None => {
            warn!("No subjects found (scheme {scheme})");
            Err(SgpaError::NoSubjectsFound { scheme })
        }
    }
}

fn finish(
    scheme: Scheme,
    strategy: Strategy,
    rows: Vec<RawRecord>,
    from_oracle: bool,
    config: &ParseConfig,
) -> SgpaReport {
    let catalog = StaticCatalog::builtin();
    let subjects: BTreeMap<String, ExtractedRecord> = collect_records(rows)
        .into_values()
        .map(|raw| {
            let rec = enrich(raw, scheme, catalog, config.default_credits, from_oracle);
            (rec.code.clone(), rec)
        })
        .collect();

    let report = SgpaReport::new(scheme, strategy, subjects);
    info!(
        "{} subjects via {}: SGPA {:.2} over {} credits, branch {}",
        report.subjects_count, strategy, report.sgpa, report.total_credits, report.branch
    );
    progress_of(config).on_parse_complete(report.subjects_count);
    report
}
