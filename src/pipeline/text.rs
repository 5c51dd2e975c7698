//! Per-page text extraction via pdfium.
//!
//! pdfium's own text layer is used first. A page that yields fewer than
//! `min_page_text_len` characters that way is rebuilt from its character
//! boxes instead: glyphs are grouped into rows by their top edge and each row
//! is flattened left to right. This only reorders what the text layer holds,
//! so sparse or scrambled table text comes back in reading order; a page with
//! no text layer at all (a bare scan) stays empty and is left to the oracle.
//!
//! Everything here runs in `spawn_blocking`; pdfium must stay off the Tokio
//! worker threads.

use crate::error::SgpaError;
use pdfium_render::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Glyphs whose top edges are this close share a row.
const ROW_TOLERANCE: f32 = 5.0;
/// A horizontal gap wider than this between glyphs becomes a space.
const WORD_GAP: f32 = 10.0;

/// Text recovered from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-indexed.
    pub page: usize,
    pub text: String,
    /// True when the text was rebuilt from character rows.
    pub from_rows: bool,
}

/// Join page texts with a newline after each page.
pub fn join_pages(pages: &[PageText]) -> String {
    pages.iter().fold(String::new(), |mut acc, p| {
        if !p.text.is_empty() {
            acc.push_str(&p.text);
            acc.push('\n');
        }
        acc
    })
}

/// Bind libpdfium: `PDFIUM_LIB_PATH`, then the working directory, then
/// `/opt/pdfium/lib`, then the system library path.
pub(crate) fn bind_pdfium() -> Result<Pdfium, SgpaError> {
    let from_env = std::env::var("PDFIUM_LIB_PATH").ok().map(|dir| {
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir))
    });

    let bindings = match from_env {
        Some(Ok(bindings)) => Ok(bindings),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                    "/opt/pdfium/lib",
                ))
            })
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| SgpaError::PdfiumBindingFailed(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// Map a document-load failure onto the fatal taxonomy.
pub(crate) fn map_load_error(name: &str, err: PdfiumError) -> SgpaError {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            SgpaError::PasswordRequired {
                name: name.to_string(),
            }
        }
        other => SgpaError::CorruptPdf {
            name: name.to_string(),
            detail: other.to_string(),
        },
    }
}

/// Extract every page's text from an in-memory PDF.
pub async fn extract_pages(
    name: &str,
    bytes: Vec<u8>,
    password: Option<String>,
    min_page_text_len: usize,
) -> Result<Vec<PageText>, SgpaError> {
    let name = name.to_string();
    tokio::task::spawn_blocking(move || {
        extract_pages_blocking(&name, &bytes, password.as_deref(), min_page_text_len)
    })
    .await
    .map_err(|e| SgpaError::Internal(format!("Text extraction task panicked: {e}")))?
}

fn extract_pages_blocking(
    name: &str,
    bytes: &[u8],
    password: Option<&str>,
    min_page_text_len: usize,
) -> Result<Vec<PageText>, SgpaError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| map_load_error(name, e))?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let mut out = Vec::with_capacity(pages.len() as usize);
    for index in 0..pages.len() {
        let page = pages.get(index).map_err(|e| SgpaError::CorruptPdf {
            name: name.to_string(),
            detail: format!("page {}: {e}", index + 1),
        })?;

        let direct = page.text().map(|t| t.all()).unwrap_or_default();
        let page_num = index as usize + 1;

        if direct.trim().chars().count() >= min_page_text_len {
            out.push(PageText {
                page: page_num,
                text: direct,
                from_rows: false,
            });
            continue;
        }

        let rows = page
            .text()
            .map(|t| rows_from_glyphs(collect_glyphs(&t)))
            .unwrap_or_default();
        debug!(
            "Page {page_num}: text layer has {} chars, rebuilt {} chars from rows",
            direct.trim().len(),
            rows.len()
        );

        if rows.trim().is_empty() {
            out.push(PageText {
                page: page_num,
                text: direct,
                from_rows: false,
            });
        } else {
            out.push(PageText {
                page: page_num,
                text: rows,
                from_rows: true,
            });
        }
    }

    Ok(out)
}

/// `(glyph, left, top)` for every positioned character on a page.
fn collect_glyphs(text: &PdfPageText) -> Vec<(char, f32, f32)> {
    let mut glyphs = Vec::new();
    for segment in text.segments().iter() {
        let Ok(chars) = segment.chars() else {
            continue;
        };
        for ch in chars.iter() {
            if let (Some(c), Ok(bounds)) = (ch.unicode_char(), ch.loose_bounds()) {
                glyphs.push((c, bounds.left().value, bounds.top().value));
            }
        }
    }
    glyphs
}

/// Group glyphs into rows top to bottom, then order each row left to right.
fn rows_from_glyphs(mut glyphs: Vec<(char, f32, f32)>) -> String {
    glyphs.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
    });

    let mut rows: Vec<Vec<(char, f32)>> = Vec::new();
    let mut row_top: Option<f32> = None;
    for (c, x, y) in glyphs {
        match (row_top, rows.last_mut()) {
            (Some(top), Some(row)) if (top - y).abs() <= ROW_TOLERANCE => row.push((c, x)),
            _ => {
                rows.push(vec![(c, x)]);
                row_top = Some(y);
            }
        }
    }

    let mut out = String::new();
    for mut row in rows {
        row.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        let mut prev_x: Option<f32> = None;
        for (c, x) in row {
            if prev_x.is_some_and(|px| x - px > WORD_GAP) && c != ' ' {
                out.push(' ');
            }
            out.push(c);
            prev_x = Some(x);
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str, x0: f32, y: f32) -> Vec<(char, f32, f32)> {
        s.chars()
            .enumerate()
            .map(|(i, c)| (c, x0 + i as f32 * 6.0, y))
            .collect()
    }

    #[test]
    fn rows_group_by_top_edge() {
        let mut glyphs = Vec::new();
        // Second row first, to check ordering.
        glyphs.extend(word("BCS402", 10.0, 680.0));
        glyphs.extend(word("65", 200.0, 681.5));
        glyphs.extend(word("BCS401", 10.0, 700.0));
        glyphs.extend(word("85", 200.0, 698.0));
        assert_eq!(rows_from_glyphs(glyphs), "BCS401 85\nBCS402 65");
    }

    #[test]
    fn rows_of_nothing() {
        assert_eq!(rows_from_glyphs(Vec::new()), "");
    }

    #[test]
    fn join_pages_skips_empty() {
        let pages = vec![
            PageText {
                page: 1,
                text: "a".into(),
                from_rows: false,
            },
            PageText {
                page: 2,
                text: String::new(),
                from_rows: false,
            },
            PageText {
                page: 3,
                text: "b".into(),
                from_rows: true,
            },
        ];
        assert_eq!(join_pages(&pages), "a\nb\n");
    }
}
