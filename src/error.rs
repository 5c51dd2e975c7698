//! Error types for the sgpa-extract library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`SgpaError`] is **fatal**: the document cannot be parsed at all (bad
//!   input file, not a PDF, corrupt xref, no subjects recovered). Returned as
//!   `Err(SgpaError)` from the top-level `parse_*` functions.
//!
//! * [`OracleError`] is **non-fatal**: the external document-understanding
//!   call failed (no credential, timeout, garbage JSON, zero rows). The
//!   cascade logs it and falls through to the local strategies; callers never
//!   see it.

use crate::scheme::Scheme;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the sgpa-extract library.
#[derive(Debug, Error)]
pub enum SgpaError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is empty or otherwise unusable.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The upload is not a PDF (wrong extension or missing `%PDF` header).
    #[error("File must be a PDF: '{name}' ({reason})")]
    NotAPdf { name: String, reason: String },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{name}' is corrupt: {detail}")]
    CorruptPdf { name: String, detail: String },

    /// PDF requires a password but none (or a wrong one) was provided.
    #[error("PDF '{name}' is encrypted.\nProvide the password with --password <PASSWORD>.")]
    PasswordRequired { name: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or place the library next to the binary."
    )]
    PdfiumBindingFailed(String),

    // ── Extraction errors ─────────────────────────────────────────────────
    /// Every strategy in the cascade came back empty.
    #[error(
        "No subjects found in PDF. Please ensure it's a valid VTU result PDF. \
(detected scheme: {scheme})"
    )]
    NoSubjectsFound { scheme: Scheme },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SgpaError {
    /// The scheme attached to a "no subjects" failure, for diagnosis.
    pub fn detected_scheme(&self) -> Option<Scheme> {
        match self {
            SgpaError::NoSubjectsFound { scheme } => Some(*scheme),
            _ => None,
        }
    }
}

/// A non-fatal failure of the oracle strategy.
///
/// Logged and swallowed by the cascade. "Zero subjects" is its own variant so
/// logs can tell "the model saw nothing" apart from "could not analyse".
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum OracleError {
    /// No provider credential is available in the environment.
    #[error("oracle not configured: {hint}")]
    NotConfigured { hint: String },

    /// The call exceeded the fixed timeout.
    #[error("oracle call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Transport failure, auth failure or non-success status.
    #[error("oracle request failed: {detail}")]
    Request { detail: String },

    /// The reply did not contain a parsable JSON array of subjects.
    #[error("oracle returned malformed output: {detail}")]
    MalformedResponse { detail: String },

    /// The reply parsed but held no subjects.
    #[error("oracle returned zero subjects")]
    Empty,
}
