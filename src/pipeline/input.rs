//! Input resolution: turn a user-supplied path or URL into validated PDF
//! bytes.
//!
//! pdfium reads the document from memory, so a download never touches the
//! disk. Both routes check the `%PDF` magic bytes before returning, so a
//! renamed spreadsheet fails here with [`SgpaError::NotAPdf`] rather than as
//! a pdfium load error.

use crate::error::SgpaError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// A document ready for parsing.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    /// File name used in errors and logs.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve a local path or HTTP(S) URL to PDF bytes.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedInput, SgpaError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SgpaError::InvalidInput {
            input: input.to_string(),
        });
    }
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        resolve_local(Path::new(input)).await
    }
}

/// Reject anything that does not start with the PDF header.
pub fn validate_pdf_bytes(name: &str, bytes: &[u8]) -> Result<(), SgpaError> {
    if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(SgpaError::NotAPdf {
            name: name.to_string(),
            reason: "missing %PDF header".into(),
        });
    }
    Ok(())
}

/// Reject names without a `.pdf` extension (any case).
pub fn validate_pdf_name(name: &str) -> Result<(), SgpaError> {
    let is_pdf = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(())
    } else {
        Err(SgpaError::NotAPdf {
            name: name.to_string(),
            reason: "extension is not .pdf".into(),
        })
    }
}

async fn resolve_local(path: &Path) -> Result<ResolvedInput, SgpaError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !path.exists() {
        return Err(SgpaError::FileNotFound {
            path: PathBuf::from(path),
        });
    }
    validate_pdf_name(&name)?;

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => SgpaError::PermissionDenied {
            path: PathBuf::from(path),
        },
        _ => SgpaError::FileNotFound {
            path: PathBuf::from(path),
        },
    })?;
    validate_pdf_bytes(&name, &bytes)?;

    debug!("Resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedInput { name, bytes })
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedInput, SgpaError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SgpaError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            SgpaError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            SgpaError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(SgpaError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SgpaError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .to_vec();

    let name = filename_from_url(url);
    validate_pdf_bytes(&name, &bytes)?;

    info!("Downloaded {} bytes as {}", bytes.len(), name);
    Ok(ResolvedInput { name, bytes })
}

/// Last path segment of the URL, or `downloaded.pdf`.
fn filename_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|last| !last.is_empty() && last.contains('.'))
        .unwrap_or_else(|| "downloaded.pdf".to_string())
}
