//! Configuration for parsing a result sheet.
//!
//! Every knob lives in [`ParseConfig`], built via [`ParseConfigBuilder`].
//! The defaults reproduce the reference behaviour: the 2022 scheme when
//! detection finds nothing, a 30 s oracle deadline, a ±5 sum window for the
//! line heuristic and 3 credits for uncatalogued subjects.

use crate::error::SgpaError;
use crate::pipeline::oracle::DocumentOracle;
use crate::progress::ProgressCallback;
use crate::scheme::Scheme;
use std::fmt;
use std::sync::Arc;

/// Configuration for one parse.
///
/// Built via [`ParseConfig::builder()`] or using [`ParseConfig::default()`].
///
/// # Example
/// ```rust
/// use sgpa_extract::{ParseConfig, Scheme};
///
/// let config = ParseConfig::builder()
///     .scheme(Scheme::Y2021)
///     .oracle_enabled(false)
///     .sum_tolerance(3)
///     .build()
///     .unwrap();
/// assert_eq!(config.sum_tolerance, 3);
/// ```
#[derive(Clone)]
pub struct ParseConfig {
    /// Grade with this scheme instead of detecting one. Default: None.
    pub scheme: Option<Scheme>,

    /// Try the oracle before the local strategies. Default: true.
    ///
    /// Even when enabled the oracle is skipped silently if no credential
    /// can be found.
    pub oracle_enabled: bool,

    /// Pre-constructed oracle. Takes precedence over `provider_name`.
    pub oracle: Option<Arc<dyn DocumentOracle>>,

    /// LLM provider name for the oracle ("gemini", "openai", "anthropic"...).
    /// If None, the provider is auto-detected from the environment.
    pub provider_name: Option<String>,

    /// LLM model identifier. If None, uses the provider default.
    pub model: Option<String>,

    /// Deadline for the whole oracle call in seconds. Default: 30.
    pub oracle_timeout_secs: u64,

    /// Sampling temperature for the oracle. Default: 0.0.
    pub temperature: f32,

    /// Maximum tokens the oracle may generate. Default: 4096.
    pub max_tokens: usize,

    /// Longest edge of an oracle page image in pixels. Default: 2000.
    pub max_rendered_pixels: u32,

    /// Custom oracle instruction. If None, uses
    /// [`crate::prompts::ORACLE_EXTRACTION_PROMPT`].
    pub system_prompt: Option<String>,

    /// How far a line's total may drift from internal + external before the
    /// line heuristic rejects it. Default: 5.
    pub sum_tolerance: u32,

    /// Lines shorter than this are ignored by the line heuristic. Default: 10.
    pub min_line_len: usize,

    /// Pages whose text layer yields fewer characters than this are rebuilt
    /// from character rows. Default: 10.
    pub min_page_text_len: usize,

    /// Credits for a subject found in neither catalog table. Default: 3.
    pub default_credits: u32,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Optional progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            scheme: None,
            oracle_enabled: true,
            oracle: None,
            provider_name: None,
            model: None,
            oracle_timeout_secs: 30,
            temperature: 0.0,
            max_tokens: 4096,
            max_rendered_pixels: 2000,
            system_prompt: None,
            sum_tolerance: 5,
            min_line_len: 10,
            min_page_text_len: 10,
            default_credits: 3,
            password: None,
            download_timeout_secs: 120,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ParseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseConfig")
            .field("scheme", &self.scheme)
            .field("oracle_enabled", &self.oracle_enabled)
            .field("oracle", &self.oracle.as_ref().map(|o| o.name().to_string()))
            .field("provider_name", &self.provider_name)
            .field("model", &self.model)
            .field("oracle_timeout_secs", &self.oracle_timeout_secs)
            .field("sum_tolerance", &self.sum_tolerance)
            .field("min_line_len", &self.min_line_len)
            .field("min_page_text_len", &self.min_page_text_len)
            .field("default_credits", &self.default_credits)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl ParseConfig {
    /// Create a new builder for `ParseConfig`.
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ParseConfig`].
#[derive(Debug)]
pub struct ParseConfigBuilder {
    config: ParseConfig,
}

impl ParseConfigBuilder {
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.config.scheme = Some(scheme);
        self
    }

    pub fn maybe_scheme(mut self, scheme: Option<Scheme>) -> Self {
        self.config.scheme = scheme;
        self
    }

    pub fn oracle_enabled(mut self, enabled: bool) -> Self {
        self.config.oracle_enabled = enabled;
        self
    }

    pub fn oracle(mut self, oracle: Arc<dyn DocumentOracle>) -> Self {
        self.config.oracle = Some(oracle);
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn oracle_timeout_secs(mut self, secs: u64) -> Self {
        self.config.oracle_timeout_secs = secs;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn sum_tolerance(mut self, tolerance: u32) -> Self {
        self.config.sum_tolerance = tolerance;
        self
    }

    pub fn min_line_len(mut self, len: usize) -> Self {
        self.config.min_line_len = len;
        self
    }

    pub fn min_page_text_len(mut self, len: usize) -> Self {
        self.config.min_page_text_len = len;
        self
    }

    pub fn default_credits(mut self, credits: u32) -> Self {
        self.config.default_credits = credits;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ParseConfig, SgpaError> {
        let c = &self.config;
        if c.oracle_enabled && c.oracle_timeout_secs == 0 {
            return Err(SgpaError::InvalidConfig(
                "oracle timeout must be at least 1 second".into(),
            ));
        }
        if c.default_credits > 10 {
            return Err(SgpaError::InvalidConfig(format!(
                "default credits must be 0-10, got {}",
                c.default_credits
            )));
        }
        if c.download_timeout_secs == 0 {
            return Err(SgpaError::InvalidConfig(
                "download timeout must be at least 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ParseConfig::default();
        assert_eq!(c.scheme, None);
        assert!(c.oracle_enabled);
        assert_eq!(c.oracle_timeout_secs, 30);
        assert_eq!(c.sum_tolerance, 5);
        assert_eq!(c.min_line_len, 10);
        assert_eq!(c.min_page_text_len, 10);
        assert_eq!(c.default_credits, 3);
        assert_eq!(c.download_timeout_secs, 120);
    }

    #[test]
    fn builder_sets_fields() {
        let c = ParseConfig::builder()
            .scheme(Scheme::Y2018)
            .sum_tolerance(0)
            .default_credits(4)
            .temperature(9.0)
            .max_rendered_pixels(10)
            .build()
            .unwrap();
        assert_eq!(c.scheme, Some(Scheme::Y2018));
        assert_eq!(c.sum_tolerance, 0);
        assert_eq!(c.default_credits, 4);
        assert_eq!(c.temperature, 2.0);
        assert_eq!(c.max_rendered_pixels, 100);
    }

    #[test]
    fn zero_oracle_timeout_rejected_only_when_enabled() {
        assert!(ParseConfig::builder().oracle_timeout_secs(0).build().is_err());
        assert!(ParseConfig::builder()
            .oracle_enabled(false)
            .oracle_timeout_secs(0)
            .build()
            .is_ok());
    }

    #[test]
    fn excessive_default_credits_rejected() {
        let err = ParseConfig::builder().default_credits(11).build().unwrap_err();
        assert!(matches!(err, SgpaError::InvalidConfig(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let c = ParseConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("redacted"));
    }
}
