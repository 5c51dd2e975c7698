//! The oracle: first stage of the cascade, backed by a vision model.
//!
//! [`DocumentOracle`] is the seam. The shipped implementation, [`LlmOracle`],
//! rasterises every page, sends the pages in one multimodal request through
//! `edgequake-llm`, and reads a JSON array of subject rows back out of the
//! reply. Tests plug in their own oracle instead.
//!
//! Every failure is an [`OracleError`]. The parser logs it and moves on to the
//! local strategies; there are no retries.

use crate::config::ParseConfig;
use crate::error::OracleError;
use crate::pipeline::render::render_page_images;
use crate::prompts::{ORACLE_EXTRACTION_PROMPT, ORACLE_PROMPT_VERSION};
use crate::record::{parse_mark, RawRecord};
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_MODEL: &str = "gpt-4.1-nano";
const UNKNOWN_SUBJECT: &str = "UNKNOWN SUBJECT";

/// An external document-understanding service.
#[async_trait]
pub trait DocumentOracle: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Read subject rows out of a whole PDF. `Ok` always holds at least one
    /// row; an empty reply is [`OracleError::Empty`].
    async fn extract(&self, document_name: &str, pdf: &[u8]) -> Result<Vec<RawRecord>, OracleError>;
}

/// Run `oracle` under a hard deadline. A reply with no rows is [`OracleError::Empty`].
pub async fn run_oracle(
    oracle: &dyn DocumentOracle,
    document_name: &str,
    pdf: &[u8],
    timeout_secs: u64,
) -> Result<Vec<RawRecord>, OracleError> {
    let start = Instant::now();
    let outcome = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        oracle.extract(document_name, pdf),
    )
    .await
    .unwrap_or(Err(OracleError::Timeout { secs: timeout_secs }))
    .and_then(|rows| {
        if rows.is_empty() {
            Err(OracleError::Empty)
        } else {
            Ok(rows)
        }
    });

    match &outcome {
        Ok(rows) => info!(
            "Oracle {} returned {} rows in {:?}",
            oracle.name(),
            rows.len(),
            start.elapsed()
        ),
        Err(e) => warn!("Oracle {} failed: {}", oracle.name(), e),
    }
    outcome
}

// ── LLM-backed oracle ───────────────────────────────────────────────────────

/// Vision-model oracle over rendered page images.
pub struct LlmOracle {
    provider: Arc<dyn LLMProvider>,
    label: String,
    prompt: String,
    password: Option<String>,
    max_rendered_pixels: u32,
    options: CompletionOptions,
}

impl LlmOracle {
    pub fn new(provider: Arc<dyn LLMProvider>, label: impl Into<String>, config: &ParseConfig) -> Self {
        Self {
            provider,
            label: label.into(),
            prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| ORACLE_EXTRACTION_PROMPT.to_string()),
            password: config.password.clone(),
            max_rendered_pixels: config.max_rendered_pixels,
            options: CompletionOptions {
                temperature: Some(config.temperature),
                max_tokens: Some(config.max_tokens),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl DocumentOracle for LlmOracle {
    fn name(&self) -> &str {
        &self.label
    }

    async fn extract(&self, document_name: &str, pdf: &[u8]) -> Result<Vec<RawRecord>, OracleError> {
        let images = render_page_images(
            document_name,
            pdf.to_vec(),
            self.password.clone(),
            self.max_rendered_pixels,
        )
        .await
        .map_err(|e| OracleError::Request {
            detail: format!("could not prepare pages: {e}"),
        })?;

        debug!(
            "Oracle request: {} page images, prompt {}",
            images.len(),
            ORACLE_PROMPT_VERSION
        );

        let messages = vec![
            ChatMessage::system(self.prompt.as_str()),
            ChatMessage::user_with_images("Extract the subject rows from these result pages.", images),
        ];

        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| OracleError::Request {
                detail: e.to_string(),
            })?;

        debug!(
            "Oracle reply: {} input tokens, {} output tokens",
            response.prompt_tokens, response.completion_tokens
        );

        parse_oracle_response(&response.content)
    }
}

// ── Reply parsing ───────────────────────────────────────────────────────────

static RE_JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Marks may arrive as numbers, numeric strings or junk.
fn mark_value(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => parse_mark(s),
        _ => 0,
    }
}

fn text_value<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).map(str::trim)
}

/// Pull the outermost JSON array out of a model reply and read its rows.
/// Rows without a code are skipped.
pub fn parse_oracle_response(reply: &str) -> Result<Vec<RawRecord>, OracleError> {
    let array = RE_JSON_ARRAY
        .find(reply)
        .ok_or_else(|| OracleError::MalformedResponse {
            detail: "no JSON array in reply".into(),
        })?;

    let rows: Vec<Value> =
        serde_json::from_str(array.as_str()).map_err(|e| OracleError::MalformedResponse {
            detail: e.to_string(),
        })?;

    let records: Vec<RawRecord> = rows
        .iter()
        .filter_map(|row| {
            let code = text_value(row, "code").filter(|c| !c.is_empty())?;
            let name = text_value(row, "name")
                .filter(|n| !n.is_empty())
                .unwrap_or(UNKNOWN_SUBJECT);
            Some(
                RawRecord::new(
                    code,
                    name,
                    mark_value(row.get("internal")),
                    mark_value(row.get("external")),
                    mark_value(row.get("total")),
                )
                .with_flag(text_value(row, "result").unwrap_or("P")),
            )
        })
        .collect();

    if records.is_empty() {
        return Err(OracleError::Empty);
    }
    Ok(records)
}

// ── Resolution ──────────────────────────────────────────────────────────────

fn create_provider(name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, OracleError> {
    ProviderFactory::create_llm_provider(name, model).map_err(|e| OracleError::NotConfigured {
        hint: format!("provider '{name}': {e}"),
    })
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Pick the oracle for a parse, most specific source first:
///
/// 1. a pre-built oracle on the config
/// 2. `provider_name` (+ `model`) on the config
/// 3. `SGPA_LLM_PROVIDER` + `SGPA_MODEL` in the environment
/// 4. `GEMINI_API_KEY` in the environment
/// 5. whatever `ProviderFactory::from_env` can find
///
/// Fails with [`OracleError::NotConfigured`] when the oracle is disabled or
/// no credential exists; the parser then skips straight to local extraction.
pub fn resolve_oracle(config: &ParseConfig) -> Result<Arc<dyn DocumentOracle>, OracleError> {
    if !config.oracle_enabled {
        return Err(OracleError::NotConfigured {
            hint: "oracle disabled".into(),
        });
    }

    if let Some(ref oracle) = config.oracle {
        return Ok(Arc::clone(oracle));
    }

    let (provider, label) = if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        (create_provider(name, model)?, format!("{name}/{model}"))
    } else if let (Some(prov), Some(model)) =
        (env_non_empty("SGPA_LLM_PROVIDER"), env_non_empty("SGPA_MODEL"))
    {
        (create_provider(&prov, &model)?, format!("{prov}/{model}"))
    } else if env_non_empty("GEMINI_API_KEY").is_some() {
        let model = config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
        (create_provider("gemini", model)?, format!("gemini/{model}"))
    } else {
        let (llm, _embedding) = ProviderFactory::from_env().map_err(|e| OracleError::NotConfigured {
            hint: format!("no LLM credential in the environment: {e}"),
        })?;
        (llm, "auto".to_string())
    };

    info!("Oracle resolved: {label}");
    Ok(Arc::new(LlmOracle::new(provider, label, config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_array() {
        let reply = r#"[{"code":"bcs401","name":"ADA","internal":49,"external":36,"total":85,"result":"P"}]"#;
        let rows = parse_oracle_response(reply).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "BCS401");
        assert_eq!((rows[0].internal, rows[0].external, rows[0].total), (49, 36, 85));
        assert_eq!(rows[0].result_flag.as_deref(), Some("P"));
    }

    #[test]
    fn parses_array_inside_prose_and_fences() {
        let reply = "Here you go:\n```json\n[\n {\"code\": \"BCS402\", \"total\": \"65\", \"internal\": \"40\", \"external\": 25}\n]\n```\nDone.";
        let rows = parse_oracle_response(reply).unwrap();
        assert_eq!(rows[0].code, "BCS402");
        assert_eq!(rows[0].name, UNKNOWN_SUBJECT);
        assert_eq!(rows[0].total, 65);
        assert_eq!(rows[0].internal, 40);
    }

    #[test]
    fn bad_marks_become_zero() {
        let reply = r#"[{"code":"BCS403","internal":"AB","external":null,"total":71.0,"result":"F"}]"#;
        let rows = parse_oracle_response(reply).unwrap();
        assert_eq!(rows[0].internal, 0);
        assert_eq!(rows[0].external, 0);
        assert_eq!(rows[0].total, 71);
        assert_eq!(rows[0].result_flag.as_deref(), Some("F"));
    }

    #[test]
    fn rows_without_code_are_skipped() {
        let reply = r#"[{"name":"orphan","total":50},{"code":"","total":50},{"code":"BCS404","total":50}]"#;
        let rows = parse_oracle_response(reply).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn empty_array_is_empty_error() {
        assert!(matches!(parse_oracle_response("[]"), Err(OracleError::Empty)));
        assert!(matches!(
            parse_oracle_response(r#"[{"name":"no code"}]"#),
            Err(OracleError::Empty)
        ));
    }

    #[test]
    fn malformed_replies() {
        assert!(matches!(
            parse_oracle_response("I could not read the document."),
            Err(OracleError::MalformedResponse { .. })
        ));
        assert!(matches!(
            parse_oracle_response("[{\"code\": \"BCS401\",]"),
            Err(OracleError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn disabled_oracle_is_not_configured() {
        let config = ParseConfig::builder().oracle_enabled(false).build().unwrap();
        assert!(matches!(
            resolve_oracle(&config),
            Err(OracleError::NotConfigured { .. })
        ));
    }

    struct Sleeper;

    #[async_trait]
    impl DocumentOracle for Sleeper {
        fn name(&self) -> &str {
            "sleeper"
        }

        async fn extract(&self, _: &str, _: &[u8]) -> Result<Vec<RawRecord>, OracleError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec![RawRecord::new("BCS401", "", 1, 1, 2)])
        }
    }

    #[tokio::test]
    async fn run_oracle_enforces_deadline() {
        let err = run_oracle(&Sleeper, "x.pdf", b"%PDF", 1).await.unwrap_err();
        assert!(matches!(err, OracleError::Timeout { secs: 1 }));
    }

    struct Silent;

    #[async_trait]
    impl DocumentOracle for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        async fn extract(&self, _: &str, _: &[u8]) -> Result<Vec<RawRecord>, OracleError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn run_oracle_treats_no_rows_as_empty() {
        let err = run_oracle(&Silent, "x.pdf", b"%PDF", 5).await.unwrap_err();
        assert!(matches!(err, OracleError::Empty));
    }

    #[test]
    fn prebuilt_oracle_takes_priority() {
        let config = ParseConfig::builder()
            .oracle(Arc::new(Sleeper))
            .build()
            .unwrap();
        assert_eq!(resolve_oracle(&config).ok().map(|o| o.name().to_string()), Some("sleeper".into()));
    }
}
