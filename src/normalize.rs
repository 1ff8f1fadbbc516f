//! Reading AI payloads out of the generation endpoint.
//!
//! `POST /api/content/generate` answers with an envelope whose `data.content`
//! is LLM text: a JSON object, usually wrapped in a markdown code fence.
//! The fence convention comes from the upstream model; nothing outside this
//! module looks at it.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

use crate::api::ApiResponse;
use crate::model::{AiKind, AiResult};

pub const PARSE_FAILURE: &str = "Failed to parse AI response";

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("AI response content is not text")]
    NotText,

    #[error("AI response is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("AI response does not match a {kind} payload: {source}")]
    Shape {
        kind: AiKind,
        #[source]
        source: serde_json::Error,
    },
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```json\n?|\n?```").expect("fence pattern is valid"))
}

/// Removes every opening ```` ```json ```` and closing ```` ``` ```` marker,
/// each with at most one adjacent newline. Text without fences is returned
/// as is.
pub fn strip_code_fence(text: &str) -> String {
    fence_regex().replace_all(text, "").into_owned()
}

/// Strips the fence and parses what remains.
pub fn parse_fenced_json(text: &str) -> Result<Value, NormalizeError> {
    serde_json::from_str(&strip_code_fence(text)).map_err(NormalizeError::Json)
}

/// Parses fenced text into the payload `kind` asks for.
pub fn parse_ai_payload(kind: AiKind, text: &str) -> Result<AiResult, NormalizeError> {
    let value = parse_fenced_json(text)?;
    AiResult::from_value(kind, value).map_err(|source| NormalizeError::Shape { kind, source })
}

/// Turns a raw generation envelope into a typed one.
///
/// A successful envelope with a non-empty `data.content` is parsed; content
/// that is not text, or does not parse, yields `{success: false, error:
/// "Failed to parse AI response"}`. Any other envelope passes through with
/// its flags and messages untouched and its `data` validated directly
/// against `kind`.
pub fn normalize_generated(kind: AiKind, envelope: ApiResponse<Value>) -> ApiResponse<AiResult> {
    let content = envelope
        .data
        .as_ref()
        .filter(|_| envelope.success)
        .and_then(|data| data.get("content"))
        .filter(|content| is_present(content));

    if let Some(content) = content {
        let parsed = match content.as_str() {
            Some(text) => parse_ai_payload(kind, text),
            None => Err(NormalizeError::NotText),
        };
        return match parsed {
            Ok(result) => ApiResponse {
                success: envelope.success,
                data: Some(result),
                error: envelope.error,
                message: envelope.message,
            },
            Err(e) => {
                tracing::warn!(error = %e, "{}", PARSE_FAILURE);
                ApiResponse::failure(PARSE_FAILURE)
            }
        };
    }

    ApiResponse {
        success: envelope.success,
        data: envelope
            .data
            .and_then(|data| AiResult::from_value(kind, data).ok()),
        error: envelope.error,
        message: envelope.message,
    }
}

/// `null`, `false`, `0` and `""` count as no content at all.
fn is_present(content: &Value) -> bool {
    match content {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}
