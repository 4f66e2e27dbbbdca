//! プロバイダの生レスポンスを解釈するパーサ
//!
//! Chat Completions 形式の封筒を検査し、content に埋め込まれた JSON からカード候補を取り出す。
//! 候補の中身（空・長さ）はここでは検証しない。

use std::sync::OnceLock;

use common::domain::ModelName;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{RawCandidate, TokenUsage};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseParseError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("provider returned an error: {0}")]
    ProviderReported(String),
    #[error("response is missing {0}")]
    MissingField(&'static str),
    #[error("message content is not valid JSON: {0}")]
    InvalidContent(String),
    #[error("message content has no cards array")]
    MissingCards,
}

/// 解釈済みの補完結果（カード候補は未検証）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCompletion {
    pub id: String,
    pub model: ModelName,
    pub finish_reason: String,
    pub usage: TokenUsage,
    pub total_tokens: u32,
    pub suggested_name: Option<String>,
    pub candidates: Vec<RawCandidate>,
}

fn fence_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^\s*```[A-Za-z]*[ \t]*\r?\n(.*?)\r?\n?\s*```\s*$").ok())
        .as_ref()
}

/// ```json ... ``` で囲まれていれば中身だけを返す
fn strip_code_fence(content: &str) -> &str {
    fence_regex()
        .and_then(|re| re.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
}

fn str_field<'a>(v: &'a Value, name: &'static str) -> Result<&'a str, ResponseParseError> {
    v.get(name)
        .and_then(Value::as_str)
        .ok_or(ResponseParseError::MissingField(name))
}

fn token_count(usage: Option<&Value>, name: &str) -> u32 {
    usage
        .and_then(|u| u.get(name))
        .and_then(Value::as_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn first_str<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| v.get(*k).and_then(Value::as_str))
}

fn to_candidate(v: &Value) -> RawCandidate {
    let side = |name: &str| {
        v.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    RawCandidate::new(side("front"), side("back"))
}

fn parse_content(content: &str) -> Result<(Option<String>, Vec<RawCandidate>), ResponseParseError> {
    let inner: Value = serde_json::from_str(strip_code_fence(content).trim())
        .map_err(|e| ResponseParseError::InvalidContent(e.to_string()))?;
    let (name, cards) = match &inner {
        Value::Array(items) => (None, items),
        Value::Object(_) => {
            let name = first_str(&inner, &["suggested_name", "name", "set_name"]);
            let cards = ["cards", "flashcards"]
                .iter()
                .find_map(|k| inner.get(*k).and_then(Value::as_array))
                .ok_or(ResponseParseError::MissingCards)?;
            (name.map(str::to_string), cards)
        }
        _ => {
            return Err(ResponseParseError::InvalidContent(
                "expected an object or an array".to_string(),
            ))
        }
    };
    Ok((name, cards.iter().map(to_candidate).collect()))
}

/// 生レスポンス本文を解釈する
pub fn parse_completion(body: &str) -> Result<ParsedCompletion, ResponseParseError> {
    let v: Value =
        serde_json::from_str(body).map_err(|e| ResponseParseError::InvalidJson(e.to_string()))?;
    if let Some(err) = v.get("error").filter(|e| e.is_object()) {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(ResponseParseError::ProviderReported(message.to_string()));
    }
    let id = str_field(&v, "id")?;
    let model = str_field(&v, "model")?;
    let choice = v
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or(ResponseParseError::MissingField("choices[0]"))?;
    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .ok_or(ResponseParseError::MissingField("choices[0].message.content"))?;
    let finish_reason = choice
        .get("finish_reason")
        .and_then(Value::as_str)
        .ok_or(ResponseParseError::MissingField("choices[0].finish_reason"))?;

    let usage = v.get("usage");
    let prompt_tokens = token_count(usage, "prompt_tokens");
    let completion_tokens = token_count(usage, "completion_tokens");
    let total_tokens = match token_count(usage, "total_tokens") {
        0 => prompt_tokens.saturating_add(completion_tokens),
        n => n,
    };

    let (suggested_name, candidates) = parse_content(content)?;
    Ok(ParsedCompletion {
        id: id.to_string(),
        model: ModelName::new(model),
        finish_reason: finish_reason.to_string(),
        usage: TokenUsage {
            prompt_tokens,
            completion_tokens,
        },
        total_tokens,
        suggested_name,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(content: &str) -> String {
        json!({
            "id": "gen-1",
            "model": "openai/gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 1200, "completion_tokens": 340, "total_tokens": 1540 }
        })
        .to_string()
    }

    #[test]
    fn test_parse_well_formed_response() {
        let content = r#"{"suggested_name":"Cells","cards":[{"front":"Q1","back":"A1"},{"front":"Q2","back":"A2"}]}"#;
        let parsed = parse_completion(&envelope(content)).unwrap();
        assert_eq!(parsed.id, "gen-1");
        assert_eq!(&*parsed.model, "openai/gpt-4o-mini");
        assert_eq!(parsed.finish_reason, "stop");
        assert_eq!(parsed.usage.prompt_tokens, 1200);
        assert_eq!(parsed.usage.completion_tokens, 340);
        assert_eq!(parsed.total_tokens, 1540);
        assert_eq!(parsed.suggested_name.as_deref(), Some("Cells"));
        assert_eq!(
            parsed.candidates,
            vec![RawCandidate::new("Q1", "A1"), RawCandidate::new("Q2", "A2")]
        );
    }

    #[test]
    fn test_parse_strips_markdown_fence() {
        let content = "```json\n{\"cards\":[{\"front\":\"Q\",\"back\":\"A\"}]}\n```";
        let parsed = parse_completion(&envelope(content)).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert!(parsed.suggested_name.is_none());
    }

    #[test]
    fn test_parse_bare_array_and_aliases() {
        let parsed = parse_completion(&envelope(r#"[{"front":"Q","back":"A"}]"#)).unwrap();
        assert_eq!(parsed.candidates, vec![RawCandidate::new("Q", "A")]);

        let parsed =
            parse_completion(&envelope(r#"{"name":"N","flashcards":[{"front":"Q","back":"A"}]}"#))
                .unwrap();
        assert_eq!(parsed.suggested_name.as_deref(), Some("N"));
        assert_eq!(parsed.candidates.len(), 1);
    }

    #[test]
    fn test_non_object_or_non_string_candidates_become_empty() {
        let parsed =
            parse_completion(&envelope(r#"{"cards":["oops",{"front":1,"back":"A"}]}"#)).unwrap();
        assert_eq!(
            parsed.candidates,
            vec![RawCandidate::default(), RawCandidate::new("", "A")]
        );
    }

    #[test]
    fn test_missing_usage_defaults_to_zero() {
        let body = json!({
            "id": "x",
            "model": "m",
            "choices": [{ "message": { "content": "[]" }, "finish_reason": "stop" }]
        })
        .to_string();
        let parsed = parse_completion(&body).unwrap();
        assert_eq!(parsed.usage, TokenUsage::default());
        assert_eq!(parsed.total_tokens, 0);
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn test_invalid_bodies() {
        assert!(matches!(
            parse_completion("not json").unwrap_err(),
            ResponseParseError::InvalidJson(_)
        ));
        let no_choices = json!({"id":"x","model":"m","choices":[]}).to_string();
        assert_eq!(
            parse_completion(&no_choices).unwrap_err(),
            ResponseParseError::MissingField("choices[0]")
        );
        let no_model = json!({"id":"x","choices":[]}).to_string();
        assert_eq!(
            parse_completion(&no_model).unwrap_err(),
            ResponseParseError::MissingField("model")
        );
        assert!(matches!(
            parse_completion(&envelope("I cannot help with that.")).unwrap_err(),
            ResponseParseError::InvalidContent(_)
        ));
        assert_eq!(
            parse_completion(&envelope(r#"{"suggested_name":"x"}"#)).unwrap_err(),
            ResponseParseError::MissingCards
        );
    }

    #[test]
    fn test_error_object_in_body() {
        let body = json!({"error": {"message": "model overloaded", "code": 503}}).to_string();
        assert_eq!(
            parse_completion(&body).unwrap_err(),
            ResponseParseError::ProviderReported("model overloaded".to_string())
        );
    }
}
