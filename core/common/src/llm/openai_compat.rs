//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! OpenRouter もこの形式で話す。base_url で任意のエンドポイントを指定可能。
//! 構造化出力（response_format: json_schema）を付けて 1 回だけ POST し、
//! 非 2xx と転送エラーを ProviderError に分類する。

use crate::error::Error;
use crate::llm::error::ProviderError;
use crate::llm::provider::{AiProviderClient, CompletionRequest, RawResponse};
use serde_json::{json, Value};
use std::time::Duration;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENROUTER_DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_TEMPERATURE: f64 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 120;

/// プロバイダ生成時のオプション（None のとき各デフォルト）
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Bearer トークン。None のとき Authorization を付けない
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    name: String,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f64,
    max_tokens: u32,
    timeout_secs: u64,
    client: reqwest::blocking::Client,
}

impl OpenAiCompatProvider {
    /// OpenRouter 用（https://openrouter.ai/api/v1）
    pub fn openrouter(options: ChatOptions) -> Result<Self, Error> {
        Self::build("openrouter", OPENROUTER_BASE_URL, OPENROUTER_DEFAULT_MODEL, options)
    }

    /// 任意の OpenAI 互換エンドポイント用
    pub fn openai_compat(options: ChatOptions) -> Result<Self, Error> {
        Self::build("openai_compat", OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL, options)
    }

    fn build(
        name: &str,
        default_base_url: &str,
        default_model: &str,
        options: ChatOptions,
    ) -> Result<Self, Error> {
        let model = options.model.unwrap_or_else(|| default_model.to_string());
        let base_url = options
            .base_url
            .unwrap_or_else(|| default_base_url.to_string())
            .trim_end_matches('/')
            .to_string();
        let temperature = options
            .temperature
            .map(f64::from)
            .unwrap_or(DEFAULT_TEMPERATURE);
        let timeout_secs = options
            .timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            name: name.to_string(),
            model,
            base_url,
            api_key: options.api_key,
            temperature,
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// リクエストペイロードを生成
    pub fn make_request_payload(&self, request: &CompletionRequest) -> Value {
        let mut messages: Vec<Value> = Vec::new();
        if let Some(s) = &request.system {
            messages.push(json!({ "role": "system", "content": s }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let mut payload = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": false
        });

        if let Some(schema) = &request.schema {
            payload["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": true,
                    "schema": schema.schema
                }
            });
        }

        payload
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                after_secs: self.timeout_secs,
            }
        } else {
            ProviderError::NetworkFailure(e.to_string())
        }
    }
}

/// エラーレスポンスからメッセージを抽出（error.message が無ければ本文そのまま）
fn error_message(status: reqwest::StatusCode, response_text: &str) -> String {
    serde_json::from_str::<Value>(response_text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| format!("HTTP {}: {}", status, response_text))
}

/// Retry-After（秒数形式のみ。HTTP-date は扱わない）
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

impl AiProviderClient for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(&self, request: &CompletionRequest) -> Result<RawResponse, ProviderError> {
        let payload = self.make_request_payload(request);

        let mut builder = self
            .client
            .post(self.url())
            .header("X-Title", "cards")
            .json(&payload);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let retry_after = retry_after_secs(response.headers());
        let response_text = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::from_status(
                status.as_u16(),
                retry_after,
                error_message(status, &response_text),
                self.timeout_secs,
            ));
        }

        Ok(RawResponse::new(response_text))
    }
}
