//! AI プロバイダクライアントのトレイト定義

use crate::llm::error::ProviderError;
use serde_json::Value;

/// 構造化出力のスキーマ（response_format.json_schema に載せる）
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: Value,
}

/// 1 回分の補完リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            schema: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// プロバイダから受け取った生のレスポンス本文（JSON 文字列）
///
/// 形の検証はパーサ側で行う。ここでは HTTP 2xx で受け取ったことだけを保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    body: String,
}

impl RawResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// AI プロバイダクライアントのトレイト
///
/// 実装（OpenRouter / OpenAI 互換 / Echo）はこのトレイトを実装する。
/// `complete` は外部への呼び出しをちょうど 1 回だけ行う。
pub trait AiProviderClient: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストを送信して生レスポンスを取得
    ///
    /// # Returns
    /// * `Ok(RawResponse)` - HTTP 2xx のレスポンス本文
    /// * `Err(ProviderError)` - タイムアウト・認証・レート制限・サーバエラー等
    fn complete(&self, request: &CompletionRequest) -> Result<RawResponse, ProviderError>;
}
