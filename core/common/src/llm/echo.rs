//! Echoプロバイダの実装
//!
//! このプロバイダは実際にAPIを呼び出さず、プロンプトから 1 枚だけカードを組み立てて返します。
//! オフラインでの動作確認やテスト用に使用します。

use crate::llm::error::ProviderError;
use crate::llm::provider::{AiProviderClient, CompletionRequest, RawResponse};
use serde_json::json;

const MAX_BACK_CHARS: usize = 1000;

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl AiProviderClient for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn complete(&self, request: &CompletionRequest) -> Result<RawResponse, ProviderError> {
        let back: String = request.prompt.trim().chars().take(MAX_BACK_CHARS).collect();
        let content = json!({
            "suggested_name": "Echo",
            "cards": [{
                "front": "What did the echo provider receive?",
                "back": back
            }]
        });
        let prompt_tokens = request.prompt.split_whitespace().count();
        // choices[0].message.content は文字列として JSON を埋め込む（構造化出力と同じ形）
        let body = json!({
            "id": "echo",
            "model": "echo",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content.to_string() },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": prompt_tokens,
                "completion_tokens": 0,
                "total_tokens": prompt_tokens
            }
        });
        Ok(RawResponse::new(body.to_string()))
    }
}
