//! 生成結果と生成失敗の分類

use common::domain::ModelName;
use thiserror::Error;

use super::card_candidate::CardCandidate;
use super::set_name::SetName;

/// 生成の失敗（呼び出し側に見せる分類）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// プロバイダが制限時間内に応答しなかった
    #[error("generation timed out")]
    Timeout,
    /// プロバイダが拒否・失敗した。status は上流の HTTP 相当ステータス
    #[error("generation service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },
    /// プロバイダの出力が壊れている、または有効なカードが 1 枚も無い
    #[error("invalid generation response: {reason}")]
    InvalidResponse { reason: String },
}

impl GenerationError {
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    pub fn empty_result() -> Self {
        Self::invalid_response("empty result")
    }

    /// リクエスト処理層に返す HTTP 相当ステータス
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Timeout => 504,
            Self::ServiceError { .. } => 502,
            Self::InvalidResponse { .. } => 422,
        }
    }
}

/// トークン使用量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// 1 回の生成で得られた結果。カードは必ず 1 枚以上
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    cards: Vec<CardCandidate>,
    suggested_name: SetName,
    model: ModelName,
    usage: TokenUsage,
}

impl GenerationResult {
    pub fn new(
        cards: Vec<CardCandidate>,
        suggested_name: SetName,
        model: ModelName,
        usage: TokenUsage,
    ) -> Result<Self, GenerationError> {
        if cards.is_empty() {
            return Err(GenerationError::empty_result());
        }
        Ok(Self {
            cards,
            suggested_name,
            model,
            usage,
        })
    }

    pub fn cards(&self) -> &[CardCandidate] {
        &self.cards
    }

    pub fn suggested_name(&self) -> &SetName {
        &self.suggested_name
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }
}
