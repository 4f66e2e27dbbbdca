//! AI プロバイダを使う CardGenerator アダプタ
//!
//! プロバイダ失敗を生成失敗の分類に写し、レスポンスを解釈して候補を検証する。
//! 検証に落ちた候補は捨ててログに残す。1 枚も残らなければ InvalidResponse("empty result")。

use std::sync::Arc;

use common::llm::{AiProviderClient, ProviderError};
use common::ports::outbound::{Log, LogLevel, LogRecord};

use crate::adapter::prompt::build_request;
use crate::adapter::response_parser::parse_completion;
use crate::domain::{CardCandidate, GenerationError, GenerationResult, SetName, SourceText};
use crate::ports::outbound::CardGenerator;

/// プロバイダ失敗を生成失敗へ写す
pub fn map_provider_error(err: &ProviderError) -> GenerationError {
    match err {
        ProviderError::Timeout { .. } => GenerationError::Timeout,
        ProviderError::AuthenticationFailure { status, message }
        | ProviderError::ServerError { status, message } => GenerationError::ServiceError {
            status: *status,
            message: message.clone(),
        },
        // Retry-After は捨てる（再試行は呼び出し側の方針）
        ProviderError::RateLimited { message, .. } => GenerationError::ServiceError {
            status: 429,
            message: message.clone(),
        },
        ProviderError::InvalidRequest { message, .. } => {
            GenerationError::invalid_response(message.clone())
        }
        ProviderError::NetworkFailure(message) => GenerationError::ServiceError {
            status: 502,
            message: message.clone(),
        },
    }
}

/// AiProviderClient を 1 回呼んでカードを生成する
pub struct AiCardGenerator {
    client: Arc<dyn AiProviderClient>,
    logger: Arc<dyn Log>,
}

impl AiCardGenerator {
    pub fn new(client: Arc<dyn AiProviderClient>, logger: Arc<dyn Log>) -> Self {
        Self { client, logger }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.logger.log(&record.layer("adapter"));
    }
}

impl CardGenerator for AiCardGenerator {
    fn generate(&self, source: &SourceText) -> Result<GenerationResult, GenerationError> {
        let request = build_request(source);
        let raw = self.client.complete(&request).map_err(|e| {
            self.log(
                LogRecord::new(LogLevel::Error, e.to_string())
                    .kind("provider")
                    .field("provider", self.client.name())
                    .field("retryable", e.is_retryable()),
            );
            map_provider_error(&e)
        })?;

        let parsed = parse_completion(raw.body()).map_err(|e| {
            self.log(
                LogRecord::new(LogLevel::Error, e.to_string())
                    .kind("provider")
                    .field("provider", self.client.name()),
            );
            GenerationError::invalid_response(e.to_string())
        })?;

        if parsed.finish_reason != "stop" {
            self.log(
                LogRecord::new(LogLevel::Warn, "completion did not finish normally")
                    .kind("provider")
                    .field("finish_reason", parsed.finish_reason.as_str()),
            );
        }

        let mut cards = Vec::with_capacity(parsed.candidates.len());
        let mut dropped = 0usize;
        for (index, raw) in parsed.candidates.iter().enumerate() {
            match CardCandidate::try_from(raw) {
                Ok(card) => cards.push(card),
                Err(e) => {
                    dropped += 1;
                    self.log(
                        LogRecord::new(LogLevel::Warn, "dropped invalid card candidate")
                            .kind("validation")
                            .field("index", index)
                            .field("reason", e.to_string()),
                    );
                }
            }
        }
        if dropped > 0 {
            self.log(
                LogRecord::new(LogLevel::Warn, "some card candidates were dropped")
                    .kind("validation")
                    .field("dropped", dropped)
                    .field("kept", cards.len()),
            );
        }

        self.log(
            LogRecord::new(LogLevel::Info, "generation completed")
                .kind("provider")
                .field("provider", self.client.name())
                .field("response_id", parsed.id.as_str())
                .field("model", &*parsed.model)
                .field("prompt_tokens", parsed.usage.prompt_tokens)
                .field("completion_tokens", parsed.usage.completion_tokens)
                .field("total_tokens", parsed.total_tokens)
                .field("cards", cards.len()),
        );

        let name = SetName::from_suggestion(parsed.suggested_name.as_deref());
        GenerationResult::new(cards, name, parsed.model, parsed.usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_provider_error() {
        assert_eq!(
            map_provider_error(&ProviderError::Timeout { after_secs: 60 }),
            GenerationError::Timeout
        );
        assert_eq!(
            map_provider_error(&ProviderError::AuthenticationFailure {
                status: 401,
                message: "bad key".into()
            }),
            GenerationError::ServiceError {
                status: 401,
                message: "bad key".into()
            }
        );
        assert_eq!(
            map_provider_error(&ProviderError::RateLimited {
                retry_after_secs: Some(30),
                message: "slow down".into()
            }),
            GenerationError::ServiceError {
                status: 429,
                message: "slow down".into()
            }
        );
        assert_eq!(
            map_provider_error(&ProviderError::ServerError {
                status: 503,
                message: "down".into()
            }),
            GenerationError::ServiceError {
                status: 503,
                message: "down".into()
            }
        );
        assert_eq!(
            map_provider_error(&ProviderError::InvalidRequest {
                status: 400,
                message: "context too long".into()
            }),
            GenerationError::invalid_response("context too long")
        );
        assert_eq!(
            map_provider_error(&ProviderError::NetworkFailure("dns".into())),
            GenerationError::ServiceError {
                status: 502,
                message: "dns".into()
            }
        );
    }
}
