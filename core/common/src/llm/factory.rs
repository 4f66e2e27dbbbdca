//! プロバイダファクトリー
//!
//! 解決済みプロファイルから適切なプロバイダを作成します。

use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::error::ProviderError;
use crate::llm::openai_compat::{ChatOptions, OpenAiCompatProvider};
use crate::llm::provider::{AiProviderClient, CompletionRequest, RawResponse};
use crate::llm::resolver::ResolvedProvider;
use crate::ports::outbound::EnvResolver;

/// OpenRouter の API キーを読む環境変数（プロファイルで上書き可能）
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenRouter（https://openrouter.ai）
    OpenRouter,
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAiCompat,
    /// Echo（API を呼ばない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openrouter" => Some(Self::OpenRouter),
            "openai_compat" | "openai" => Some(Self::OpenAiCompat),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::OpenAiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Chat(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl AiProviderClient for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Chat(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn complete(&self, request: &CompletionRequest) -> Result<RawResponse, ProviderError> {
        match self {
            Self::Chat(p) => p.complete(request),
            Self::Echo(p) => p.complete(request),
        }
    }
}

/// プロバイダを作成する
///
/// API キーは `resolved.api_key_env`（未指定なら種別ごとのデフォルト）の環境変数から読む。
/// OpenRouter はキー必須、OpenAI 互換は未設定なら Authorization を付けない。
pub fn create_provider(
    resolved: &ResolvedProvider,
    env: &dyn EnvResolver,
) -> Result<AnyProvider, Error> {
    match resolved.provider_type {
        ProviderType::OpenRouter => {
            let key_env = resolved
                .api_key_env
                .as_deref()
                .unwrap_or(OPENROUTER_API_KEY_ENV);
            let api_key = env.var(key_env).ok_or_else(|| {
                Error::env(format!(
                    "{} environment variable is not set (profile '{}')",
                    key_env, resolved.profile_name
                ))
            })?;
            let provider = OpenAiCompatProvider::openrouter(chat_options(resolved, Some(api_key)))?;
            Ok(AnyProvider::Chat(provider))
        }
        ProviderType::OpenAiCompat => {
            let api_key = resolved.api_key_env.as_deref().and_then(|name| env.var(name));
            let provider = OpenAiCompatProvider::openai_compat(chat_options(resolved, api_key))?;
            Ok(AnyProvider::Chat(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

fn chat_options(resolved: &ResolvedProvider, api_key: Option<String>) -> ChatOptions {
    ChatOptions {
        model: resolved.model.clone(),
        base_url: resolved.base_url.clone(),
        api_key,
        temperature: resolved.temperature,
        max_tokens: resolved.max_tokens,
        timeout_secs: resolved.timeout_secs,
    }
}
