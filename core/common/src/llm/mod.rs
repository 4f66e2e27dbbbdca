//! AI プロバイダクライアントの実装
//!
//! 外部の Chat Completions API へ 1 回だけリクエストし、生レスポンスまたは型付きの失敗を返す。
//! 再試行はしない（呼び出し側の方針）。

pub mod config;
pub mod echo;
pub mod error;
pub mod factory;
pub mod openai_compat;
pub mod provider;
pub mod resolver;

pub use error::ProviderError;
pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::{AiProviderClient, CompletionRequest, RawResponse, ResponseSchema};
