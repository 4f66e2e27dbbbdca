//! プロバイダ呼び出しの失敗分類
//!
//! HTTP ステータスと転送エラーを、呼び出し側が再試行可否を判断できる種別に写す。

use thiserror::Error;

/// プロバイダ呼び出しの失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// 時間切れ。after_secs は設定上の上限で、実際の経過時間ではない
    /// （408 はサーバが上限より早く打ち切った場合も同じ値を持つ）
    #[error("provider timed out (limit {after_secs}s)")]
    Timeout { after_secs: u64 },

    /// 認証情報が拒否された（401 / 403）
    #[error("authentication failed (HTTP {status}): {message}")]
    AuthenticationFailure { status: u16, message: String },

    /// クォータ超過（429）。Retry-After が秒数で来た場合のみ保持する
    #[error("rate limited (HTTP 429): {message}")]
    RateLimited {
        retry_after_secs: Option<u64>,
        message: String,
    },

    /// リクエスト内容の不正（その他の 4xx）
    #[error("invalid request (HTTP {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    /// プロバイダ側の障害（5xx）
    #[error("provider error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// DNS・接続などの転送エラー
    #[error("network failure: {0}")]
    NetworkFailure(String),
}

impl ProviderError {
    /// 非 2xx のステータスを分類する
    pub fn from_status(
        status: u16,
        retry_after_secs: Option<u64>,
        message: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::AuthenticationFailure { status, message },
            408 => Self::Timeout {
                after_secs: timeout_secs,
            },
            429 => Self::RateLimited {
                retry_after_secs,
                message,
            },
            500..=599 => Self::ServerError { status, message },
            _ => Self::InvalidRequest { status, message },
        }
    }

    /// 時間をおけば成功しうる失敗か
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::ServerError { .. }
                | Self::NetworkFailure(_)
        )
    }

    /// 上流の HTTP ステータス（分かる場合のみ）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailure { status, .. }
            | Self::InvalidRequest { status, .. }
            | Self::ServerError { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Timeout { .. } | Self::NetworkFailure(_) => None,
        }
    }
}
