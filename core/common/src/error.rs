//! エラーハンドリング
//!
//! インフラ層（設定・ファイル・HTTP 等）の失敗を 1 つの型に集約し、終了コードと対応づける。

use thiserror::Error as ThisError;

/// 共通エラー型
///
/// 終了コードは sysexits 準拠（64: 引数不正, 65: データ不正, 74: I/O, 78: 設定）。
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Env(String),
    #[error("{0}")]
    Http(String),
}

impl Error {
    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// 種別を保ったままメッセージに文脈（プロファイル名等）を付け足す
    pub fn with_context(self, context: impl AsRef<str>) -> Self {
        let add = |msg: String| format!("{} [{}]", msg, context.as_ref());
        match self {
            Self::InvalidArgument(m) => Self::InvalidArgument(add(m)),
            Self::Json(m) => Self::Json(add(m)),
            Self::Io(m) => Self::Io(add(m)),
            Self::Env(m) => Self::Env(add(m)),
            Self::Http(m) => Self::Http(add(m)),
        }
    }

    /// 使い方の誤りか（main で usage を表示するか判定する）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 64,
            Self::Json(_) => 65,
            Self::Io(_) | Self::Http(_) => 74,
            Self::Env(_) => 78,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_keeps_kind() {
        let err = Error::env("KEY is not set").with_context("profile: openrouter");
        assert_eq!(err.to_string(), "KEY is not set [profile: openrouter]");
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());
    }

    #[test]
    fn test_exit_codes_per_kind() {
        assert_eq!(Error::json("x").exit_code(), 65);
        assert_eq!(Error::io_msg("x").exit_code(), 74);
        assert_eq!(Error::http("x").exit_code(), 74);
        assert_eq!(Error::env("x").exit_code(), 78);
    }
}
