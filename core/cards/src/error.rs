//! cards のエラー集約
//!
//! ドメイン・生成・インフラの失敗を 1 つにまとめ、HTTP 相当ステータスと終了コードに対応づける。

use common::error::Error;
use thiserror::Error as ThisError;

use crate::domain::{GenerationError, PreviewError, SetNameError, SourceTextError};

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CardsError {
    #[error(transparent)]
    Common(#[from] Error),
    #[error(transparent)]
    SourceText(#[from] SourceTextError),
    #[error(transparent)]
    SetName(#[from] SetNameError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

impl CardsError {
    /// リクエスト処理層に返す HTTP 相当ステータス
    pub fn http_status(&self) -> u16 {
        match self {
            Self::SourceText(_) | Self::SetName(_) => 422,
            Self::Generation(e) => e.http_status(),
            Self::Preview(PreviewError::CardNotFound(_)) => 404,
            Self::Preview(PreviewError::CardAlreadyDeleted(_)) => 409,
            Self::Preview(_) => 422,
            Self::Common(Error::InvalidArgument(_)) => 422,
            Self::Common(_) => 500,
        }
    }

    /// 終了コード（sysexits 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Common(e) => e.exit_code(),
            Self::SourceText(_) | Self::SetName(_) | Self::Preview(_) => 65,
            Self::Generation(GenerationError::Timeout) => 75,
            Self::Generation(GenerationError::ServiceError { .. }) => 69,
            Self::Generation(GenerationError::InvalidResponse { .. }) => 76,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Common(e) if e.is_usage())
    }
}
