//! 生成元テキストのドメイン型
//!
//! 前後の空白を除いた長さ（Unicode スカラー値の個数）が 1000〜10000 のときだけ構築できる。

use thiserror::Error;

pub const MIN_SOURCE_CHARS: usize = 1000;
pub const MAX_SOURCE_CHARS: usize = 10000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceTextError {
    #[error("source text is empty")]
    EmptyInput,
    #[error("source text is too short: {len} characters (minimum {min})", min = MIN_SOURCE_CHARS)]
    TooShort { len: usize },
    #[error("source text is too long: {len} characters (maximum {max})", max = MAX_SOURCE_CHARS)]
    TooLong { len: usize },
}

/// 検証済みの生成元テキスト（trim 済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText(String);

impl SourceText {
    pub fn parse(raw: &str) -> Result<Self, SourceTextError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Err(SourceTextError::EmptyInput);
        }
        if len < MIN_SOURCE_CHARS {
            return Err(SourceTextError::TooShort { len });
        }
        if len > MAX_SOURCE_CHARS {
            return Err(SourceTextError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::ops::Deref for SourceText {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
