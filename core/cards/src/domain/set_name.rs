//! セット名のドメイン型

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_SET_NAME_CHARS: usize = 100;
/// プロバイダが名前を提案しなかったときの名前
pub const DEFAULT_SET_NAME: &str = "Generated set";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetNameError {
    #[error("set name is empty")]
    Empty,
    #[error("set name is too long: {len} characters (maximum {max})", max = MAX_SET_NAME_CHARS)]
    TooLong { len: usize },
}

/// trim 後 1〜100 文字のセット名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SetName(String);

impl SetName {
    pub fn new(raw: &str) -> Result<Self, SetNameError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len == 0 {
            return Err(SetNameError::Empty);
        }
        if len > MAX_SET_NAME_CHARS {
            return Err(SetNameError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// プロバイダの提案名から作る。空なら既定名、長すぎれば切り詰める
    pub fn from_suggestion(raw: Option<&str>) -> Self {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Self(DEFAULT_SET_NAME.to_string());
        }
        let truncated: String = trimmed.chars().take(MAX_SET_NAME_CHARS).collect();
        Self(truncated.trim_end().to_string())
    }
}

impl TryFrom<String> for SetName {
    type Error = SetNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<SetName> for String {
    fn from(name: SetName) -> Self {
        name.0
    }
}

impl std::ops::Deref for SetName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for SetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
