//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ホームディレクトリのパス（profiles.json・ログ・保存済みセットの置き場）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.0.join("profiles.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.0.join("logs").join("cards.jsonl")
    }

    pub fn sets_dir(&self) -> PathBuf {
        self.0.join("sets")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

/// プロバイダ名（openrouter, echo 等。profiles.json のキー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderName(String);

impl ProviderName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ProviderName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ProviderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for ProviderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// モデル名（openai/gpt-4o-mini 等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(String);

impl ModelName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for ModelName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ModelName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_paths() {
        let home = HomeDir::new("/tmp/cards-home");
        assert_eq!(home.profiles_path(), PathBuf::from("/tmp/cards-home/profiles.json"));
        assert_eq!(home.log_path(), PathBuf::from("/tmp/cards-home/logs/cards.jsonl"));
        assert_eq!(home.sets_dir(), PathBuf::from("/tmp/cards-home/sets"));
    }

    #[test]
    fn test_model_name_serde_transparent() {
        let m = ModelName::new("openai/gpt-4o-mini");
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"openai/gpt-4o-mini\"");
    }
}
