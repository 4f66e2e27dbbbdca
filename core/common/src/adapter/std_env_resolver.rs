//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::HomeDir;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Some(home) = self.var("CARDS_HOME") {
            return Ok(HomeDir::new(PathBuf::from(home)));
        }

        let config_base = self
            .var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| self.var("HOME").map(|h| PathBuf::from(h).join(".config")))
            .ok_or_else(|| Error::env("HOME is not set"))?;

        let mut path = config_base;
        path.push("cards");
        Ok(HomeDir::new(path))
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }
}
