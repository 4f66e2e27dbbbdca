//! プロファイル一覧取得アダプタ（common::llm の load_profiles_config / list_profiles を使用）

use std::sync::Arc;

use common::domain::HomeDir;
use common::error::Error;
use common::llm::resolver::{list_profiles, load_profiles_config};
use common::ports::outbound::FileSystem;

use crate::ports::outbound::ProfileLister;

/// 標準プロファイル一覧取得（profiles.json とビルトイン）
pub struct StdProfileLister {
    fs: Arc<dyn FileSystem>,
    home: HomeDir,
}

impl StdProfileLister {
    pub fn new(fs: Arc<dyn FileSystem>, home: HomeDir) -> Self {
        Self { fs, home }
    }
}

impl ProfileLister for StdProfileLister {
    fn list_profiles(&self) -> Result<(Vec<String>, String), Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), &self.home)?;
        Ok(list_profiles(cfg.as_ref()))
    }
}
