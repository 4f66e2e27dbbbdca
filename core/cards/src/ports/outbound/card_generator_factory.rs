//! カード生成器の生成 Outbound ポート
//!
//! usecase はこの trait 経由でプロバイダ解決とクライアント生成を行う。

use std::sync::Arc;

use common::domain::{ModelName, ProviderName};
use common::error::Error;

use super::CardGenerator;

/// 指定の profile/model で CardGenerator を組み立てる
pub trait CardGeneratorFactory: Send + Sync {
    fn create(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<Arc<dyn CardGenerator>, Error>;
}
