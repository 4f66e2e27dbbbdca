//! CardGenerator 生成アダプタ（common::llm の load_profiles_config / resolve_provider / create_provider を使用）

use std::sync::Arc;

use common::domain::{HomeDir, ModelName, ProviderName};
use common::error::Error;
use common::llm::resolver::{load_profiles_config, resolve_provider, ResolvedProvider};
use common::llm::{create_provider, AiProviderClient};
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, LogRecord};

use crate::adapter::AiCardGenerator;
use crate::ports::outbound::{CardGenerator, CardGeneratorFactory};

fn provider_context(resolved: &ResolvedProvider) -> String {
    let mut extra: Vec<String> = Vec::new();
    if let Some(ref u) = resolved.base_url {
        extra.push(format!("base_url: {}", u));
    }
    if let Some(ref m) = resolved.model {
        extra.push(format!("model: {}", m));
    }
    if extra.is_empty() {
        format!("profile: {}", resolved.profile_name)
    } else {
        format!("profile: {} ({})", resolved.profile_name, extra.join(", "))
    }
}

/// 標準 CardGenerator ファクトリ（profiles.json と環境変数からプロバイダを組み立てる）
pub struct StdCardGeneratorFactory {
    fs: Arc<dyn FileSystem>,
    env_resolver: Arc<dyn EnvResolver>,
    home: HomeDir,
    logger: Arc<dyn Log>,
}

impl StdCardGeneratorFactory {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        env_resolver: Arc<dyn EnvResolver>,
        home: HomeDir,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            fs,
            env_resolver,
            home,
            logger,
        }
    }
}

impl CardGeneratorFactory for StdCardGeneratorFactory {
    fn create(
        &self,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<Arc<dyn CardGenerator>, Error> {
        let cfg = load_profiles_config(self.fs.as_ref(), &self.home)?;
        let mut resolved = resolve_provider(profile, cfg.as_ref())?;
        if let Some(m) = model {
            resolved.model = Some(m.to_string());
        }
        let context = provider_context(&resolved);
        let client = create_provider(&resolved, self.env_resolver.as_ref())
            .map_err(|e| e.with_context(&context))?;
        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Debug, "provider resolved")
                .layer("adapter")
                .kind("provider")
                .field("provider", client.name())
                .field("context", context),
        );
        let client: Arc<dyn AiProviderClient> = Arc::new(client);
        Ok(Arc::new(AiCardGenerator::new(client, Arc::clone(&self.logger))))
    }
}
