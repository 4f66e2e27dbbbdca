//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    Clock, EnvResolver, FileJsonLog, FileSystem, Log, StdClock, StdEnvResolver, StdFileSystem,
    StderrLog, TeeLog,
};
use common::error::Error;

use crate::adapter::{
    JsonFilePreviewStore, JsonFileSetRepository, StdCardGeneratorFactory, StdIdGenerator,
    StdProfileLister,
};
use crate::ports::outbound::IdGenerator;
use crate::usecase::app::{CardsDeps, CardsUseCase, GenerationDeps, ObsDeps, StorageDeps};

/// main / テストが使う組み立て済みのアプリ
pub struct App {
    pub fs: Arc<dyn FileSystem>,
    pub logger: Arc<dyn Log>,
    pub use_case: CardsUseCase,
}

/// 標準アダプタ（実際の環境変数・時刻）で組み立てる
pub fn wire_cards(verbose: bool) -> Result<App, Error> {
    wire_cards_with(Arc::new(StdEnvResolver), Arc::new(StdClock), verbose)
}

/// 環境変数と時刻を差し替えて組み立てる
pub fn wire_cards_with(
    env_resolver: Arc<dyn EnvResolver>,
    clock: Arc<dyn Clock>,
    verbose: bool,
) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let home = env_resolver.resolve_home_dir()?;

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), home.log_path()));
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(TeeLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };

    let id_gen: Arc<dyn IdGenerator> = Arc::new(StdIdGenerator::new(clock));
    let deps = CardsDeps {
        generation: GenerationDeps {
            profile_lister: Arc::new(StdProfileLister::new(Arc::clone(&fs), home.clone())),
            generator_factory: Arc::new(StdCardGeneratorFactory::new(
                Arc::clone(&fs),
                Arc::clone(&env_resolver),
                home.clone(),
                Arc::clone(&logger),
            )),
            id_gen: Arc::clone(&id_gen),
        },
        storage: StorageDeps {
            preview_store: Arc::new(JsonFilePreviewStore::new(Arc::clone(&fs))),
            set_repository: Arc::new(JsonFileSetRepository::new(
                Arc::clone(&fs),
                home.sets_dir(),
                id_gen,
            )),
        },
        obs: ObsDeps {
            log: Arc::clone(&logger),
        },
    };
    Ok(App {
        fs,
        logger,
        use_case: CardsUseCase::new(deps),
    })
}
