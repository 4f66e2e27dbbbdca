//! cards のユースケース
//!
//! 原文の検証 → 生成 → プレビュー（編集・削除）→ セット保存 の流れを ports 越しに組み立てる。
//! 表示は CLI の責務のため、usecase はデータのみ返す。

use std::path::Path;
use std::sync::Arc;

use common::domain::{ModelName, ProviderName};
use common::ports::outbound::{Log, LogLevel, LogRecord};

use crate::domain::{
    GenerationPreview, GenerationResult, NewCard, PreviewError, SetId, SetName, SourceText, TmpId,
};
use crate::error::CardsError;
use crate::ports::outbound::{
    CardGeneratorFactory, IdGenerator, PreviewStore, ProfileLister, SetRepository,
};

// --- 責務別 Deps（usecase が定義を所有し、wiring は組み立てるだけ）

pub struct CardsDeps {
    pub generation: GenerationDeps,
    pub storage: StorageDeps,
    pub obs: ObsDeps,
}

pub struct GenerationDeps {
    pub profile_lister: Arc<dyn ProfileLister>,
    pub generator_factory: Arc<dyn CardGeneratorFactory>,
    pub id_gen: Arc<dyn IdGenerator>,
}

pub struct StorageDeps {
    pub preview_store: Arc<dyn PreviewStore>,
    pub set_repository: Arc<dyn SetRepository>,
}

pub struct ObsDeps {
    pub log: Arc<dyn Log>,
}

/// 保存結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSet {
    pub id: SetId,
    pub name: SetName,
    pub card_count: usize,
}

/// cards のユースケース（アダプター経由で I/O を行う）
pub struct CardsUseCase {
    deps: CardsDeps,
}

impl CardsUseCase {
    pub fn new(deps: CardsDeps) -> Self {
        Self { deps }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.obs.log.log(&record.layer("usecase"));
    }

    /// ソート済みプロファイル名リストとデフォルトプロファイル名
    pub fn list_profiles(&self) -> Result<(Vec<String>, String), CardsError> {
        Ok(self.deps.generation.profile_lister.list_profiles()?)
    }

    /// 原文を検証してカードを生成する。検証に落ちたらプロバイダは呼ばない
    pub fn generate_from_text(
        &self,
        raw: &str,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
    ) -> Result<GenerationResult, CardsError> {
        let source = SourceText::parse(raw)?;
        self.log(
            LogRecord::new(LogLevel::Info, "generation requested")
                .kind("generation")
                .field("source_chars", source.char_count()),
        );
        let generator = self
            .deps
            .generation
            .generator_factory
            .create(profile, model)?;
        Ok(generator.generate(&source)?)
    }

    /// 生成結果に一時 ID を振ってプレビューにする
    pub fn start_preview(&self, result: &GenerationResult) -> Result<GenerationPreview, CardsError> {
        let id_gen = &self.deps.generation.id_gen;
        Ok(GenerationPreview::from_result(result, || id_gen.next_id())?)
    }

    /// 生成してプレビューを作り、output があればそこへ書き出す
    pub fn generate_preview(
        &self,
        raw: &str,
        profile: Option<&ProviderName>,
        model: Option<&ModelName>,
        output: Option<&Path>,
    ) -> Result<GenerationPreview, CardsError> {
        let result = self.generate_from_text(raw, profile, model)?;
        let preview = self.start_preview(&result)?;
        if let Some(path) = output {
            self.deps.storage.preview_store.save(path, &preview)?;
        }
        Ok(preview)
    }

    pub fn load_preview(&self, path: &Path) -> Result<GenerationPreview, CardsError> {
        Ok(self.deps.storage.preview_store.load(path)?)
    }

    /// 1 枚を編集して書き戻す。front / back を省略した面は現在の内容のまま
    pub fn edit_card(
        &self,
        path: &Path,
        tmp_id: &TmpId,
        front: Option<&str>,
        back: Option<&str>,
    ) -> Result<GenerationPreview, CardsError> {
        let preview = self.load_preview(path)?;
        let current = preview
            .cards
            .get(tmp_id)
            .ok_or_else(|| PreviewError::CardNotFound(tmp_id.clone()))?;
        let front = front.unwrap_or(current.front()).to_string();
        let back = back.unwrap_or(current.back()).to_string();
        let cards = preview.cards.edit(tmp_id, &front, &back)?;
        let preview = preview.with_cards(cards);
        self.deps.storage.preview_store.save(path, &preview)?;
        self.log(
            LogRecord::new(LogLevel::Info, "card edited")
                .kind("preview")
                .field("tmp_id", &**tmp_id),
        );
        Ok(preview)
    }

    /// 1 枚を削除して書き戻す（削除済みなら何もしない）
    pub fn delete_card(&self, path: &Path, tmp_id: &TmpId) -> Result<GenerationPreview, CardsError> {
        let preview = self.load_preview(path)?;
        let cards = preview.cards.delete(tmp_id)?;
        if cards == preview.cards {
            return Ok(preview);
        }
        let preview = preview.with_cards(cards);
        self.deps.storage.preview_store.save(path, &preview)?;
        self.log(
            LogRecord::new(LogLevel::Info, "card deleted")
                .kind("preview")
                .field("tmp_id", &**tmp_id),
        );
        Ok(preview)
    }

    /// 有効なカードをセットとして保存する。name 省略時は提案名
    pub fn save_set(&self, path: &Path, name: Option<&str>) -> Result<SavedSet, CardsError> {
        let preview = self.load_preview(path)?;
        if preview.cards.all_deleted() {
            return Err(PreviewError::NoActiveCards.into());
        }
        let name = match name {
            Some(n) => SetName::new(n)?,
            None => preview.suggested_name.clone(),
        };
        let cards: Vec<NewCard> = preview
            .cards
            .active_cards()
            .map(NewCard::from_preview)
            .collect();
        let id = self.deps.storage.set_repository.save_set(&name, &cards)?;
        self.log(
            LogRecord::new(LogLevel::Info, "set saved")
                .kind("persistence")
                .field("set_id", &*id)
                .field("cards", cards.len())
                .field("edited", preview.cards.edited_count())
                .field("deleted", preview.cards.deleted_count()),
        );
        Ok(SavedSet {
            id,
            name,
            card_count: cards.len(),
        })
    }
}
