//! プレビュー保存 Outbound ポート

use std::path::Path;

use common::error::Error;

use crate::domain::GenerationPreview;

/// プレビューをファイル等に読み書きする
pub trait PreviewStore: Send + Sync {
    fn load(&self, path: &Path) -> Result<GenerationPreview, Error>;
    fn save(&self, path: &Path, preview: &GenerationPreview) -> Result<(), Error>;
}
