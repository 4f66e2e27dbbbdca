//! カード生成 Outbound ポート
//!
//! 検証済みの原文を渡し、検証済みカードの生成結果か分類済みの失敗を受け取る。

use crate::domain::{GenerationError, GenerationResult, SourceText};

/// 原文からカード候補を生成する
pub trait CardGenerator: Send + Sync {
    fn generate(&self, source: &SourceText) -> Result<GenerationResult, GenerationError>;
}
