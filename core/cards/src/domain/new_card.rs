//! 保存対象のカードとセット ID

use serde::{Deserialize, Serialize};

use super::preview::PreviewCard;

/// カードの出自
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardOrigin {
    /// AI 生成のまま
    AiFull,
    /// AI 生成をユーザーが編集した
    AiEdited,
    /// ユーザーが手で書いた
    Manual,
}

/// 永続化するカード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub front: String,
    pub back: String,
    pub origin: CardOrigin,
    pub was_edited: bool,
}

impl NewCard {
    pub fn from_preview(card: &PreviewCard) -> Self {
        let origin = if card.edited() {
            CardOrigin::AiEdited
        } else {
            CardOrigin::AiFull
        };
        Self {
            front: card.front().to_string(),
            back: card.back().to_string(),
            origin,
            was_edited: card.edited(),
        }
    }
}

/// 保存済みセットの ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(String);

impl SetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for SetId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for SetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
