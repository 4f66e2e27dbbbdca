//! 生成プレビュー（保存前のカード一覧）
//!
//! PreviewCardCollection は不変。edit / delete は新しいコレクションを返し、元は変わらない。

use std::collections::HashSet;

use common::domain::ModelName;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card_candidate::{CardCandidate, CardCandidateError, MAX_SIDE_CHARS};
use super::generation::GenerationResult;
use super::set_name::SetName;
use super::tmp_id::TmpId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreviewError {
    #[error("card not found: {0}")]
    CardNotFound(TmpId),
    #[error("card is already deleted: {0}")]
    CardAlreadyDeleted(TmpId),
    #[error("duplicate card id in preview: {0}")]
    DuplicateTmpId(TmpId),
    #[error("no active cards to save")]
    NoActiveCards,
    #[error("invalid content for card {tmp_id}: {source}")]
    InvalidContent {
        tmp_id: TmpId,
        source: CardCandidateError,
    },
}

/// プレビュー中の 1 枚
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewCard {
    tmp_id: TmpId,
    front: String,
    back: String,
    #[serde(default)]
    edited: bool,
    #[serde(default)]
    deleted: bool,
}

impl PreviewCard {
    pub fn from_candidate(tmp_id: TmpId, candidate: &CardCandidate) -> Self {
        Self {
            tmp_id,
            front: candidate.front().to_string(),
            back: candidate.back().to_string(),
            edited: false,
            deleted: false,
        }
    }

    pub fn tmp_id(&self) -> &TmpId {
        &self.tmp_id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn edited(&self) -> bool {
        self.edited
    }

    pub fn deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// 内容を差し替えたコピー。一度立った edited は戻らない
    fn with_content(&self, content: CardCandidate) -> Self {
        let changed = content.front() != self.front || content.back() != self.back;
        Self {
            tmp_id: self.tmp_id.clone(),
            front: content.front().to_string(),
            back: content.back().to_string(),
            edited: self.edited || changed,
            deleted: self.deleted,
        }
    }

    fn marked_deleted(&self) -> Self {
        Self {
            deleted: true,
            ..self.clone()
        }
    }

    fn check_sides(&self) -> Result<(), PreviewError> {
        let invalid = |source| PreviewError::InvalidContent {
            tmp_id: self.tmp_id.clone(),
            source,
        };
        let front_len = self.front.chars().count();
        if front_len > MAX_SIDE_CHARS {
            return Err(invalid(CardCandidateError::FrontTooLong { len: front_len }));
        }
        let back_len = self.back.chars().count();
        if back_len > MAX_SIDE_CHARS {
            return Err(invalid(CardCandidateError::BackTooLong { len: back_len }));
        }
        Ok(())
    }
}

/// プレビューカードの不変コレクション（tmp_id は一意）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PreviewCard>", into = "Vec<PreviewCard>")]
pub struct PreviewCardCollection {
    cards: Vec<PreviewCard>,
}

impl PreviewCardCollection {
    /// tmp_id の重複と各面の長さを検査して作る
    pub fn new(cards: Vec<PreviewCard>) -> Result<Self, PreviewError> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.tmp_id.clone()) {
                return Err(PreviewError::DuplicateTmpId(card.tmp_id.clone()));
            }
            card.check_sides()?;
        }
        Ok(Self { cards })
    }

    /// 候補に順に一時 ID を振って作る
    pub fn from_candidates(
        candidates: &[CardCandidate],
        mut next_id: impl FnMut() -> TmpId,
    ) -> Result<Self, PreviewError> {
        let cards = candidates
            .iter()
            .map(|c| PreviewCard::from_candidate(next_id(), c))
            .collect();
        Self::new(cards)
    }

    pub fn cards(&self) -> &[PreviewCard] {
        &self.cards
    }

    pub fn get(&self, tmp_id: &TmpId) -> Option<&PreviewCard> {
        self.cards.iter().find(|c| &c.tmp_id == tmp_id)
    }

    fn position(&self, tmp_id: &TmpId) -> Result<usize, PreviewError> {
        self.cards
            .iter()
            .position(|c| &c.tmp_id == tmp_id)
            .ok_or_else(|| PreviewError::CardNotFound(tmp_id.clone()))
    }

    /// 表面・裏面を差し替えたコレクションを返す。内容が変わった場合だけ edited が立つ。
    /// 削除済みのカードは編集できない。
    pub fn edit(&self, tmp_id: &TmpId, front: &str, back: &str) -> Result<Self, PreviewError> {
        let idx = self.position(tmp_id)?;
        let current = &self.cards[idx];
        if current.deleted {
            return Err(PreviewError::CardAlreadyDeleted(tmp_id.clone()));
        }
        let content =
            CardCandidate::new(front, back).map_err(|source| PreviewError::InvalidContent {
                tmp_id: tmp_id.clone(),
                source,
            })?;
        let mut cards = self.cards.clone();
        cards[idx] = current.with_content(content);
        Ok(Self { cards })
    }

    /// 削除済みにしたコレクションを返す。既に削除済みなら同じ内容のまま返す
    pub fn delete(&self, tmp_id: &TmpId) -> Result<Self, PreviewError> {
        let idx = self.position(tmp_id)?;
        if self.cards[idx].deleted {
            return Ok(self.clone());
        }
        let mut cards = self.cards.clone();
        cards[idx] = self.cards[idx].marked_deleted();
        Ok(Self { cards })
    }

    pub fn active_cards(&self) -> impl Iterator<Item = &PreviewCard> {
        self.cards.iter().filter(|c| c.is_active())
    }

    pub fn total_count(&self) -> usize {
        self.cards.len()
    }

    /// 編集済みの数（削除済みでも編集済みなら数える）
    pub fn edited_count(&self) -> usize {
        self.cards.iter().filter(|c| c.edited).count()
    }

    pub fn deleted_count(&self) -> usize {
        self.cards.iter().filter(|c| c.deleted).count()
    }

    pub fn active_count(&self) -> usize {
        self.total_count() - self.deleted_count()
    }

    /// 有効なカードが 1 枚も無い（空のコレクションも true）
    pub fn all_deleted(&self) -> bool {
        self.active_count() == 0
    }
}

impl TryFrom<Vec<PreviewCard>> for PreviewCardCollection {
    type Error = PreviewError;

    fn try_from(cards: Vec<PreviewCard>) -> Result<Self, Self::Error> {
        Self::new(cards)
    }
}

impl From<PreviewCardCollection> for Vec<PreviewCard> {
    fn from(c: PreviewCardCollection) -> Self {
        c.cards
    }
}

/// 生成結果をプレビューとして保持するもの（preview ファイルの中身）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPreview {
    pub suggested_name: SetName,
    pub model: ModelName,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub cards: PreviewCardCollection,
}

impl GenerationPreview {
    pub fn from_result(
        result: &GenerationResult,
        next_id: impl FnMut() -> TmpId,
    ) -> Result<Self, PreviewError> {
        let usage = result.usage();
        Ok(Self {
            suggested_name: result.suggested_name().clone(),
            model: result.model().clone(),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            cards: PreviewCardCollection::from_candidates(result.cards(), next_id)?,
        })
    }

    pub fn with_cards(self, cards: PreviewCardCollection) -> Self {
        Self { cards, ..self }
    }
}
