//! 表裏 1 組のカード候補

use thiserror::Error;

pub const MAX_SIDE_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardCandidateError {
    #[error("front is empty")]
    EmptyFront,
    #[error("back is empty")]
    EmptyBack,
    #[error("front is too long: {len} characters (maximum {max})", max = MAX_SIDE_CHARS)]
    FrontTooLong { len: usize },
    #[error("back is too long: {len} characters (maximum {max})", max = MAX_SIDE_CHARS)]
    BackTooLong { len: usize },
}

/// プロバイダ出力から取り出しただけの未検証の表裏
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCandidate {
    pub front: String,
    pub back: String,
}

impl RawCandidate {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// 検証済みのカード候補。表裏とも trim 後 1〜1000 文字
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCandidate {
    front: String,
    back: String,
}

impl CardCandidate {
    pub fn new(front: &str, back: &str) -> Result<Self, CardCandidateError> {
        let front = front.trim();
        let back = back.trim();
        let front_len = front.chars().count();
        let back_len = back.chars().count();
        if front_len == 0 {
            return Err(CardCandidateError::EmptyFront);
        }
        if front_len > MAX_SIDE_CHARS {
            return Err(CardCandidateError::FrontTooLong { len: front_len });
        }
        if back_len == 0 {
            return Err(CardCandidateError::EmptyBack);
        }
        if back_len > MAX_SIDE_CHARS {
            return Err(CardCandidateError::BackTooLong { len: back_len });
        }
        Ok(Self {
            front: front.to_string(),
            back: back.to_string(),
        })
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }
}

impl TryFrom<&RawCandidate> for CardCandidate {
    type Error = CardCandidateError;

    fn try_from(raw: &RawCandidate) -> Result<Self, Self::Error> {
        Self::new(&raw.front, &raw.back)
    }
}
