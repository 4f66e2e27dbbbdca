//! カードセット永続化 Outbound ポート

use common::error::Error;

use crate::domain::{NewCard, SetId, SetName};

/// 名前付きのカードセットを保存し、採番した ID を返す
pub trait SetRepository: Send + Sync {
    fn save_set(&self, name: &SetName, cards: &[NewCard]) -> Result<SetId, Error>;
}
