//! 一時 ID 生成 Outbound ポート
//!
//! テストでは連番を返す実装を渡せる。

use crate::domain::TmpId;

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> TmpId;
}
