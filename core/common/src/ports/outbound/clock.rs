//! 時刻取得 Outbound ポート
//!
//! 一時 ID の生成などに使う。テストでは固定時刻を返す実装を渡せる。

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定時刻など。
pub trait Clock: Send + Sync {
    /// 現在時刻をミリ秒（Unix epoch）で返す
    fn now_ms(&self) -> u64;
}
