//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリと API キー等の環境変数を解決する。
//! usecase・factory はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. CARDS_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/cards（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/cards
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// 任意の環境変数（空文字は未設定扱い）
    fn var(&self, name: &str) -> Option<String>;
}
