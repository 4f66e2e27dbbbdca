//! cards 共通ライブラリ
//!
//! AI プロバイダクライアント・設定・ログなど、`cards` コマンドが外界と話すための部品を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// AI プロバイダクライアント
pub mod llm;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
