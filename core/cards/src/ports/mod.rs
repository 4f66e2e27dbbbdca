//! ポート定義（Inbound = ドライバから呼ばれる / Outbound = アプリが外界を使う）

pub mod inbound;
pub mod outbound;
