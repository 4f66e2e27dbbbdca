//! ポート定義
//!
//! common はライブラリなので Inbound ポートは持たない。
//! cards のユースケース・アダプタが外界（FS・時刻・環境変数・ログ・AI プロバイダ）に触れるための trait だけを置く。

pub mod outbound;
