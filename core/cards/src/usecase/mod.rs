//! ユースケース（ports 経由で生成・プレビュー編集・保存を行う）

pub mod app;
