//! cards コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の Runner で match してディスパッチする。

use std::path::PathBuf;

use common::domain::{ModelName, ProviderName};

use super::tmp_id::TmpId;

/// 原文の読み込み元
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    /// `-` のとき標準入力
    Stdin,
    File(PathBuf),
}

impl SourceInput {
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// cards のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardsCommand {
    /// 原文からカードを生成し、プレビューを書き出す
    Generate {
        input: SourceInput,
        output: Option<PathBuf>,
        profile: Option<ProviderName>,
        model: Option<ModelName>,
    },
    /// プレビューの一覧表示
    Show { preview: PathBuf },
    /// 1 枚を編集（省略した面は現状維持）
    Edit {
        preview: PathBuf,
        tmp_id: TmpId,
        front: Option<String>,
        back: Option<String>,
    },
    /// 1 枚を削除
    Delete { preview: PathBuf, tmp_id: TmpId },
    /// 有効なカードをセットとして保存
    Save {
        preview: PathBuf,
        name: Option<String>,
    },
    /// 利用可能なプロファイル一覧
    Profiles,
}

impl CardsCommand {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Show { .. } => "show",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::Save { .. } => "save",
            Self::Profiles => "profiles",
        }
    }
}
