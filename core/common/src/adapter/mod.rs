//! アダプター（Outbound ポートの標準実装）
//!
//! usecase は ports::outbound の trait 経由でのみファイル・時刻・環境変数・ログに触れる。
//! ここには標準実装（Std*）とファイルログを置く。

pub mod file_json_log;
pub mod stderr_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use crate::ports::outbound::{Clock, EnvResolver, FileMetadata, FileSystem, Log};
pub use file_json_log::{FileJsonLog, NoopLog};
pub use stderr_log::{StderrLog, TeeLog};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
