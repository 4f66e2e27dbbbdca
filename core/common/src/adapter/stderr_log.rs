//! 人間向けログ（LogRecord → stderr へ要点のみ出力）
//!
//! -v 指定時だけ使う。ファイルログ（FileJsonLog）と併用するため TeeLog で束ねる。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

fn level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    }
}

/// 1 行に整形する（fields は長すぎる場合に切り詰める）
pub fn format_human(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", level_label(record.level), record.message);
    if let Some(fields) = &record.fields {
        let s = serde_json::to_string(fields).unwrap_or_default();
        if s.chars().count() <= FIELDS_SUMMARY_MAX {
            line.push(' ');
            line.push_str(&s);
        } else {
            let truncated: String = s.chars().take(FIELDS_SUMMARY_MAX).collect();
            line.push_str(&format!(" {}... (len={})", truncated, s.len()));
        }
    }
    line
}

/// stderr に人間向けの 1 行を出す Log 実装
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", format_human(record));
        Ok(())
    }
}

/// 複数の Log に同じレコードを流す。1 つが失敗しても残りには書く
pub struct TeeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for log in &self.logs {
            if let Err(e) = log.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
