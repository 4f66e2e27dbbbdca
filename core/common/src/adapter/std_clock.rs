//! 標準時刻実装（一時 ID の採番に使う）

use crate::ports::outbound::Clock;
use std::time::{SystemTime, UNIX_EPOCH};

/// SystemTime を Unix epoch からのミリ秒に直して返す Clock 実装
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }
}
