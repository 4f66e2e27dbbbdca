//! 一時 ID を生成する IdGenerator の標準実装（Clock + シーケンス）

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use common::ports::outbound::Clock;

use crate::domain::TmpId;
use crate::ports::outbound::IdGenerator;

const EPOCH_MS: u64 = 1577836800000; // 2020-01-01 00:00:00 UTC
const SEQ_BITS: u64 = 8;
const BASE: u64 = 62;
const WIDTH: usize = 8;
const MAX_VAL: u64 = BASE.pow(WIDTH as u32) - 1;

/// 0-9, A-Z, a-z の順で辞書順＝数値順になる base62
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Clock + インスタンスごとのシーケンスで TmpId を生成する標準実装
///
/// 同じミリ秒に 256 個を超えて採番した場合は次のミリ秒の枠を先取りする（単調増加は保つ）。
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
    last: AtomicU64,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> TmpId {
        let ms_rel = self.clock.now_ms().saturating_sub(EPOCH_MS);
        let base = (ms_rel << SEQ_BITS).min(MAX_VAL);
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let next = if prev < base { base } else { (prev + 1).min(MAX_VAL) };
            match self
                .last
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return TmpId::new(to_base62(next)),
                Err(actual) => prev = actual,
            }
        }
    }
}

fn to_base62(mut n: u64) -> String {
    let mut buf = [b'0'; WIDTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    buf.iter().map(|&b| b as char).collect()
}
