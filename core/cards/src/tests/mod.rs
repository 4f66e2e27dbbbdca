//! バイナリ全体のテスト（モックプロバイダ・一時ディレクトリで配線して確かめる）

mod run_app_tests;

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use common::domain::HomeDir;
use common::error::Error;
use common::llm::{AiProviderClient, CompletionRequest, ProviderError, RawResponse};
use common::ports::outbound::{EnvResolver, Log, LogRecord};
use serde_json::json;

/// 決まった応答を返し、呼び出し回数と最後のリクエストを覚えるプロバイダ
pub struct ScriptedProvider {
    response: Result<RawResponse, ProviderError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with(Ok(RawResponse::new(body)))
    }

    pub fn failing(err: ProviderError) -> Self {
        Self::with(Err(err))
    }

    fn with(response: Result<RawResponse, ProviderError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl AiProviderClient for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete(&self, request: &CompletionRequest) -> Result<RawResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.response.clone()
    }
}

/// 書き込まれたレコードを溜めておく Log
#[derive(Default)]
pub struct MemoryLog(Mutex<Vec<LogRecord>>);

impl MemoryLog {
    pub fn records(&self) -> Vec<LogRecord> {
        self.0.lock().unwrap().clone()
    }
}

impl Log for MemoryLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.0.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// ホームを一時ディレクトリに向けた EnvResolver
pub struct TestEnv {
    home: HomeDir,
    vars: HashMap<String, String>,
}

impl TestEnv {
    pub fn new(home: &Path) -> Self {
        Self {
            home: HomeDir::new(home),
            vars: HashMap::new(),
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvResolver for TestEnv {
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        Ok(self.home.clone())
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// 指定文字数の原文
pub fn source_of_len(n: usize) -> String {
    let unit = "Cells use mitochondria to turn glucose into ATP. ";
    let mut text: String = unit.chars().cycle().take(n).collect();
    // 末尾が空白だと trim で長さが変わるので、数え通りの長さを保つ
    if text.ends_with(' ') {
        text.pop();
        text.push('.');
    }
    text
}

/// Chat Completions 形式の応答本文（content に JSON を文字列として埋め込む）
pub fn completion_body(content: &serde_json::Value, finish_reason: &str) -> String {
    json!({
        "id": "gen-test",
        "model": "openai/gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content.to_string() },
            "finish_reason": finish_reason
        }],
        "usage": { "prompt_tokens": 1200, "completion_tokens": 340, "total_tokens": 1540 }
    })
    .to_string()
}

/// n 枚の有効なカードを持つ content
pub fn cards_content(name: &str, n: usize) -> serde_json::Value {
    let cards: Vec<serde_json::Value> = (1..=n)
        .map(|i| json!({ "front": format!("Question {}", i), "back": format!("Answer {}", i) }))
        .collect();
    json!({ "suggested_name": name, "cards": cards })
}
