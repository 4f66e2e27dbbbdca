//! 生成リクエストの組み立て（システム指示・ユーザープロンプト・構造化出力スキーマ）

use common::llm::{CompletionRequest, ResponseSchema};
use serde_json::json;

use crate::domain::{SourceText, MAX_SIDE_CHARS};

/// 構造化出力スキーマの名前
pub const SCHEMA_NAME: &str = "flashcards";

fn system_instruction() -> String {
    format!(
        "You are an expert flashcard author. Turn the user's source text into question/answer \
flashcards for spaced repetition.\n\
Rules:\n\
- Produce between 5 and 20 cards covering the most important facts and concepts.\n\
- The front is a concise, self-contained question or prompt.\n\
- The back is a precise answer to the front, without filler.\n\
- Each side must be at most {max} characters.\n\
- Write the cards in the same language as the source text.\n\
- Suggest a short name for the set (at most 100 characters).\n\
- Respond only with JSON matching the provided schema.",
        max = MAX_SIDE_CHARS
    )
}

fn user_prompt(source: &SourceText) -> String {
    format!(
        "Create flashcards from the following source text.\n\n<source>\n{}\n</source>",
        &**source
    )
}

fn response_schema() -> ResponseSchema {
    ResponseSchema {
        name: SCHEMA_NAME.to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "suggested_name": { "type": "string" },
                "cards": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "front": { "type": "string" },
                            "back": { "type": "string" }
                        },
                        "required": ["front", "back"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["suggested_name", "cards"],
            "additionalProperties": false
        }),
    }
}

/// 原文から 1 回分の補完リクエストを作る
pub fn build_request(source: &SourceText) -> CompletionRequest {
    CompletionRequest::new(user_prompt(source))
        .with_system(system_instruction())
        .with_schema(response_schema())
}
