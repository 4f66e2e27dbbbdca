use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use common::adapter::StdClock;
use common::domain::{ModelName, ProviderName};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{cards_content, completion_body, source_of_len, TestEnv};
use crate::cli::Config;
use crate::domain::{CardsCommand, GenerationError, GenerationPreview, SourceInput, TmpId};
use crate::error::CardsError;
use crate::ports::inbound::UseCaseRunner;
use crate::wiring;

/// 一時ホームで標準アダプターを組み立て、Runner で run する
fn run_in(env: TestEnv, command: CardsCommand) -> Result<i32, CardsError> {
    let app = wiring::wire_cards_with(Arc::new(env), Arc::new(StdClock), false).unwrap();
    let runner = crate::Runner { app };
    runner.run(Config {
        verbose: false,
        command,
    })
}

fn run_app(home: &Path, command: CardsCommand) -> Result<i32, CardsError> {
    run_in(TestEnv::new(home), command)
}

fn write_source(dir: &Path, len: usize) -> PathBuf {
    let p = dir.join("notes.txt");
    std::fs::write(&p, source_of_len(len)).unwrap();
    p
}

fn generate(input: PathBuf, output: PathBuf, profile: &str) -> CardsCommand {
    CardsCommand::Generate {
        input: SourceInput::File(input),
        output: Some(output),
        profile: Some(ProviderName::new(profile)),
        model: None,
    }
}

fn load(path: &Path) -> GenerationPreview {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_echo_profile_full_flow() {
    let home = tempfile::tempdir().unwrap();
    let input = write_source(home.path(), 1500);
    let preview = home.path().join("preview.json");

    assert_eq!(
        run_app(home.path(), generate(input, preview.clone(), "echo")).unwrap(),
        0
    );
    let p = load(&preview);
    assert_eq!(p.cards.total_count(), 1);
    assert_eq!(&*p.model, "echo");
    let tmp_id: TmpId = p.cards.cards()[0].tmp_id().clone();
    assert_eq!(tmp_id.len(), 8);

    assert_eq!(
        run_app(home.path(), CardsCommand::Show { preview: preview.clone() }).unwrap(),
        0
    );
    assert_eq!(
        run_app(
            home.path(),
            CardsCommand::Edit {
                preview: preview.clone(),
                tmp_id: tmp_id.clone(),
                front: Some("What is ATP?".to_string()),
                back: Some("The cell's energy currency".to_string()),
            }
        )
        .unwrap(),
        0
    );
    assert_eq!(load(&preview).cards.edited_count(), 1);

    assert_eq!(
        run_app(
            home.path(),
            CardsCommand::Save {
                preview: preview.clone(),
                name: Some("Energy".to_string()),
            }
        )
        .unwrap(),
        0
    );
    let saved: Vec<_> = std::fs::read_dir(home.path().join("sets"))
        .unwrap()
        .collect();
    assert_eq!(saved.len(), 1);

    let log = std::fs::read_to_string(home.path().join("logs").join("cards.jsonl")).unwrap();
    assert!(log.contains("command started"));
    assert!(log.contains("\"set saved\""));
    for line in log.lines() {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn test_delete_then_save_reports_no_active_cards() {
    let home = tempfile::tempdir().unwrap();
    let input = write_source(home.path(), 1200);
    let preview = home.path().join("p.json");
    run_app(home.path(), generate(input, preview.clone(), "echo")).unwrap();
    let tmp_id = load(&preview).cards.cards()[0].tmp_id().clone();

    run_app(
        home.path(),
        CardsCommand::Delete {
            preview: preview.clone(),
            tmp_id,
        },
    )
    .unwrap();
    let err = run_app(home.path(), CardsCommand::Save { preview, name: None }).unwrap_err();
    assert_eq!(err.exit_code(), 65);
    assert!(!err.is_usage());
    assert!(err.to_string().contains("no active cards"));
}

#[test]
fn test_short_source_exits_with_data_error() {
    let home = tempfile::tempdir().unwrap();
    let input = write_source(home.path(), 500);
    let err = run_app(
        home.path(),
        generate(input, home.path().join("p.json"), "echo"),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 65);
    assert!(err.to_string().contains("too short"));
    assert!(!home.path().join("p.json").exists());
}

#[test]
fn test_missing_input_file_is_io_error() {
    let home = tempfile::tempdir().unwrap();
    let err = run_app(
        home.path(),
        generate(home.path().join("absent.txt"), home.path().join("p.json"), "echo"),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_default_profile_without_api_key_is_config_error() {
    let home = tempfile::tempdir().unwrap();
    let input = write_source(home.path(), 1500);
    let err = run_app(
        home.path(),
        CardsCommand::Generate {
            input: SourceInput::File(input),
            output: None,
            profile: None,
            model: Some(ModelName::new("openai/gpt-4o")),
        },
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 78);
    assert!(err.to_string().contains("OPENROUTER_API_KEY"));
}

#[test]
fn test_profiles_command() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_app(home.path(), CardsCommand::Profiles).unwrap(), 0);
}

#[test]
fn test_unknown_profile_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let input = write_source(home.path(), 1500);
    let err = run_app(
        home.path(),
        generate(input, home.path().join("p.json"), "missing"),
    )
    .unwrap_err();
    assert!(err.is_usage());
}

// --- HTTP プロバイダ（wiremock）を通した経路

fn start_with(mock: Mock) -> (tokio::runtime::Runtime, MockServer) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        mock.mount(&server).await;
        server
    });
    (rt, server)
}

fn write_mock_profile(home: &Path, server: &MockServer) {
    let profiles = json!({
        "default_provider": "mock",
        "providers": {
            "mock": {
                "type": "openai_compat",
                "base_url": server.uri(),
                "model": "openai/gpt-4o-mini",
                "api_key_env": "MOCK_API_KEY",
                "timeout_secs": 1
            }
        }
    });
    std::fs::write(home.join("profiles.json"), profiles.to_string()).unwrap();
}

fn env_for(home: &Path) -> TestEnv {
    TestEnv::new(home).with_var("MOCK_API_KEY", "sk-test")
}

#[test]
fn test_http_provider_success_writes_preview() {
    let (_rt, server) = start_with(
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(completion_body(&cards_content("Cells", 5), "stop")),
            )
            .expect(1),
    );
    let home = tempfile::tempdir().unwrap();
    write_mock_profile(home.path(), &server);
    let input = write_source(home.path(), 1500);
    let preview = home.path().join("p.json");

    let code = run_in(
        env_for(home.path()),
        CardsCommand::Generate {
            input: SourceInput::File(input),
            output: Some(preview.clone()),
            profile: None,
            model: None,
        },
    )
    .unwrap();
    assert_eq!(code, 0);
    let p = load(&preview);
    assert_eq!(p.cards.total_count(), 5);
    assert_eq!(&*p.suggested_name, "Cells");
    assert_eq!(p.completion_tokens, 340);
}

#[test]
fn test_http_rate_limit_surfaces_as_service_error() {
    let (_rt, server) = start_with(
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("Retry-After", "30")
                    .set_body_json(json!({ "error": { "message": "Rate limit exceeded" } })),
            ),
    );
    let home = tempfile::tempdir().unwrap();
    write_mock_profile(home.path(), &server);
    let input = write_source(home.path(), 1500);

    let err = run_in(
        env_for(home.path()),
        CardsCommand::Generate {
            input: SourceInput::File(input),
            output: None,
            profile: None,
            model: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        CardsError::Generation(GenerationError::ServiceError {
            status: 429,
            message: "Rate limit exceeded".to_string()
        })
    );
    assert_eq!(err.http_status(), 502);
    assert_eq!(err.exit_code(), 69);
}

#[test]
fn test_http_garbage_body_is_invalid_response() {
    let (_rt, server) = start_with(
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all")),
    );
    let home = tempfile::tempdir().unwrap();
    write_mock_profile(home.path(), &server);
    let input = write_source(home.path(), 1500);
    let err = run_in(
        env_for(home.path()),
        CardsCommand::Generate {
            input: SourceInput::File(input),
            output: None,
            profile: None,
            model: None,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CardsError::Generation(GenerationError::InvalidResponse { .. })
    ));
    assert_eq!(err.exit_code(), 76);
}

#[test]
fn test_http_timeout_surfaces_as_generation_timeout() {
    let (_rt, server) = start_with(
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(completion_body(&cards_content("Late", 5), "stop"))
                    .set_delay(Duration::from_secs(3)),
            ),
    );
    let home = tempfile::tempdir().unwrap();
    write_mock_profile(home.path(), &server);
    let input = write_source(home.path(), 1500);
    let err = run_in(
        env_for(home.path()),
        CardsCommand::Generate {
            input: SourceInput::File(input),
            output: None,
            profile: None,
            model: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, CardsError::Generation(GenerationError::Timeout));
    assert_eq!(err.http_status(), 504);
    assert_eq!(err.exit_code(), 75);
}
