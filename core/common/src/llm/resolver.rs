//! profiles.json の読み込みとプロバイダ解決

use crate::domain::{HomeDir, ProviderName};
use crate::error::Error;
use crate::llm::config::{ProfilesConfig, ProviderTypeKind};
use crate::llm::factory::ProviderType;
use crate::ports::outbound::FileSystem;

/// 既定のプロバイダ名（profiles.json に default_provider が無いとき）
pub const DEFAULT_PROVIDER: &str = "openrouter";

/// 解決済みプロバイダ（ProviderType + オプション）
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    /// 解決に使ったプロファイル名（例: "local", "openrouter"）。エラー表示用
    pub profile_name: String,
    pub provider_type: ProviderType,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Default for ResolvedProvider {
    fn default() -> Self {
        Self {
            profile_name: DEFAULT_PROVIDER.to_string(),
            provider_type: ProviderType::OpenRouter,
            base_url: None,
            model: None,
            api_key_env: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

/// profiles.json を読み込む。ファイルが無ければ Ok(None)、JSON が壊れていれば Err（メッセージにパス含める）
pub fn load_profiles_config(
    fs: &dyn FileSystem,
    home: &HomeDir,
) -> Result<Option<ProfilesConfig>, Error> {
    let path = home.profiles_path();
    if !fs.exists(path.as_path()) {
        return Ok(None);
    }
    let contents = fs.read_to_string(path.as_path())?;
    ProfilesConfig::parse(&contents)
        .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))
        .map(Some)
}

fn provider_type_kind_to_provider_type(k: ProviderTypeKind) -> ProviderType {
    match k {
        ProviderTypeKind::OpenRouter => ProviderType::OpenRouter,
        ProviderTypeKind::OpenaiCompat => ProviderType::OpenAiCompat,
        ProviderTypeKind::Echo => ProviderType::Echo,
    }
}

/// 利用可能なビルトインプロバイダ名
fn builtin_provider_names() -> &'static [&'static str] {
    &["openrouter", "openai_compat", "echo"]
}

/// 利用可能なプロファイル名（ビルトイン + profiles.json、ソート済み）と既定名を返す
pub fn list_profiles(cfg: Option<&ProfilesConfig>) -> (Vec<String>, String) {
    let mut names: Vec<String> = builtin_provider_names()
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    if let Some(cfg) = cfg {
        for k in cfg.providers.keys() {
            if !names.contains(k) {
                names.push(k.clone());
            }
        }
    }
    names.sort();
    let default = cfg
        .and_then(|c| c.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
    (names, default)
}

/// 要求されたプロバイダ名（None の場合は default）と ProfilesConfig から ResolvedProvider を解決する。
/// 不明なプロバイダの場合は Error::invalid_argument（is_usage == true）で利用可能一覧を返す。
pub fn resolve_provider(
    requested: Option<&ProviderName>,
    cfg: Option<&ProfilesConfig>,
) -> Result<ResolvedProvider, Error> {
    let effective_name: &str = requested.map(|r| r.as_ref()).unwrap_or_else(|| {
        cfg.and_then(|c| c.default_provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    });

    // 1) cfg.providers に名前があればそれを優先
    if let Some(profile) = cfg.and_then(|c| c.providers.get(effective_name)) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type: provider_type_kind_to_provider_type(profile.type_),
            base_url: profile.base_url.clone(),
            model: profile.model.clone(),
            api_key_env: profile.api_key_env.clone(),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
            timeout_secs: profile.timeout_secs,
        });
    }

    // 2) ビルトイン (ProviderType::from_str) を試す
    if let Some(provider_type) = ProviderType::from_str(effective_name) {
        return Ok(ResolvedProvider {
            profile_name: effective_name.to_string(),
            provider_type,
            ..ResolvedProvider::default()
        });
    }

    // 3) どれも無ければ usage エラー
    let (available, _) = list_profiles(cfg);
    Err(Error::invalid_argument(format!(
        "Unknown provider: '{}'. Available: {}",
        effective_name,
        available.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::StdFileSystem;
    use crate::llm::config::ProviderProfile;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_provider_no_cfg_requested_none() {
        let r = resolve_provider(None, None).unwrap();
        assert_eq!(r.profile_name, "openrouter");
        assert_eq!(r.provider_type, ProviderType::OpenRouter);
        assert!(r.model.is_none());
    }

    #[test]
    fn test_resolve_provider_no_cfg_requested_echo() {
        let name = ProviderName::new("echo");
        let r = resolve_provider(Some(&name), None).unwrap();
        assert_eq!(r.provider_type, ProviderType::Echo);
    }

    #[test]
    fn test_resolve_provider_no_cfg_unknown() {
        let name = ProviderName::new("unknown_provider");
        let e = resolve_provider(Some(&name), None).unwrap_err();
        assert!(e.is_usage());
        assert!(e.to_string().contains("Unknown provider"));
        assert!(e.to_string().contains("unknown_provider"));
        assert!(e.to_string().contains("Available"));
    }

    #[test]
    fn test_resolve_provider_cfg_default_provider() {
        let cfg = ProfilesConfig {
            default_provider: Some("router".to_string()),
            providers: {
                let mut m = HashMap::new();
                m.insert(
                    "router".to_string(),
                    ProviderProfile {
                        type_: ProviderTypeKind::OpenRouter,
                        model: Some("anthropic/claude-3.5-haiku".to_string()),
                        api_key_env: Some("MY_KEY".to_string()),
                        timeout_secs: Some(30),
                        ..ProviderProfile::default()
                    },
                );
                m
            },
        };
        let r = resolve_provider(None, Some(&cfg)).unwrap();
        assert_eq!(r.profile_name, "router");
        assert_eq!(r.provider_type, ProviderType::OpenRouter);
        assert_eq!(r.model.as_deref(), Some("anthropic/claude-3.5-haiku"));
        assert_eq!(r.api_key_env.as_deref(), Some("MY_KEY"));
        assert_eq!(r.timeout_secs, Some(30));
    }

    #[test]
    fn test_resolve_provider_cfg_unknown_provider_lists_available() {
        let cfg = ProfilesConfig {
            default_provider: None,
            providers: {
                let mut m = HashMap::new();
                m.insert(
                    "my_custom".to_string(),
                    ProviderProfile {
                        type_: ProviderTypeKind::Echo,
                        ..ProviderProfile::default()
                    },
                );
                m
            },
        };
        let name = ProviderName::new("nonexistent");
        let e = resolve_provider(Some(&name), Some(&cfg)).unwrap_err();
        let msg = e.to_string();
        assert!(msg.contains("nonexistent"));
        assert!(msg.contains("my_custom"));
        assert!(msg.contains("openrouter"));
    }

    #[test]
    fn test_list_profiles_marks_default() {
        let (names, default) = list_profiles(None);
        assert_eq!(names, vec!["echo", "openai_compat", "openrouter"]);
        assert_eq!(default, "openrouter");
    }

    #[test]
    fn test_load_profiles_config_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let home = HomeDir::new(dir.path());
        assert!(load_profiles_config(&StdFileSystem, &home).unwrap().is_none());
    }

    #[test]
    fn test_load_profiles_config_broken_json_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("profiles.json"), "{ not json").unwrap();
        let home = HomeDir::new(dir.path());
        let err = load_profiles_config(&StdFileSystem, &home).unwrap_err();
        assert_eq!(err.exit_code(), 65);
        assert!(err.to_string().contains("profiles.json"));
    }

    #[test]
    fn test_load_profiles_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profiles.json"),
            r#"{"default_provider":"echo","providers":{}}"#,
        )
        .unwrap();
        let home = HomeDir::new(dir.path());
        let cfg = load_profiles_config(&StdFileSystem, &home).unwrap().unwrap();
        assert_eq!(cfg.default_provider.as_deref(), Some("echo"));
    }
}
