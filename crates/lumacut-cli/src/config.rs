// crates/lumacut-cli/src/config.rs
//
// Layered settings: CLI flag > environment variable > config file > default.
// Env lookup is passed in as a closure so resolution is testable without
// touching the process environment.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use lumacut_suggest::gateway::{GatewayConfig, GatewayKind};
use lumacut_suggest::SuggestConfig;

pub const ENV_SUGGEST_URL:  &str = "LUMACUT_SUGGEST_URL";
pub const ENV_TIMEOUT_SECS: &str = "LUMACUT_TIMEOUT_SECS";
pub const ENV_UPSTREAM_URL: &str = "LUMACUT_UPSTREAM_URL";
pub const ENV_MODEL:        &str = "LUMACUT_MODEL";
pub const ENV_API_KEY:      &str = "LUMACUT_API_KEY";

/// On-disk `config.json`. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FileConfig {
    pub suggest_url:  Option<String>,
    pub timeout_secs: Option<u64>,
    pub upstream_url: Option<String>,
    pub model:        Option<String>,
    pub api_key:      Option<String>,
}

impl FileConfig {
    /// Missing file → defaults. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("[config] no config at {}", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::debug!("[config] loaded {}", path.display());
        Ok(cfg)
    }
}

/// Values given on the command line.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub suggest_url:  Option<String>,
    pub timeout_secs: Option<u64>,
    pub upstream_url: Option<String>,
    pub model:        Option<String>,
}

fn pick<T>(flag: Option<T>, env: Option<T>, file: Option<T>) -> Option<T> {
    flag.or(env).or(file)
}

fn env_string(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn timeout(flags: &Overrides, file: &FileConfig, env: &dyn Fn(&str) -> Option<String>) -> Option<Duration> {
    let from_env = env_string(env, ENV_TIMEOUT_SECS).and_then(|v| match v.parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("[config] ignoring {ENV_TIMEOUT_SECS}={v}: not a whole number of seconds");
            None
        }
    });
    pick(flags.timeout_secs, from_env, file.timeout_secs).map(Duration::from_secs)
}

pub fn suggest_config(
    flags: &Overrides,
    file:  &FileConfig,
    env:   &dyn Fn(&str) -> Option<String>,
) -> SuggestConfig {
    let defaults = SuggestConfig::default();
    SuggestConfig {
        endpoint: pick(flags.suggest_url.clone(), env_string(env, ENV_SUGGEST_URL), file.suggest_url.clone())
            .unwrap_or(defaults.endpoint),
        timeout:  timeout(flags, file, env).unwrap_or(defaults.timeout),
    }
}

/// The API key is never taken from a flag so it stays out of shell history.
pub fn gateway_config(
    flags: &Overrides,
    file:  &FileConfig,
    kind:  GatewayKind,
    env:   &dyn Fn(&str) -> Option<String>,
) -> GatewayConfig {
    let defaults = GatewayConfig::default();
    GatewayConfig {
        upstream_url: pick(flags.upstream_url.clone(), env_string(env, ENV_UPSTREAM_URL), file.upstream_url.clone())
            .unwrap_or(defaults.upstream_url),
        model:        pick(flags.model.clone(), env_string(env, ENV_MODEL), file.model.clone())
            .unwrap_or(defaults.model),
        api_key:      env_string(env, ENV_API_KEY).or_else(|| file.api_key.clone()),
        kind,
    }
}

/// Real process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FileConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn partial_file_parses() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{ "model": "vision-large", "timeout_secs": 5 }}"#).unwrap();
        let cfg = FileConfig::load(f.path()).unwrap();
        assert_eq!(cfg.model.as_deref(), Some("vision-large"));
        assert_eq!(cfg.timeout_secs, Some(5));
        assert_eq!(cfg.suggest_url, None);
    }

    #[test]
    fn broken_file_is_an_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        assert!(FileConfig::load(f.path()).is_err());
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let file = FileConfig {
            suggest_url:  Some("http://file".into()),
            timeout_secs: Some(7),
            ..Default::default()
        };
        let env = env_of(&[(ENV_SUGGEST_URL, "http://env"), (ENV_TIMEOUT_SECS, "9")]);

        let cfg = suggest_config(&Overrides::default(), &file, &env);
        assert_eq!(cfg.endpoint, "http://env");
        assert_eq!(cfg.timeout, Duration::from_secs(9));

        let flags = Overrides { suggest_url: Some("http://flag".into()), ..Default::default() };
        assert_eq!(suggest_config(&flags, &file, &env).endpoint, "http://flag");

        let cfg = suggest_config(&Overrides::default(), &file, &env_of(&[]));
        assert_eq!(cfg.endpoint, "http://file");
        assert_eq!(cfg.timeout, Duration::from_secs(7));
    }

    #[test]
    fn bad_env_timeout_falls_through() {
        let file = FileConfig { timeout_secs: Some(3), ..Default::default() };
        let cfg = suggest_config(&Overrides::default(), &file, &env_of(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn gateway_defaults_and_key() {
        let cfg = gateway_config(&Overrides::default(), &FileConfig::default(), GatewayKind::Video, &env_of(&[]));
        assert_eq!(cfg, GatewayConfig { kind: GatewayKind::Video, ..GatewayConfig::default() });

        let file = FileConfig { api_key: Some("from-file".into()), ..Default::default() };
        let env = env_of(&[(ENV_API_KEY, "from-env"), (ENV_MODEL, "m2")]);
        let cfg = gateway_config(&Overrides::default(), &file, GatewayKind::Image, &env);
        assert_eq!(cfg.api_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.model, "m2");
    }
}
