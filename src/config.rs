//! Application-level configuration: a JSON file with environment overrides.

use std::{env, fs, io::ErrorKind, path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::quiz::QuizId;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LIVE_QUIZ_CONFIG_PATH";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/15";
const DEFAULT_PORT: u16 = 8080;
/// Appended to `<base><quiz_id>` to locate the question set.
const QUESTIONS_SUFFIX: &str = "/questions.json";

/// Which [`QuizStore`](crate::dao::quiz_store::QuizStore) implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    /// Redis at [`AppConfig::redis_url`].
    Redis,
    /// Process-local map; data is lost on restart.
    Memory,
}

/// How session tokens are issued to joining players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenStrategy {
    /// A fresh random token per join.
    Random,
    /// Legacy `session_id_<code * 1232>` tokens.
    CodeDerived,
}

/// Raised when a configuration value cannot be understood.
#[derive(Debug, Error)]
#[error("invalid value `{value}` for `{name}`")]
pub struct InvalidSetting {
    name: &'static str,
    value: String,
}

impl FromStr for StoreBackend {
    type Err = InvalidSetting;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(InvalidSetting {
                name: "QUIZ_STORE",
                value: value.to_owned(),
            }),
        }
    }
}

impl FromStr for TokenStrategy {
    type Err = InvalidSetting;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(TokenStrategy::Random),
            "code-derived" => Ok(TokenStrategy::CodeDerived),
            _ => Err(InvalidSetting {
                name: "SESSION_TOKENS",
                value: value.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Prefix of every questions URL handed to joining players.
    pub questions_base_url: String,
    /// Store backend to run against.
    pub store: StoreBackend,
    /// `redis://` URL, used with [`StoreBackend::Redis`].
    pub redis_url: String,
    /// Overrides any password embedded in [`AppConfig::redis_url`].
    pub redis_password: Option<String>,
    /// How join tokens are issued.
    pub session_tokens: TokenStrategy,
    /// HTTP listen port.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            questions_base_url: String::new(),
            store: StoreBackend::Redis,
            redis_url: DEFAULT_REDIS_URL.to_owned(),
            redis_password: None,
            session_tokens: TokenStrategy::Random,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load the configuration file (if any), then apply environment overrides.
    pub fn load() -> Result<Self, InvalidSetting> {
        let path = resolve_config_path();
        let raw = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    RawConfig::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using environment and built-in defaults"
                );
                RawConfig::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                RawConfig::default()
            }
        };

        Self::from_sources(raw, |name| env::var(name).ok())
    }

    /// Merge a parsed file with values looked up through `lookup`, which win.
    fn from_sources(
        raw: RawConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, InvalidSetting> {
        let lookup_any = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(*name).filter(|value| !value.is_empty()))
        };
        let defaults = Self::default();

        let store = match lookup_any(&["QUIZ_STORE"]) {
            Some(value) => value.parse()?,
            None => raw.store.unwrap_or(defaults.store),
        };
        let session_tokens = match lookup_any(&["SESSION_TOKENS"]) {
            Some(value) => value.parse()?,
            None => raw.session_tokens.unwrap_or(defaults.session_tokens),
        };
        let port = match lookup_any(&["PORT", "SERVER_PORT"]) {
            Some(value) => value.parse::<u16>().map_err(|_| InvalidSetting {
                name: "PORT",
                value,
            })?,
            None => raw.port.unwrap_or(defaults.port),
        };

        Ok(Self {
            questions_base_url: lookup_any(&["QUIZ_QUESTIONS_BASE_URL", "GCOOL_QUIZ_QUES_PATH"])
                .or(raw.questions_base_url)
                .unwrap_or(defaults.questions_base_url),
            store,
            redis_url: lookup_any(&["REDIS_URL"])
                .or(raw.redis_url)
                .unwrap_or(defaults.redis_url),
            redis_password: lookup_any(&["REDIS_PASSWORD", "GCOOL_REDIS_PASS"]),
            session_tokens,
            port,
        })
    }

    /// Point Redis at `host` on the default port and database.
    pub fn with_redis_host(mut self, host: &str) -> Self {
        self.redis_url = format!("redis://{host}:6379/15");
        self
    }

    /// Location of the question set for `quiz_id`.
    pub fn questions_url(&self, quiz_id: &QuizId) -> String {
        format!("{}{}{}", self.questions_base_url, quiz_id, QUESTIONS_SUFFIX)
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    questions_base_url: Option<String>,
    store: Option<StoreBackend>,
    redis_url: Option<String>,
    session_tokens: Option<TokenStrategy>,
    port: Option<u16>,
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_env(pairs: &[(&str, &str)], raw: RawConfig) -> Result<AppConfig, InvalidSetting> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_sources(raw, |name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = from_env(&[], RawConfig::default()).unwrap();
        assert_eq!(config.store, StoreBackend::Redis);
        assert_eq!(config.session_tokens, TokenStrategy::Random);
        assert_eq!(config.port, 8080);
        assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
        assert!(config.questions_base_url.is_empty());
    }

    #[test]
    fn environment_wins_over_file() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"questions_base_url": "https://file/", "store": "memory", "port": 9000}"#,
        )
        .unwrap();
        let config = from_env(
            &[
                ("GCOOL_QUIZ_QUES_PATH", "https://cdn/"),
                ("SESSION_TOKENS", "code-derived"),
                ("GCOOL_REDIS_PASS", "secret"),
            ],
            raw,
        )
        .unwrap();
        assert_eq!(config.questions_base_url, "https://cdn/");
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.session_tokens, TokenStrategy::CodeDerived);
        assert_eq!(config.redis_password.as_deref(), Some("secret"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(from_env(&[("QUIZ_STORE", "postgres")], RawConfig::default()).is_err());
        assert!(from_env(&[("PORT", "eighty")], RawConfig::default()).is_err());
    }

    #[test]
    fn questions_url_joins_base_id_and_suffix() {
        let config = AppConfig {
            questions_base_url: "https://cdn.example/".into(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.questions_url(&QuizId::new("quiz_20000")),
            "https://cdn.example/quiz_20000/questions.json"
        );
    }
}
