//! CLI Configuration
//!
//! Settings come from a TOML file (every section and key optional), then
//! `QUICKCARD_*` environment variables, then command-line flags in the
//! binary itself.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_API_BASE;
use crate::i18n::Locale;
use crate::session::FileTokenStorage;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// REST API connection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Never zero; a zero timeout would fail every request
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Where the session token is kept between runs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub token_file: Option<String>,
}

impl SessionConfig {
    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(FileTokenStorage::default_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Language code such as `ru` or `cs-CZ`
    pub locale: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default().code().to_string(),
        }
    }
}

impl UiConfig {
    /// Unknown codes fall back to English
    pub fn locale(&self) -> Locale {
        Locale::parse(&self.locale)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` level for the `quickcard` target; `RUST_LOG` wins over it
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Parse `path` without looking at the environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Built-in defaults plus environment overrides
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load(path)?.with_env_overrides())
    }

    /// First readable file from [`Config::search_paths`], else defaults.
    /// A broken file is logged and skipped.
    pub fn load_default() -> Self {
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::load_with_env(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "Config loaded");
                    return config;
                }
                Err(e) => tracing::warn!("Skipping config: {}", e),
            }
        }

        tracing::debug!("No config file, using defaults");
        Self::from_env()
    }

    /// `<config_dir>/quickcard/config.toml`, then `./quickcard.toml`
    pub fn search_paths() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("quickcard").join("config.toml"))
            .into_iter()
            .chain(std::iter::once(PathBuf::from("quickcard.toml")))
            .collect()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env_var("QUICKCARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(path) = env_var("QUICKCARD_TOKEN_FILE") {
            self.session.token_file = Some(path);
        }
        if let Some(locale) = env_var("QUICKCARD_LOCALE") {
            self.ui.locale = locale;
        }
        if let Some(level) = env_var("QUICKCARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        match env_var("QUICKCARD_LOG_FORMAT").as_deref().map(LogFormat::parse) {
            Some(Some(format)) => self.logging.format = format,
            Some(None) => tracing::warn!("Ignoring unknown QUICKCARD_LOG_FORMAT"),
            None => {}
        }
        self
    }
}

/// Set and non-empty
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Commented config file matching the built-in defaults
pub fn generate_default_config() -> String {
    format!(
        r#"# QuickCard CLI configuration
#
# QUICKCARD_API_URL, QUICKCARD_TOKEN_FILE, QUICKCARD_LOCALE,
# QUICKCARD_LOG_LEVEL and QUICKCARD_LOG_FORMAT take precedence.

[api]
base_url = "{base_url}"
request_timeout_secs = {timeout}

[session]
# Defaults to the platform data directory
# token_file = "~/.local/share/quickcard/token"

[ui]
# en, ru or cs
locale = "en"

[logging]
# trace, debug, info, warn or error
level = "info"
# pretty or json
format = "pretty"
"#,
        base_url = DEFAULT_API_BASE,
        timeout = DEFAULT_TIMEOUT_SECS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.ui.locale(), Locale::En);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.session.token_file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://cards.example.com\"\n\n[ui]\nlocale = \"cs-CZ\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://cards.example.com");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.locale(), Locale::Cs);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/quickcard.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = 1").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let api = ApiConfig {
            request_timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(api.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse(" JSON "), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn test_token_path() {
        let explicit = SessionConfig {
            token_file: Some("/tmp/qc-token".to_string()),
        };
        assert_eq!(explicit.token_path(), PathBuf::from("/tmp/qc-token"));
        assert_eq!(
            SessionConfig::default().token_path(),
            FileTokenStorage::default_path()
        );
    }
}
