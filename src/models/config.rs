//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SelectorConfig;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Board location and identity
    #[serde(default)]
    pub board: BoardConfig,

    /// HTTP request behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Selector chains for board extraction
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Webhook notification settings
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Notification state persistence settings
    #[serde(default)]
    pub state: StateConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.board.url.trim().is_empty() {
            return Err(AppError::validation("board.url is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.notify.timeout_secs == 0 {
            return Err(AppError::validation("notify.timeout_secs must be > 0"));
        }
        if self.notify.max_items == 0 {
            return Err(AppError::validation("notify.max_items must be > 0"));
        }
        if self.selectors.row_strategies.is_empty() {
            return Err(AppError::validation("selectors.row_strategies is empty"));
        }
        if self.selectors.title_chain.is_empty() {
            return Err(AppError::validation("selectors.title_chain is empty"));
        }
        if self.state.path.trim().is_empty() {
            return Err(AppError::validation("state.path is empty"));
        }
        Ok(())
    }
}

/// Board location and identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// URL of the announcement board list page
    #[serde(default = "defaults::board_url")]
    pub url: String,

    /// Source tag stamped onto every fetched notice
    #[serde(default = "defaults::board_source")]
    pub source: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            url: defaults::board_url(),
            source: defaults::board_source(),
        }
    }
}

/// HTTP request behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds for the board fetch
    #[serde(default = "defaults::fetch_timeout")]
    pub timeout_secs: u64,

    /// Browser-profile request headers sent with the board fetch
    #[serde(default = "defaults::browser_headers")]
    pub headers: Vec<Header>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::fetch_timeout(),
            headers: defaults::browser_headers(),
        }
    }
}

/// A single request header name/value pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Webhook notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Environment variable holding the webhook URL
    #[serde(default = "defaults::webhook_env")]
    pub webhook_env: String,

    /// Request timeout in seconds for the webhook POST
    #[serde(default = "defaults::notify_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of notices itemized per message
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_env: defaults::webhook_env(),
            timeout_secs: defaults::notify_timeout(),
            max_items: defaults::max_items(),
        }
    }
}

/// Notification state persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the JSON state file
    #[serde(default = "defaults::state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: defaults::state_path(),
        }
    }
}

mod defaults {
    use super::Header;

    // Board defaults
    pub fn board_url() -> String {
        "https://www.ketep.re.kr/board?menuId=MENU002080100000000&boardId=BOARD00022".into()
    }
    pub fn board_source() -> String {
        "KETEP".into()
    }

    // HTTP defaults
    pub fn fetch_timeout() -> u64 {
        30
    }

    pub fn browser_headers() -> Vec<Header> {
        vec![
            Header::new(
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
            Header::new(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,\
                 image/webp,image/apng,*/*;q=0.8",
            ),
            Header::new("Accept-Language", "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
            Header::new("Connection", "keep-alive"),
            Header::new("Upgrade-Insecure-Requests", "1"),
            Header::new("Sec-Fetch-Dest", "document"),
            Header::new("Sec-Fetch-Mode", "navigate"),
            Header::new("Sec-Fetch-Site", "none"),
            Header::new("Sec-Fetch-User", "?1"),
            Header::new("Cache-Control", "max-age=0"),
        ]
    }

    // Notify defaults
    pub fn webhook_env() -> String {
        "SLACK_WEBHOOK_URL".into()
    }
    pub fn notify_timeout() -> u64 {
        10
    }
    pub fn max_items() -> usize {
        10
    }

    // State defaults
    pub fn state_path() -> String {
        "seen_notices.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_board_url() {
        let mut config = Config::default();
        config.board.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_items() {
        let mut config = Config::default();
        config.notify.max_items = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_timeouts_are_thirty_and_ten_seconds() {
        let config = Config::default();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.notify.timeout_secs, 10);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [board]
            url = "https://example.com/board"
            source = "TEST"

            [notify]
            max_items = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.board.source, "TEST");
        assert_eq!(config.notify.max_items, 5);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.state.path, "seen_notices.json");
    }
}
