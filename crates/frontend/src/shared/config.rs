//! Runtime configuration.
//!
//! The bundle embeds a default config. At startup the app tries to fetch
//! `/config.toml` from the static host; missing keys fall back to the
//! defaults, and a missing or broken file falls back entirely.

use gloo_net::http::Request;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 5001

[identity]
api_key = ""
sign_in_url = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword"
refresh_url = "https://securetoken.googleapis.com/v1/token"
refresh_margin_secs = 300

[ui]
page_size = 20
log_page_size = 50
search_debounce_ms = 300
"#;

const CONFIG_PATH: &str = "/config.toml";

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to fetch /config.toml: {0}")]
    Fetch(String),
    #[error("/config.toml returned HTTP {0}")]
    Status(u16),
    #[error("invalid /config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Every key is present after merging over `DEFAULT_CONFIG`. `Default`
/// (all zero) is only reached if the embedded text itself fails to parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Absolute backend origin. Empty means "same host, `port`".
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    pub api_key: String,
    pub sign_in_url: String,
    pub refresh_url: String,
    pub refresh_margin_secs: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    pub page_size: u32,
    pub log_page_size: u32,
    pub search_debounce_ms: u32,
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(nested) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, nested);
                    continue;
                }
                base.insert(key, toml::Value::Table(nested));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

/// Parses `contents` on top of the embedded default, so missing keys keep
/// their default values.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let mut merged: toml::Table = toml::from_str(DEFAULT_CONFIG)?;
    let overlay: toml::Table = toml::from_str(contents)?;
    merge_tables(&mut merged, overlay);
    Ok(toml::Value::Table(merged).try_into::<AppConfig>()?)
}

fn embedded_default() -> AppConfig {
    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!("Embedded configuration is invalid: {e}");
        AppConfig::default()
    })
}

async fn fetch_config() -> Result<AppConfig, ConfigError> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| ConfigError::Fetch(e.to_string()))?;

    if !response.ok() {
        return Err(ConfigError::Status(response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ConfigError::Fetch(e.to_string()))?;
    parse_config(&text)
}

/// Loads `/config.toml` (or the embedded default) and installs it.
pub async fn load_config() {
    let config = match fetch_config().await {
        Ok(config) => {
            log::info!("Loaded configuration from {CONFIG_PATH}");
            config
        }
        Err(e) => {
            log::warn!("{e}; using embedded default configuration");
            embedded_default()
        }
    };
    if CONFIG.set(config).is_err() {
        log::warn!("Configuration already installed; ignoring reload");
    }
}

/// Active configuration; the embedded default until `load_config` runs.
pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(embedded_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = embedded_default();
        assert_eq!(config.api.port, 5001);
        assert!(config.api.base_url.is_empty());
        assert_eq!(
            config.identity.sign_in_url,
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword"
        );
        assert_eq!(config.identity.refresh_margin_secs, 300);
        assert_eq!(config.ui.page_size, 20);
        assert_eq!(config.ui.log_page_size, 50);
    }

    #[test]
    fn test_empty_file_falls_back_to_embedded_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.api.port, 5001);
        assert_eq!(config.ui.search_debounce_ms, 300);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [identity]
            api_key = "AIza-test"

            [ui]
            page_size = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.identity.api_key, "AIza-test");
        assert_eq!(config.identity.refresh_margin_secs, 300);
        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.ui.search_debounce_ms, 300);
        assert_eq!(config.api.port, 5001);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(matches!(
            parse_config("[api]\nport = \"not a number\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
