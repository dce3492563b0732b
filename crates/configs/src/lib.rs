use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote auth service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub write_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            connect_timeout_secs: default_timeout(),
            read_timeout_secs: default_timeout(),
            write_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), file_name: default_file_name() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/";

fn default_timeout() -> u64 { 30 }
fn default_data_dir() -> String { "data".into() }
fn default_file_name() -> String { "auth_prefs.json".into() }
fn default_log_format() -> String { "compact".into() }

/// Load from `CONFIG_PATH` (or `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        self.storage.normalize();
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        if self.base_url.trim().is_empty() {
            self.base_url = std::env::var("AUTH_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        }
        self.base_url = self.base_url.trim().to_string();
        // endpoint paths are joined relative to the base
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.connect_timeout_secs == 0 || self.read_timeout_secs == 0 || self.write_timeout_secs == 0 {
            return Err(anyhow!("api timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        if self.file_name.trim().is_empty() {
            self.file_name = default_file_name();
        }
    }

    /// Full path of the credential file.
    pub fn file_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.file_name)
    }
}
