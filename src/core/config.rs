use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyLayerConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl CurrencyLayerConfig {
    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for CurrencyLayerConfig {
    fn default() -> Self {
        CurrencyLayerConfig {
            base_url: "http://api.currencylayer.com".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateHostConfig {
    pub base_url: String,
}

impl Default for ExchangeRateHostConfig {
    fn default() -> Self {
        ExchangeRateHostConfig {
            base_url: "https://api.exchangerate.host".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub currencylayer: CurrencyLayerConfig,
    #[serde(default)]
    pub exchangerate_host: ExchangeRateHostConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            listen_addr: default_listen_addr(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config file at `path`, or the default location when it
    /// exists, then applies `.env` and environment overrides.
    pub fn load_with_env(path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxform", "fxform")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies `API_KEY` and `FXFORM_LISTEN_ADDR` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("API_KEY") {
            self.providers.currencylayer.api_key = Some(key);
        }
        if let Some(addr) = lookup("FXFORM_LISTEN_ADDR") {
            self.listen_addr = addr
                .parse()
                .with_context(|| format!("Invalid FXFORM_LISTEN_ADDR: {addr}"))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
