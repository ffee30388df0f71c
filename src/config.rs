use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

const DEFAULT_LIVE_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";
const DEFAULT_HISTORICAL_BASE_URL: &str = "https://open.er-api.com/v6/historical";
// Shared demo key from the upstream service; replace with your own in config.
const DEFAULT_API_KEY: &str = "bb6cb9e71dcceaa20d8d2851";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LiveProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoricalProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub live: Option<LiveProviderConfig>,
    pub historical: Option<HistoricalProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            live: Some(LiveProviderConfig {
                base_url: DEFAULT_LIVE_BASE_URL.to_string(),
                api_key: DEFAULT_API_KEY.to_string(),
            }),
            historical: Some(HistoricalProviderConfig {
                base_url: DEFAULT_HISTORICAL_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Base currency used when --base is not given on the command line.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Overrides the default location of the rate cache file.
    pub cache_path: Option<String>,
}

impl AppConfig {
    /// Loads from the platform config directory; a missing file yields
    /// the built-in defaults so the tool works unconfigured.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Resolves the rate cache file location: the configured override,
    /// or `exchange_rates.json` in the platform data directory.
    pub fn rate_cache_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.cache_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = Self::project_dirs()?;
        Ok(proj_dirs.data_dir().join("exchange_rates.json"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let config_str = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), config_str)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
        debug!("Configuration saved");
        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("in", "codito", "xrc").context("Could not determine project directories")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            base_currency: default_base_currency(),
            cache_path: None,
        }
    }
}
