use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Bearer token sent with requests when non-empty
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub time_format: TimeFormat,

    /// Sessions are shown in source order unless this is set
    #[serde(default)]
    pub sort_sessions_by_time: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database directory; defaults to `~/.coach-trainer/data`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            token: String::new(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            sort_sessions_by_time: false,
        }
    }
}

impl Config {
    /// Get config directory path (~/.coach-trainer/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".coach-trainer"))
    }

    /// Get config file path (~/.coach-trainer/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from `path`, or the default location when `None`
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    pub fn has_token(&self) -> bool {
        !self.api.token.is_empty()
    }

    /// Database directory, honoring `COACH_TRAINER_DB_PATH` first
    pub fn storage_path(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var("COACH_TRAINER_DB_PATH") {
            return Ok(PathBuf::from(path));
        }

        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }

    /// Log file used while the dashboard owns the terminal
    pub fn log_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("trainer.log"))
    }
}
