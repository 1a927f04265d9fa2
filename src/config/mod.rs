// Config module - some accessors kept for future CLI overrides
#![allow(dead_code)]

mod theme;

pub use theme::{Theme, ThemeConfig, ThemeMode};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScoutError};

const CONFIG_DIR: &str = "octoscout";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub debounce_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            debounce_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: format!("octoscout/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    theme_config: ThemeConfig,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self::with_config_dir(Self::get_config_dir()?))
    }

    /// Load from an explicit directory instead of the platform default.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        let app_config = Self::load_app_config(&config_dir);
        let theme_config = Self::load_theme_config(&config_dir);

        Self {
            config_dir,
            app_config,
            theme_config,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn app_config_mut(&mut self) -> &mut AppConfig {
        &mut self.app_config
    }

    pub fn github_config(&self) -> &GitHubConfig {
        &self.app_config.github
    }

    /// The theme selected by the current mode.
    pub fn theme(&self) -> &Theme {
        self.theme_config.active()
    }

    pub fn theme_config(&self) -> &ThemeConfig {
        &self.theme_config
    }

    pub fn theme_config_mut(&mut self) -> &mut ThemeConfig {
        &mut self.theme_config
    }

    pub fn save_theme_config(&self) -> Result<()> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(THEME_FILE);
        let content = toml::to_string_pretty(&self.theme_config)
            .map_err(|e| ScoutError::Config(format!("Failed to serialize theme: {}", e)))?;
        std::fs::write(&path, content)
            .map_err(|e| ScoutError::Config(format!("Failed to write theme: {}", e)))?;
        Ok(())
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| ScoutError::Config("Could not determine config directory".to_string()))
    }

    fn load_app_config(config_dir: &Path) -> AppConfig {
        let path = config_dir.join(MAIN_CONFIG_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_theme_config(config_dir: &Path) -> ThemeConfig {
        let path = config_dir.join(THEME_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| ScoutError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    pub fn write_default_configs(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| ScoutError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&main_path, content)
                .map_err(|e| ScoutError::Config(format!("Failed to write config: {}", e)))?;
        }

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&ThemeConfig::default())
                .map_err(|e| ScoutError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| ScoutError::Config(format!("Failed to write theme: {}", e)))?;
        }

        Ok(())
    }
}
