use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Language options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh_CN")]
    ChineseSimplified,
}

impl Language {
    /// Map a locale tag such as `zh-CN`, `zh_TW` or `en-US` to a supported language
    pub fn from_locale(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("zh") {
            Language::ChineseSimplified
        } else {
            Language::English
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::ChineseSimplified => "zh_CN",
        }
    }

    /// Parse the code used in the settings file
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "zh_CN" => Some(Language::ChineseSimplified),
            _ => None,
        }
    }
}

/// Persisted plugin settings.
///
/// Every field falls back to its default when absent from the stored file, so
/// loading an older or partial file never reverts fields the user did set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Offer "compute total time" in the editor context menu
    pub auto_compute: bool,
    /// Explicit UI language; `None` follows the system locale
    pub language: Option<Language>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_compute: true,
            language: None,
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, creating default if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating default if not found
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!(
                    "Ignoring unreadable settings in {}: {err}",
                    config_path.display()
                );
                let default_config = Config::default();
                let _ = default_config.save_to(config_path);
                default_config
            })
        } else {
            let default_config = Config::default();
            let _ = default_config.save_to(config_path);
            default_config
        };

        log::debug!("Loaded settings {config:?}");
        Ok(config)
    }

    /// Save configuration to the user config directory
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)
            .with_context(|| format!("writing {}", config_path.display()))?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        // Use XDG config directory standard or fallback to ~/.config
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            home_dir.join(".config")
        };

        Ok(config_dir.join("tasktally").join("config.json"))
    }

    /// Set an explicit language, or `None` to follow the system locale
    pub fn set_language(&mut self, language: Option<Language>) {
        self.language = language;
    }

    pub fn set_auto_compute(&mut self, enabled: bool) {
        self.auto_compute = enabled;
    }

    /// Get language display string
    pub fn language_display(&self) -> &str {
        match self.language {
            Some(language) => language.code(),
            None => "system",
        }
    }
}
