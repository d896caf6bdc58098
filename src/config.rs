//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.yosurvey.toml` files.

use crate::i18n::Language;
use crate::models::{Category, Satisfaction};
use crate::report::DEFAULT_EXPORT_FILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".yosurvey.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Form defaults.
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Dashboard rendering settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Path of the JSON store file.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Language used until one is saved in the store.
    #[serde(default)]
    pub language: Language,

    /// Use the dark theme until a theme is saved in the store.
    #[serde(default)]
    pub dark_mode: bool,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            language: Language::default(),
            dark_mode: false,
            verbose: false,
        }
    }
}

fn default_store_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("yosurvey").join("store.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./yosurvey_store.json".to_string())
}

/// Defaults for the submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Rating used when `--satisfaction` is omitted.
    #[serde(default = "default_satisfaction")]
    pub default_satisfaction: u8,

    /// Category used when neither `--favorite` nor `--other` is given.
    #[serde(default = "default_favorite")]
    pub default_favorite: Category,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            default_satisfaction: default_satisfaction(),
            default_favorite: default_favorite(),
        }
    }
}

fn default_satisfaction() -> u8 {
    Satisfaction::MAX
}

fn default_favorite() -> Category {
    Category::UiDesign
}

/// Dashboard rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Width of the longest chart bar, in columns.
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    /// Draw charts below the stat cards.
    #[serde(default = "default_true")]
    pub show_charts: bool,

    /// How many responses `list` shows; 0 shows all.
    #[serde(default)]
    pub list_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_width: default_chart_width(),
            show_charts: true,
            list_limit: 0,
        }
    }
}

fn default_chart_width() -> usize {
    30
}

fn default_true() -> bool {
    true
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default export file name.
    #[serde(default = "default_export_file")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file(),
        }
    }
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings and are only
    /// applied when given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref store) = args.store {
            self.general.store_path = store.to_string_lossy().to_string();
        }

        if let Some(lang) = args.lang {
            self.general.language = lang;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Path of the store file.
    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.general.store_path)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
