use crate::catalog::CatalogSource;
use crate::codegen::{CodeFormat, GradientType};
use crate::history::{HistoryLimits, MAX_HISTORY_AGE_DAYS, MAX_HISTORY_ENTRIES};
use crate::loader::DEFAULT_PAGE_SIZE;
use crate::log_debug;
use crate::sort::SortKey;

use anyhow::{Context, Result, anyhow};
use dirs::{config_dir, data_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project configuration filename, looked up in the working directory
pub const PROJECT_CONFIG_FILENAME: &str = ".gradientgallery";

const APP_DIR: &str = "gradient-gallery";

/// Configuration structure for Gradient Gallery
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Override for where favorites and history are stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Where the gradient catalog comes from
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Listing and paging behavior
    #[serde(default)]
    pub display: DisplayConfig,
    /// Defaults for generated code
    #[serde(default)]
    pub export: ExportConfig,
    /// Copy history retention
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(skip)]
    pub is_project_config: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Local JSON catalog, used instead of the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Remote JSON catalog, tried when no local path is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub page_size: usize,
    pub load_delay_ms: u64,
    pub search_debounce_ms: u64,
    /// One of name, brightness, hue, favorites; anything else keeps catalog order
    pub sort: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            load_delay_ms: 300,
            search_debounce_ms: 250,
            sort: String::new(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub format: CodeFormat,
    pub angle: u16,
    pub animation_speed: f64,
    pub gradient_type: GradientType,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: CodeFormat::Css,
            angle: 90,
            animation_speed: 1.0,
            gradient_type: GradientType::Background,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
    pub max_age_days: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_HISTORY_ENTRIES,
            max_age_days: MAX_HISTORY_AGE_DAYS,
        }
    }
}

impl Config {
    /// Load the personal configuration, then merge the project file if present
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from_path(&config_path)?;

        if let Ok(cwd) = std::env::current_dir()
            && let Some(project_config) = Self::load_project_config(&cwd)?
        {
            config.merge_with_project_config(project_config);
        }

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load `.gradientgallery` from `dir`, if there is one
    pub fn load_project_config(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(PROJECT_CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(None);
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config file {}", config_path.display()))?;

        let mut config: Self = toml::from_str(&config_str).map_err(|e| {
            anyhow!(
                "Invalid project configuration file format: {}. Please check your {} file for syntax errors.",
                e,
                PROJECT_CONFIG_FILENAME
            )
        })?;

        config.is_project_config = true;
        Ok(Some(config))
    }

    /// Merge with project configuration; project values win where they differ from defaults
    pub fn merge_with_project_config(&mut self, project_config: Self) {
        log_debug!("Merging with project configuration");
        let defaults = Self::default();

        if project_config.catalog.path.is_some() {
            self.catalog.path = project_config.catalog.path;
        }
        if project_config.catalog.url.is_some() {
            self.catalog.url = project_config.catalog.url;
        }

        if project_config.display != defaults.display {
            self.display = project_config.display;
        }
        if project_config.export != defaults.export {
            self.export = project_config.export;
        }
        if project_config.history != defaults.history {
            self.history = project_config.history;
        }

        if project_config.data_dir.is_some() {
            self.data_dir = project_config.data_dir;
        }
    }

    /// Save the configuration to the personal config file
    pub fn save(&self) -> Result<()> {
        // Project configs are never written over the personal file
        if self.is_project_config {
            return Ok(());
        }
        self.save_to_path(&Self::get_config_path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_content = toml::to_string_pretty(self)?;
        fs::write(path, config_content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        log_debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Path to the personal configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push(APP_DIR);
        path.push("config.toml");
        Ok(path)
    }

    /// Primary catalog source and the fallback to use when it fails
    pub fn catalog_sources(&self) -> (CatalogSource, CatalogSource) {
        match (&self.catalog.path, &self.catalog.url) {
            (Some(path), Some(url)) => (CatalogSource::File(path.clone()), CatalogSource::Url(url.clone())),
            (Some(path), None) => (CatalogSource::File(path.clone()), CatalogSource::Embedded),
            (None, Some(url)) => (CatalogSource::Url(url.clone()), CatalogSource::Embedded),
            (None, None) => (CatalogSource::Embedded, CatalogSource::Embedded),
        }
    }

    /// Directory for favorites and copy history
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| anyhow!("Unable to determine data directory"))
    }

    pub fn favorites_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("favorites.json"))
    }

    pub fn history_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("history.json"))
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        SortKey::parse_lenient(&self.display.sort)
    }

    pub const fn load_delay(&self) -> Duration {
        Duration::from_millis(self.display.load_delay_ms)
    }

    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.display.search_debounce_ms)
    }

    pub fn history_limits(&self) -> HistoryLimits {
        HistoryLimits {
            max_entries: self.history.max_entries,
            max_age: chrono::Duration::try_days(self.history.max_age_days.max(0))
                .unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Update the configuration with new values
    pub fn update(
        &mut self,
        format: Option<CodeFormat>,
        angle: Option<u16>,
        animation_speed: Option<f64>,
        page_size: Option<usize>,
        sort: Option<String>,
        catalog_url: Option<String>,
    ) -> Result<()> {
        if let Some(format) = format {
            self.export.format = format;
        }
        if let Some(angle) = angle {
            if angle >= 360 {
                return Err(anyhow!("Angle must be between 0 and 359, got {angle}"));
            }
            self.export.angle = angle;
        }
        if let Some(speed) = animation_speed {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(anyhow!("Animation speed must be positive, got {speed}"));
            }
            self.export.animation_speed = speed;
        }
        if let Some(size) = page_size {
            if size == 0 {
                return Err(anyhow!("Page size must be at least 1"));
            }
            self.display.page_size = size;
        }
        if let Some(sort) = sort {
            self.display.sort = sort;
        }
        if let Some(url) = catalog_url {
            self.catalog.url = if url.is_empty() { None } else { Some(url) };
        }

        log_debug!("Configuration updated: {:?}", self);
        Ok(())
    }
}
