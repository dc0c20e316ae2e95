// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use hyperscaler_app::{
    DEFAULT_ITEMS_PER_PAGE, Language, MAX_ITEMS_PER_PAGE, Preferences, ThemeMode,
};
use hyperscaler_tui::DEFAULT_CARD_MIN_WIDTH;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            storage: Storage::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub language: Option<String>,
    pub theme: Option<String>,
    pub page_size: Option<i64>,
    pub wrap_text: Option<bool>,
    pub card_min_width: Option<i64>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            language: Some(Language::En.as_str().to_owned()),
            theme: Some(ThemeMode::System.as_str().to_owned()),
            page_size: Some(DEFAULT_ITEMS_PER_PAGE as i64),
            wrap_text: Some(false),
            card_min_width: Some(i64::from(DEFAULT_CARD_MIN_WIDTH)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("HYPERSCALER_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set HYPERSCALER_CONFIG_PATH to the config file"
            )
        })?;
        Ok(config_root
            .join(hyperscaler_db::APP_NAME)
            .join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [data], [storage], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            hyperscaler_db::validate_db_path(db_path)?;
        }

        if let Some(language) = &self.ui.language
            && Language::parse(language).is_none()
        {
            bail!(
                "ui.language in {} must be \"en\" or \"es\", got {language:?}",
                path.display()
            );
        }

        if let Some(theme) = &self.ui.theme
            && ThemeMode::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be one of light, dark, system; got {theme:?}",
                path.display()
            );
        }

        if let Some(page_size) = self.ui.page_size
            && !(1..=MAX_ITEMS_PER_PAGE as i64).contains(&page_size)
        {
            bail!(
                "ui.page_size in {} must be between 1 and {MAX_ITEMS_PER_PAGE}, got {page_size}",
                path.display()
            );
        }

        if let Some(width) = self.ui.card_min_width
            && !(1..=i64::from(u16::MAX)).contains(&width)
        {
            bail!(
                "ui.card_min_width in {} must be a positive column count, got {width}",
                path.display()
            );
        }

        if let Some(level) = &self.log.level
            && level.trim().is_empty()
        {
            bail!("log.level in {} must not be empty", path.display());
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => hyperscaler_db::default_db_path(),
        }
    }

    pub fn dataset_path(&self) -> Option<PathBuf> {
        self.data.path.as_ref().map(PathBuf::from)
    }

    pub fn page_size(&self) -> usize {
        self.ui
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn card_min_width(&self) -> u16 {
        self.ui
            .card_min_width
            .and_then(|width| u16::try_from(width).ok())
            .unwrap_or(DEFAULT_CARD_MIN_WIDTH)
    }

    /// Display defaults; stored preferences override these field by field.
    pub fn ui_defaults(&self) -> Preferences {
        Preferences {
            language: self.ui.language.as_deref().and_then(Language::parse),
            theme: self.ui.theme.as_deref().and_then(ThemeMode::parse),
            wrap_text: self.ui.wrap_text,
            layout: None,
        }
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let cache_root = dirs::cache_dir().ok_or_else(|| {
            anyhow!("cannot resolve cache directory; set [log] file to a writable path")
        })?;
        Ok(cache_root
            .join(hyperscaler_db::APP_NAME)
            .join("hyperscaler.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# hyperscaler config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Default is the bundled service catalog\n# path = \"/absolute/path/to/services.json\"\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/hyperscaler/hyperscaler.db)\n# db_path = \"/absolute/path/to/hyperscaler.db\"\n\n[ui]\nlanguage = \"en\"\ntheme = \"system\"\npage_size = {}\nwrap_text = false\ncard_min_width = {}\n\n[log]\nlevel = \"{}\"\n# file = \"/absolute/path/to/hyperscaler.log\"\n",
            path.display(),
            DEFAULT_ITEMS_PER_PAGE,
            DEFAULT_CARD_MIN_WIDTH,
            DEFAULT_LOG_LEVEL,
        )
    }
}
