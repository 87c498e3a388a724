use std::{collections::HashMap, fs};

use anyhow::{bail, Context};
use client_core::{DEFAULT_BASE_URL, DEFAULT_RESOURCE};
use controller::{LoaderSettings, DEFAULT_BATCH_SIZE, DEFAULT_CATALOG_SIZE};
use shared::domain::PageSize;
use tracing::warn;
use url::Url;

pub const CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub resource: String,
    pub catalog_size: usize,
    pub batch_size: usize,
    pub page_size: PageSize,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            resource: DEFAULT_RESOURCE.into(),
            catalog_size: DEFAULT_CATALOG_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            page_size: PageSize::default(),
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn loader(&self) -> LoaderSettings {
        LoaderSettings {
            catalog_size: self.catalog_size,
            batch_size: self.batch_size,
        }
    }
}

/// Flat `catalog.toml` table. Values may be strings or integers.
pub type FileConfig = HashMap<String, toml::Value>;

pub fn parse_config_file(raw: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(raw)
}

/// Settings plus the reason `catalog.toml` was skipped, if it was unreadable.
/// The caller logs the reason once the subscriber is installed.
pub fn load_settings() -> (Settings, Option<String>) {
    let mut problem = None;
    let file = fs::read_to_string(CONFIG_FILE)
        .ok()
        .and_then(|raw| match parse_config_file(&raw) {
            Ok(file_cfg) => Some(file_cfg),
            Err(err) => {
                problem = Some(err.to_string());
                None
            }
        });
    let settings = layer_settings(file.as_ref(), |key| std::env::var(key).ok());
    (settings, problem)
}

/// Defaults, then the `catalog.toml` table, then environment overrides.
pub fn layer_settings<F>(file: Option<&FileConfig>, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if let Some(file_cfg) = file {
        let text = |key: &str| file_cfg.get(key).and_then(|value| value_text(key, value));
        if let Some(v) = text("base_url") {
            settings.base_url = v;
        }
        if let Some(v) = text("resource") {
            settings.resource = v;
        }
        if let Some(v) = text("catalog_size") {
            set_count(&mut settings.catalog_size, &v);
        }
        if let Some(v) = text("batch_size") {
            set_batch_size(&mut settings.batch_size, &v);
        }
        if let Some(v) = text("page_size") {
            set_page_size(&mut settings.page_size, &v);
        }
        if let Some(v) = text("log_level") {
            settings.log_level = v;
        }
    }

    if let Some(v) = env("CATALOG_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__CATALOG_SIZE") {
        set_count(&mut settings.catalog_size, &v);
    }
    if let Some(v) = env("APP__BATCH_SIZE") {
        set_batch_size(&mut settings.batch_size, &v);
    }
    if let Some(v) = env("APP__PAGE_SIZE") {
        set_page_size(&mut settings.page_size, &v);
    }
    if let Some(v) = env("APP__LOG_LEVEL") {
        settings.log_level = v;
    }

    settings
}

fn value_text(key: &str, value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(v) => Some(v.clone()),
        toml::Value::Integer(v) => Some(v.to_string()),
        other => {
            warn!(key, kind = other.type_str(), "catalog: ignoring config value of unsupported type");
            None
        }
    }
}

fn set_count(target: &mut usize, raw: &str) {
    if let Ok(parsed) = raw.trim().parse::<usize>() {
        *target = parsed;
    }
}

fn set_batch_size(target: &mut usize, raw: &str) {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => {}
        Ok(parsed) => *target = parsed,
    }
}

fn set_page_size(target: &mut PageSize, raw: &str) {
    if let Some(size) = raw
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| PageSize::try_from(n).ok())
    {
        *target = size;
    }
}

/// Checks the base URL is absolute http(s) and drops any trailing slash.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).with_context(|| format!("invalid base url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported scheme '{}' in base url '{raw}'", parsed.scheme());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
