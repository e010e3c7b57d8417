use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use client_core::DEFAULT_API_BASE_URL;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "rally.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub theme_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 10,
            theme_file: default_theme_file(),
            log_filter: "warn".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    theme_file: Option<PathBuf>,
    log_filter: Option<String>,
}

fn default_theme_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rally").join("theme.json"))
}

/// Defaults, then `rally.toml` (or the explicit `config_path`), then the
/// process environment. A missing default file is fine; a missing explicit
/// one is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };

    resolve_settings(raw.as_deref(), |name| std::env::var(name).ok())
}

pub fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings = toml::from_str(raw).context("failed to parse config file")?;
        if let Some(v) = file_cfg.api_base_url {
            settings.api_base_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            settings.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.theme_file {
            settings.theme_file = Some(v);
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = non_empty(env("RALLY_API_URL")) {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty(env("APP__API_URL")) {
        settings.api_base_url = v;
    }

    if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
        settings.request_timeout_secs = v
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS must be an integer, got '{v}'"))?;
    }

    if let Some(v) = non_empty(env("APP__THEME_FILE")) {
        settings.theme_file = Some(PathBuf::from(v));
    }

    if let Some(v) = non_empty(env("APP__LOG_FILTER")) {
        settings.log_filter = v;
    }

    if settings.request_timeout_secs == 0 {
        bail!("request_timeout_secs must be greater than zero");
    }

    Ok(settings)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
