//! Light/dark preference, read once at startup and written back on change.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme '{0}'; expected 'light' or 'dark'")]
    UnknownTheme(String),
    #[error("failed to access theme file '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse theme file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub trait ThemeProvider: Send + Sync {
    fn load(&self) -> Result<ThemePreference, ThemeError>;
    fn store(&self, preference: ThemePreference) -> Result<(), ThemeError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedTheme {
    theme: ThemePreference,
}

/// Stores the preference as a small JSON document, e.g. `{"theme":"dark"}`.
#[derive(Debug, Clone)]
pub struct FileThemeProvider {
    path: PathBuf,
}

impl FileThemeProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ThemeError {
        ThemeError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ThemeProvider for FileThemeProvider {
    fn load(&self) -> Result<ThemePreference, ThemeError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved theme; using default");
                return Ok(ThemePreference::default());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let persisted: PersistedTheme =
            serde_json::from_str(&raw).map_err(|source| ThemeError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(persisted.theme)
    }

    fn store(&self, preference: ThemePreference) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let body = serde_json::to_string_pretty(&PersistedTheme { theme: preference }).map_err(
            |source| ThemeError::Parse {
                path: self.path.clone(),
                source,
            },
        )?;
        fs::write(&self.path, body).map_err(|err| self.io_error(err))?;
        debug!(path = %self.path.display(), theme = %preference, "saved theme");
        Ok(())
    }
}
