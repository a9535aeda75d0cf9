// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Planner configuration loaded from TOML.
//!
//! Every field has a default, so an empty or partial file is valid. Paths resolve the XDG way:
//! `$XDG_CONFIG_HOME/weekgrid/config.toml` and `$XDG_DATA_HOME/weekgrid`, falling back to
//! `$HOME/.config` and `$HOME/.local/share`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::queue::DEFAULT_DEBOUNCE;
use crate::store::WriteDurability;
use crate::ui::DEFAULT_NOTICE_DURATION;

const APP_DIR: &str = "weekgrid";

pub const DEFAULT_PRINT_ROWS_PER_PAGE: usize = 60;
pub const DEFAULT_PRINT_FALLBACK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Quiet period before a pending write is committed.
    pub debounce_ms: u64,
    /// Directory holding `store.json`. `None` means the XDG data directory.
    pub data_dir: Option<PathBuf>,
    /// Where `p`/`i` exports land when no path is given.
    pub export_dir: Option<PathBuf>,
    pub notice_secs: u64,
    pub print_rows_per_page: usize,
    /// How long the print export waits for a readiness signal before proceeding.
    pub print_fallback_ms: u64,
    pub durable_writes: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            data_dir: None,
            export_dir: None,
            notice_secs: DEFAULT_NOTICE_DURATION.as_secs(),
            print_rows_per_page: DEFAULT_PRINT_ROWS_PER_PAGE,
            print_fallback_ms: DEFAULT_PRINT_FALLBACK.as_millis() as u64,
            durable_writes: false,
        }
    }
}

impl PlannerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads `path` when given (it must exist), else the default path when present, else
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = default_config_path();
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "loading config");
            return Self::from_file(&default_path);
        }
        Ok(Self::default())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }

    pub fn print_fallback(&self) -> Duration {
        Duration::from_millis(self.print_fallback_ms)
    }

    pub fn durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }

    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join(APP_DIR).join("config.toml")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml")
    } else {
        PathBuf::from("/tmp/weekgrid-config/config.toml")
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = std::env::var_os("XDG_DATA_HOME") {
        PathBuf::from(data).join(APP_DIR)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share").join(APP_DIR)
    } else {
        PathBuf::from("/tmp/weekgrid-data")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config file '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config file '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}
