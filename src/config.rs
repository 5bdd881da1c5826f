//! Per-install configuration, stored as a machine-readable TOML file under
//! the platform config directory:
//!   %APPDATA%/LearnBuddy/config.toml on Windows
//!   $XDG_CONFIG_HOME/learnbuddy/config.toml on Linux
//!   ~/Library/Application Support/LearnBuddy/config.toml on macOS
//!
//! The config feeds explicit store/mirror configuration structs; nothing in
//! this crate reads process-wide mutable state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::storage::local::LocalStoreConfig;
use crate::storage::remote::MirrorConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key prefix shared by every record this install writes locally.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// When set, every session shares the single demo progress key.
    #[serde(default)]
    pub demo_mode: bool,
    /// Kill switch: skip the remote mirror even when one is configured.
    #[serde(default)]
    pub force_local_mode: bool,
    /// Root of the mirrored document tree; absent means no mirror.
    #[serde(default)]
    pub remote_root: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            demo_mode: false,
            force_local_mode: false,
            remote_root: None,
        }
    }
}

fn default_namespace() -> String {
    "learningBuddy".to_string()
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "learnbuddy", "LearnBuddy")
        .context("Could not determine platform directories for LearnBuddy")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Default root for the local progress store.
pub fn default_store_root() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("progress"))
}

impl AppConfig {
    /// Loads the install config, falling back to defaults when none exists.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed reading config {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Failed parsing config {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed creating config directory {:?}", parent))?;
        }
        let raw = toml::to_string_pretty(self).context("Failed serializing config")?;
        fs::write(&path, raw).with_context(|| format!("Failed writing config {:?}", path))
    }

    pub fn local_store_config(&self) -> Result<LocalStoreConfig> {
        Ok(LocalStoreConfig {
            root: default_store_root()?,
            namespace: self.namespace.clone(),
            demo_mode: self.demo_mode,
        })
    }

    pub fn mirror_config(&self) -> MirrorConfig {
        MirrorConfig {
            root: self.remote_root.clone(),
            force_local: self.force_local_mode,
        }
    }
}
