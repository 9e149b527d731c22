//! Configuration loading and data folder resolution
//!
//! Data folder resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `WEDDING_DATA_FOLDER` environment variable
//! 3. `data_folder` in the TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable TOML file never stops startup; callers log the
//! problem and fall back to [`TomlConfig::default`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding the data folder
pub const DATA_FOLDER_ENV: &str = "WEDDING_DATA_FOLDER";

/// Environment variable overriding the config file location
pub const CONFIG_FILE_ENV: &str = "WEDDING_CONFIG";

/// SQLite file name inside the data folder
pub const DATABASE_FILE_NAME: &str = "wedding.db";

/// Default listen address for the invitation service
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Folder holding the RSVP database
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// Listen address, e.g. "127.0.0.1:8080"
    #[serde(default)]
    pub bind_addr: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values used when neither CLI, environment nor TOML supply one
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_folder: PathBuf,
    pub bind_addr: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            data_folder: default_data_folder(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/wedding
        dirs::data_local_dir()
            .map(|d| d.join("wedding"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/wedding"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("wedding"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/wedding"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("wedding"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\wedding"))
    } else {
        PathBuf::from("./wedding_data")
    }
}

/// Default config file location (`~/.config/wedding/config.toml`)
///
/// `WEDDING_CONFIG` overrides the location.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("wedding").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Listen address: CLI (or `WEDDING_BIND_ADDR`), then TOML, then compiled default
pub fn resolve_bind_addr(cli_arg: Option<String>, toml: &TomlConfig) -> String {
    cli_arg
        .or_else(|| toml.bind_addr.clone())
        .unwrap_or_else(|| CompiledDefaults::for_current_platform().bind_addr)
}

/// Resolves the data folder from the four configuration tiers
pub struct DataFolderResolver {
    cli_arg: Option<PathBuf>,
    toml: TomlConfig,
}

impl DataFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, toml: TomlConfig) -> Self {
        Self { cli_arg, toml }
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        // Priority 3: TOML config file
        if let Some(path) = &self.toml.data_folder {
            return path.clone();
        }

        // Priority 4: OS-dependent compiled default
        CompiledDefaults::for_current_platform().data_folder
    }
}

/// Prepares a resolved data folder for use
pub struct DataFolderInitializer {
    data_folder: PathBuf,
}

impl DataFolderInitializer {
    pub fn new(data_folder: PathBuf) -> Self {
        Self { data_folder }
    }

    /// Create the folder (and parents) if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.data_folder.exists() {
            std::fs::create_dir_all(&self.data_folder)?;
            info!("Created data folder: {}", self.data_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_folder.join(DATABASE_FILE_NAME)
    }
}
