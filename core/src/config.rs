//! Configuration management (demo.toml)
//!
//! Settings live in `demo.toml` in the platform-specific config directory.
//! Missing or unreadable files fall back to defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use demostream_shared::{DEMO_EXTENSION, MAX_DEMO_BYTES};

use crate::demo::types::DEFAULT_BUFFER_CAPACITY;

/// Demo system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DemoConfig {
    /// Recording settings
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Recording configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Initial recording buffer size in bytes (default: 64 KiB)
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Extension given to names without one (default: ".dem")
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Where finished recordings are written (default: data dir / demos)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

/// Playback configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Directory recordings are loaded from (default: data dir / demos)
    #[serde(default)]
    pub demo_dir: Option<PathBuf>,
    /// Largest recording that will be loaded (default: 256 MiB)
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_initial_capacity() -> usize {
    DEFAULT_BUFFER_CAPACITY
}
fn default_extension() -> String {
    DEMO_EXTENSION.to_string()
}
fn default_max_file_bytes() -> u64 {
    MAX_DEMO_BYTES
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            extension: default_extension(),
            export_dir: None,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            demo_dir: None,
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl DemoConfig {
    /// Directory recordings are loaded from
    pub fn demo_dir(&self) -> PathBuf {
        self.playback
            .demo_dir
            .clone()
            .or_else(default_demo_dir)
            .unwrap_or_else(|| PathBuf::from("demos"))
    }

    /// Directory finished recordings are written to
    pub fn export_dir(&self) -> PathBuf {
        self.recording
            .export_dir
            .clone()
            .unwrap_or_else(|| self.demo_dir())
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Linux: `~/.config/demostream`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "demostream", "demostream")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of recordings: `<data dir>/demos`
pub fn default_demo_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "demostream", "demostream")
        .map(|dirs| dirs.data_dir().join("demos"))
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> DemoConfig {
    let Some(content) =
        config_dir().and_then(|dir| std::fs::read_to_string(dir.join("demo.toml")).ok())
    else {
        return DemoConfig::default();
    };
    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Invalid demo.toml, using defaults");
        DemoConfig::default()
    })
}

/// Loads the configuration from an explicit file.
///
/// Unlike [`load`], a missing or malformed file is an error.
pub fn load_from(path: &Path) -> Result<DemoConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Saves the configuration to the platform config directory.
///
/// Creates the directory if it doesn't exist.
pub fn save(config: &DemoConfig) -> Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(dir.join("demo.toml"), content).context("Failed to write config")?;
    }
    Ok(())
}
