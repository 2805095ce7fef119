//! User settings, stored as TOML in the platform config directory.

use scenesplit_core::{FrameRate, SceneSplitError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors raised while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not encode settings: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

impl From<SettingsError> for SceneSplitError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Io { source, .. } => SceneSplitError::Io(source),
            SettingsError::Invalid(msg) => SceneSplitError::InvalidParameter(msg),
            other => SceneSplitError::Serialization(other.to_string()),
        }
    }
}

/// All SceneSplit settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub detect: DetectSettings,
}

/// Scene detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectSettings {
    /// ffprobe binary
    pub ffprobe: PathBuf,
    /// Scene score a frame must exceed to count as a cut (0..=1)
    pub threshold: f64,
    /// Frame rate used instead of the probed one, e.g. "24" or "30000/1001"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<String>,
}

impl Default for DetectSettings {
    fn default() -> Self {
        Self {
            ffprobe: find_ffprobe_binary(),
            threshold: 0.3,
            frame_rate: None,
        }
    }
}

impl DetectSettings {
    /// Parsed frame-rate override, if one is configured.
    pub fn frame_rate_override(&self) -> Result<Option<FrameRate>, SettingsError> {
        self.frame_rate
            .as_deref()
            .map(|r| FrameRate::parse(r).map_err(|e| SettingsError::Invalid(e.to_string())))
            .transpose()
    }
}

/// Search PATH for ffprobe, falling back to the bare name.
pub fn find_ffprobe_binary() -> PathBuf {
    which::which("ffprobe").unwrap_or_else(|_| PathBuf::from("ffprobe"))
}

impl Settings {
    /// Load from the default location, falling back to defaults when the
    /// file is missing or unusable.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load `path` if it exists. A file that fails to read, parse or
    /// validate is reported and replaced by defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Ignoring unusable settings file");
                Self::default()
            }
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write to an explicit file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.detect.threshold) {
            return Err(SettingsError::Invalid(format!(
                "detect.threshold must be within [0, 1], got {}",
                self.detect.threshold
            )));
        }
        self.detect.frame_rate_override()?;
        Ok(())
    }

    /// `<config dir>/scenesplit/config.toml`
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("scenesplit");
            path.push("config.toml");
            path
        })
    }
}
