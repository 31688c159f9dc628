//! Configuration management for respira.
//!
//! Loads configuration from ${RESPIRA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional WAV files for the three cues, addressed by logical name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CuesConfig {
    pub inspire: Option<PathBuf>,
    pub hold: Option<PathBuf>,
    pub expire: Option<PathBuf>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether sessions start with cues audible.
    pub sound_on_start: bool,

    /// Cue playback volume (0.0 to 1.0).
    pub volume: f32,

    /// Skip the audio backend entirely.
    pub disable_audio: bool,

    /// Cue file overrides.
    #[serde(default)]
    pub cues: CuesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound_on_start: false,
            volume: Self::DEFAULT_VOLUME,
            disable_audio: false,
            cues: CuesConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_VOLUME: f32 = 0.3;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            Ok(config.clamped())
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path` if it doesn't exist.
    ///
    /// Returns true if the file was created.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Path to the configured cue file for a logical cue name, if any.
    pub fn cue_path(&self, cue: &str) -> Option<&Path> {
        match cue {
            "inspire" => self.cues.inspire.as_deref(),
            "hold" => self.cues.hold.as_deref(),
            "expire" => self.cues.expire.as_deref(),
            _ => None,
        }
    }

    fn clamped(mut self) -> Self {
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for respira configuration and data directories.
    //!
    //! RESPIRA_HOME resolution order:
    //! 1. RESPIRA_HOME environment variable (if set)
    //! 2. ~/.config/respira (default)

    use std::path::PathBuf;

    /// Returns the respira home directory.
    pub fn respira_home() -> PathBuf {
        if let Ok(home) = std::env::var("RESPIRA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("respira"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        respira_home().join("config.toml")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        respira_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, default_config_template};

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("config.toml")).expect("load");
        assert!(!config.sound_on_start);
        assert!(!config.disable_audio);
        assert!((config.volume - 0.3).abs() < f32::EPSILON);
        assert!(config.cues.inspire.is_none());
    }

    #[test]
    fn parses_user_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
sound_on_start = true
volume = 0.5

[cues]
hold = "/tmp/hold.wav"
"#,
        )
        .expect("write");

        let config = Config::load_from(&path).expect("load");
        assert!(config.sound_on_start);
        assert!((config.volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(
            config.cue_path("hold").map(|p| p.display().to_string()),
            Some("/tmp/hold.wav".to_string())
        );
        assert!(config.cue_path("expire").is_none());
    }

    #[test]
    fn volume_is_clamped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "volume = 7.5\n").expect("write");

        let config = Config::load_from(&path).expect("load");
        assert!((config.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).expect("parse template");
        assert!(!config.sound_on_start);
        assert!((config.volume - Config::DEFAULT_VOLUME).abs() < f32::EPSILON);
    }

    #[test]
    fn init_creates_template_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");

        assert!(Config::init_at(&path).expect("init"));
        assert!(path.exists());
        assert!(!Config::init_at(&path).expect("second init"));
    }
}
