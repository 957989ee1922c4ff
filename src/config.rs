//! Optional TOML configuration file
//!
//! Lives at `~/.config/agentdeck/config.toml` unless `--config` says
//! otherwise. Every key is optional; a missing file means defaults.

use crate::{DeckConfig, DeckError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Built-in color themes
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub theme: Option<ThemeName>,
    pub note_char_limit: Option<usize>,
    pub task_char_limit: Option<usize>,
    pub chat_char_limit: Option<usize>,
    pub toast_millis: Option<u64>,
    pub event_queue_capacity: Option<usize>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path`; a missing file yields the empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map_err(|e| DeckError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Overlay the keys that are set onto `config`.
    pub fn apply(self, mut config: DeckConfig) -> DeckConfig {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(limit) = self.note_char_limit {
            config.limits.note = limit;
        }
        if let Some(limit) = self.task_char_limit {
            config.limits.task = limit;
        }
        if let Some(limit) = self.chat_char_limit {
            config.limits.chat = limit;
        }
        if let Some(millis) = self.toast_millis {
            config.toast_duration = Duration::from_millis(millis);
        }
        if let Some(capacity) = self.event_queue_capacity {
            config.event_queue_capacity = capacity;
        }
        config
    }
}

/// `~/.config/agentdeck/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agentdeck").join("config.toml"))
}

/// `~/.local/share/agentdeck` (falls back to the working directory)
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("agentdeck"))
        .unwrap_or_else(|| PathBuf::from(".agentdeck"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_and_apply() {
        let file = FileConfig::parse(
            r#"
            theme = "light"
            note_char_limit = 200
            toast_millis = 1500
            "#,
        )
        .unwrap();

        let config = file.apply(DeckConfig::new(PathBuf::from("s.json")));
        assert_eq!(config.theme, ThemeName::Light);
        assert_eq!(config.limits.note, 200);
        assert_eq!(config.limits.task, 500);
        assert_eq!(config.toast_duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = FileConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = 3").unwrap();
        assert!(matches!(FileConfig::load(&path), Err(DeckError::Config(_))));
    }
}
