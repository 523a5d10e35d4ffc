//! Configuration loading and management
//!
//! Handles parsing of `.tender-board.toml` configuration files.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::detail::DEFAULT_TIMESTAMP_FORMAT;

pub const CONFIG_FILE_NAME: &str = ".tender-board.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Board configuration
    #[serde(default)]
    pub board: BoardConfig,

    /// Comment thread configuration
    #[serde(default)]
    pub comments: CommentsConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Board,
    List,
}

/// Board-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    /// View shown when the board viewer starts
    #[serde(default)]
    pub default_view: ViewMode,

    /// JSON file that replaces the built-in seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<PathBuf>,
}

impl BoardConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if let Some(seed) = self.seed.as_ref() {
            if seed.as_os_str().is_empty() {
                return Err(crate::error::Error::InvalidConfig(
                    "board.seed cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Comment-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsConfig {
    /// chrono format string for comment timestamps
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl CommentsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.timestamp_format.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "comments.timestamp_format cannot be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(crate::error::Error::InvalidConfig(format!(
                "comments.timestamp_format: invalid format '{}'",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|err| {
            crate::error::Error::InvalidConfig(format!("{}: {}", path.display(), err.message()))
        })?;
        config.validate()?;
        config.resolve_seed_path(path);
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_else(|err| {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Resolve configuration: an explicit path must load; otherwise the
    /// working directory and then the user config directory are tried.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> crate::error::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if cwd.join(CONFIG_FILE_NAME).exists() {
            return Ok(Self::load_from_dir(cwd));
        }
        if let Some(path) = user_config_path() {
            if path.exists() {
                return Ok(Self::load(&path).unwrap_or_default());
            }
        }
        Ok(Self::default())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.board.validate()?;
        self.comments.validate()?;
        Ok(())
    }

    fn resolve_seed_path(&mut self, config_path: &Path) {
        let Some(seed) = self.board.seed.as_ref() else {
            return;
        };
        if seed.is_relative() {
            if let Some(parent) = config_path.parent() {
                self.board.seed = Some(parent.join(seed));
            }
        }
    }
}

/// Per-user config file location, e.g. `~/.config/tender-board/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tender-board")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.board.default_view, ViewMode::Board);
        assert!(cfg.board.seed.is_none());
        assert_eq!(cfg.comments.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let content = r#"
[board]
default_view = "list"
seed = "tenders.json"

[comments]
timestamp_format = "%Y-%m-%d %H:%M"
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.board.default_view, ViewMode::List);
        assert_eq!(cfg.board.seed, Some(dir.path().join("tenders.json")));
        assert_eq!(cfg.comments.timestamp_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn invalid_view_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[board]\ndefault_view = \"grid\"").expect("write config");

        match Config::load(&path).expect_err("invalid config") {
            crate::error::Error::InvalidConfig(message) => {
                assert!(message.contains("unknown variant `grid`"), "{message}");
                assert!(message.contains(CONFIG_FILE_NAME), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_timestamp_format_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[comments]\ntimestamp_format = \"%Q\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        assert!(matches!(err, crate::error::Error::InvalidConfig(_)));
    }

    #[test]
    fn missing_default_view_uses_board() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[board]\nseed = \"tenders.json\"").expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.board.default_view, ViewMode::Board);
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.board.default_view, ViewMode::Board);
    }

    #[test]
    fn load_from_dir_defaults_on_invalid_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "board = 3").expect("write config");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg.board.default_view, ViewMode::Board);
    }

    #[test]
    fn discover_requires_explicit_file_to_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(Config::discover(Some(&missing), dir.path()).is_err());
    }
}
