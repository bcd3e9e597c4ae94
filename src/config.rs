use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::phrase::Difficulty;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Where the best score and leaderboard live. Defaults to the platform
    /// data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub phrases: PhraseSets,
}

/// Candidate phrases per tier. A missing or empty list means the built-in set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<Vec<String>>,
}

fn default_difficulty() -> String {
    Difficulty::default().as_str().to_string()
}
fn default_theme() -> String {
    "light".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            theme: default_theme(),
            data_dir: None,
            phrases: PhraseSets::default(),
        }
    }
}

/// Result of reading the config file at startup.
pub struct LoadedConfig {
    pub config: Config,
    /// Where UI changes may be written back. `None` when the file exists but
    /// could not be loaded, so a broken file is never replaced by defaults.
    pub save_path: Option<PathBuf>,
    pub error: Option<anyhow::Error>,
}

impl Config {
    /// Load `path`, falling back to defaults if it is unreadable or invalid.
    pub fn load_or_default(path: &Path) -> LoadedConfig {
        match Self::load_from(path) {
            Ok(config) => LoadedConfig {
                config,
                save_path: Some(path.to_path_buf()),
                error: None,
            },
            Err(e) => LoadedConfig {
                config: Config::default(),
                save_path: None,
                error: Some(e),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("phrasedash")
            .join("config.toml")
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_name(&self.difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty.as_str().to_string();
    }

    /// Rewrite stale or misspelled values to their canonical form.
    pub fn normalize(&mut self) {
        let difficulty = self.difficulty();
        if self.difficulty != difficulty.as_str() {
            tracing::warn!(
                configured = %self.difficulty,
                using = difficulty.as_str(),
                "unknown difficulty in config"
            );
            self.set_difficulty(difficulty);
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.difficulty, "medium");
        assert_eq!(config.theme, "light");
        assert!(config.data_dir.is_none());
        assert_eq!(config.phrases, PhraseSets::default());
    }

    #[test]
    fn test_config_with_custom_phrases() {
        let toml_str = r#"
difficulty = "short"
theme = "dark"

[phrases]
short = ["cat", "dog"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.difficulty(), Difficulty::Short);
        assert_eq!(config.theme, "dark");
        assert_eq!(
            config.phrases.short,
            Some(vec!["cat".to_string(), "dog".to_string()])
        );
        assert!(config.phrases.long.is_none());
    }

    #[test]
    fn test_unknown_difficulty_normalizes_to_medium() {
        let mut config = Config::default();
        config.difficulty = "insane".to_string();
        config.normalize();
        assert_eq!(config.difficulty, "medium");
    }

    #[test]
    fn test_blank_theme_normalizes_to_default() {
        let mut config = Config::default();
        config.theme = "  ".to_string();
        config.normalize();
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.difficulty, "medium");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "difficulty = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_load_or_default_keeps_broken_file_read_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "difficulty = [").unwrap();
        let loaded = Config::load_or_default(&path);
        assert!(loaded.error.is_some());
        assert!(loaded.save_path.is_none());
        assert_eq!(loaded.config.difficulty, "medium");

        let fresh = dir.path().join("fresh.toml");
        let loaded = Config::load_or_default(&fresh);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.save_path.as_deref(), Some(fresh.as_path()));
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.set_difficulty(Difficulty::Long);
        config.theme = "colorful".to_string();
        config.data_dir = Some(dir.path().join("data"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.difficulty(), Difficulty::Long);
        assert_eq!(loaded.theme, "colorful");
        assert_eq!(loaded.data_dir, config.data_dir);
    }
}
