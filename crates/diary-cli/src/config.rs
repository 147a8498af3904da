use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiaryConfig {
    #[serde(default)]
    pub diary: DiarySection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiarySection {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UiSection {
    /// Replaces the top-level prompt
    pub prompt: Option<String>,
    /// Show the latest entry at startup
    #[serde(default = "default_show_latest")]
    pub show_latest: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            prompt: None,
            show_latest: default_show_latest(),
        }
    }
}

fn default_show_latest() -> bool {
    true
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_diary_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("diary.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<DiaryConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("diary"));
        }
    }
    Ok(home_dir()?.join(".config").join("diary"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("diary"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("diary"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: DiaryConfig = toml::from_str("").unwrap();
        assert!(config.diary.path.is_none());
        assert!(config.ui.prompt.is_none());
        assert!(config.ui.show_latest);
    }

    #[test]
    fn test_full_config() {
        let config: DiaryConfig = toml::from_str(
            "[diary]\npath = \"/tmp/d.json\"\n\n[ui]\nprompt = \"diary> \"\nshow_latest = false\n",
        )
        .unwrap();
        assert_eq!(config.diary.path.as_deref(), Some("/tmp/d.json"));
        assert_eq!(config.ui.prompt.as_deref(), Some("diary> "));
        assert!(!config.ui.show_latest);
    }

    #[test]
    fn test_read_config_reports_path_on_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[diary\n").unwrap();
        let err = read_config(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config"));
        assert!(err.contains("config.toml"));
    }
}
