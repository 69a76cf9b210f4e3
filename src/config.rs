use crate::core::operations::STORAGE_KEY;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding one `<key>.json` file per storage key
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub color: bool,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("budget-tracker");

        Self {
            general: GeneralConfig {
                data_dir,
                storage_key: STORAGE_KEY.to_string(),
                color: true,
                export_dir: None,
            },
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::load_custom(&Self::config_file_path())
    }

    pub fn ensure_config_exists() -> AppResult<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            Config::default().save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|e| AppError::Io(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::System(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        let key = self.general.storage_key.trim();
        if key.is_empty() {
            return Err(AppError::System("Storage key cannot be empty".to_string()));
        }

        if key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(AppError::System(format!(
                "Storage key '{}' must be a plain file name",
                key
            )));
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content).map_err(|e| AppError::Io(e.to_string()))?;

        Ok(())
    }

    /// Where `export` writes when no directory is given
    pub fn export_dir(&self) -> PathBuf {
        self.general
            .export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn watch_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.watch.debounce_ms)
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("budget-tracker")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.storage_key, STORAGE_KEY);
        assert!(config.general.data_dir.ends_with("budget-tracker"));
    }

    #[test]
    fn test_load_custom_creates_default_file() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("conf").join("config.toml");

        let config = Config::load_custom(&path).expect("load");
        assert!(path.exists());

        let reloaded = Config::load_custom(&path).expect("reload");
        assert_eq!(reloaded.general.data_dir, config.general.data_dir);
        assert_eq!(reloaded.watch.debounce_ms, 250);
    }

    #[test]
    fn test_watch_section_is_optional() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\ndata_dir = \"/tmp/bt\"\nstorage_key = \"budget\"\ncolor = false\n",
        )
        .expect("write config");

        let config = Config::load_custom(&path).expect("load");
        assert_eq!(config.general.storage_key, "budget");
        assert!(!config.general.color);
        assert_eq!(config.general.export_dir, None);
        assert_eq!(config.watch.debounce_ms, 250);
    }

    #[test]
    fn test_rejects_bad_storage_keys() {
        for key in ["", "  ", "../escape", "a/b", ".hidden"] {
            let mut config = Config::default();
            config.general.storage_key = key.to_string();
            assert!(config.validate().is_err(), "key should be rejected: {:?}", key);
        }
    }
}
