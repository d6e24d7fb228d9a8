//! Settings configuration
//!
//! Manages user-configurable settings for the IME.
//! Default values are defined in `config/default.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use liushu_engine::Formula;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default configuration TOML embedded from config/default.toml
const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

/// Configuration settings for the IME
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Formula searched first; other formulas stay loaded for switching
    #[serde(default)]
    pub active_formula: Option<String>,
    /// Candidate display settings
    pub candidates: CandidateSettings,
    /// Configured formulas (input schemes)
    #[serde(default)]
    pub formulas: Vec<Formula>,
}

/// Candidate display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSettings {
    /// Number of candidates per page
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default.toml must be valid")
    }
}

/// Recursively merge `overlay` TOML values on top of `base`.
fn merge_toml(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, _) => {
            *base = overlay.clone();
        }
    }
}

/// Parse user TOML content merged on top of default.toml.
fn parse_with_defaults(user_content: &str) -> Result<Settings> {
    let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
    let user: toml::Value = toml::from_str(user_content)?;
    merge_toml(&mut base, &user);
    let settings: Settings = base.try_into()?;
    Ok(settings)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "liushu", "liushu")
}

impl Settings {
    /// Get the data directory path
    pub fn data_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Directory holding formula sources, one sub-directory per formula id.
    ///
    /// Default: `~/.config/liushu/`
    pub fn formula_dir() -> Option<PathBuf> {
        Self::config_dir()
    }

    /// Directory holding compiled formula dictionaries.
    ///
    /// Default: `~/.local/share/liushu/target/`
    pub fn target_dir() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("target"))
    }

    /// Look up a configured formula by id.
    pub fn formula(&self, id: &str) -> Option<&Formula> {
        self.formulas.iter().find(|f| f.id == id)
    }

    /// Load settings from the default configuration file.
    /// Falls back to embedded default.toml if the config file does not exist.
    pub fn load() -> Result<Self> {
        let Some(config_file) = Self::config_file() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        if !config_file.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", config_file);
        let content = fs::read_to_string(&config_file)?;
        parse_with_defaults(&content)
    }

    /// Load settings from a specific file, merged on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        parse_with_defaults(&content)
    }

    /// Save settings to the default configuration file
    pub fn save(&self) -> Result<()> {
        let Some(config_file) = Self::config_file() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&config_file)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!("Saving config to {:?}", path);
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.candidates.page_size, 9);
        assert_eq!(settings.active_formula.as_deref(), Some("sunman"));
        assert_eq!(settings.formulas.len(), 1);
        assert_eq!(settings.formulas[0].display_name(), "山人全息");
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = Settings::default();
        let toml_str = toml::to_string(&settings).unwrap();
        let loaded: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.candidates.page_size, settings.candidates.page_size);
        assert_eq!(loaded.formulas, settings.formulas);
    }

    #[test]
    fn test_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[candidates]
page_size = 5
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.candidates.page_size, 5);
        // Unspecified values come from defaults
        assert_eq!(settings.active_formula.as_deref(), Some("sunman"));
        assert_eq!(settings.formulas.len(), 1);
    }

    #[test]
    fn test_formulas_replace_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
active_formula = "wubi"

[[formulas]]
id = "wubi"
dictionaries = ["wubi86.tsv", "extra.tsv"]
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.active_formula.as_deref(), Some("wubi"));
        assert_eq!(settings.formulas.len(), 1);
        let wubi = settings.formula("wubi").unwrap();
        assert_eq!(wubi.dictionaries.len(), 2);
        assert_eq!(wubi.display_name(), "wubi");
        assert!(settings.formula("sunman").is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut settings = Settings::default();
        settings.candidates.page_size = 7;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.candidates.page_size, 7);
    }

    #[test]
    fn test_target_dir() {
        // Should return Some on systems with a home directory
        if let Some(dir) = Settings::target_dir() {
            assert!(dir.ends_with("target"));
        }
    }
}
