use crate::engine::{EngineOptions, Strategy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// "best-effort" or "plan-then-commit"
    #[serde(default)]
    pub strategy: Strategy,

    /// Whether to pad every name to the longest width after a shift or insert
    #[serde(default = "default_true")]
    pub normalize: bool,

    /// Whether entries starting with `.` take part in numbering
    #[serde(default)]
    pub include_hidden: bool,

    /// Prefix for names used while breaking rename cycles
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,

    /// Regex applied to `list` output when no filter is given
    #[serde(default)]
    pub list_filter: Option<String>,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            normalize: true,
            include_hidden: false,
            temp_prefix: default_temp_prefix(),
            list_filter: None,
            use_color: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_temp_prefix() -> String {
    EngineOptions::default().temp_prefix
}

impl DefaultsConfig {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            strategy: self.strategy,
            normalize: self.normalize,
            temp_prefix: self.temp_prefix.clone(),
            include_hidden: self.include_hidden,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/renumber/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("renumber").join("config.toml"))
    }

    /// Load `explicit` if given, else the default location if it exists,
    /// else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.strategy, Strategy::BestEffort);
        assert!(config.defaults.normalize);
        assert!(!config.defaults.include_hidden);
        assert_eq!(config.defaults.temp_prefix, ".renumber-tmp");
        assert_eq!(config.defaults.list_filter, None);
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_load_save_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.strategy = Strategy::PlanThenCommit;
        config.defaults.normalize = false;
        config.defaults.list_filter = Some(r"\d+\.jpg".to_string());
        config.defaults.use_color = Some(true);

        config.save_to_path(&config_path).unwrap();

        let loaded_config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded_config.defaults.strategy, Strategy::PlanThenCommit);
        assert!(!loaded_config.defaults.normalize);
        assert_eq!(loaded_config.defaults.list_filter.as_deref(), Some(r"\d+\.jpg"));
        assert_eq!(loaded_config.defaults.use_color, Some(true));
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
strategy = "plan-then-commit"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.strategy, Strategy::PlanThenCommit);
        // Other fields should have their defaults
        assert!(config.defaults.normalize);
        assert_eq!(config.defaults.temp_prefix, ".renumber-tmp");
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let toml_content = r#"
[defaults]
strategy = "yolo"
"#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&temp_dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_engine_options_follow_defaults() {
        let mut config = Config::default();
        config.defaults.include_hidden = true;
        config.defaults.temp_prefix = ".swap".to_string();
        let options = config.defaults.engine_options();
        assert!(options.include_hidden);
        assert!(options.normalize);
        assert_eq!(options.temp_prefix, ".swap");
    }
}
