// Configuration module for application settings
// This module handles loading and saving application configuration

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{LogCategory, LogLayout};
use crate::domain::services::classifier::{
    ClassificationPolicy, APPLICATION_LOGS, CORE_LOGS, NETWORK_SERVICE_LOGS,
};
use crate::error::PipelineError;
use crate::infrastructure::factories::FactoryConfig;

const APP_DIR: &str = "zeek-sorter";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub enable_colors: bool,
    pub enable_emoji: bool,
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub categories: Vec<CategoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub binary: String,
    /// Appended after `-r <capture>`
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub root: PathBuf,
    pub connection_log: String,
}

/// One category of the log layout; earlier entries win on duplicate names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    pub directory: String,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_colors: true,
            enable_emoji: true,
            engine: EngineConfig::default(),
            output: OutputConfig::default(),
            categories: vec![
                CategoryConfig::new("core", CORE_LOGS),
                CategoryConfig::new("network_services", NETWORK_SERVICE_LOGS),
                CategoryConfig::new("application", APPLICATION_LOGS),
            ],
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: crate::DEFAULT_ENGINE.to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(crate::DEFAULT_LOG_ROOT),
            connection_log: crate::DEFAULT_CONNECTION_LOG.to_string(),
        }
    }
}

impl CategoryConfig {
    fn new(name: &str, logs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            directory: name.to_string(),
            logs: logs.iter().map(|log| log.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load from `explicit` when given (it must exist), else from the default
    /// location when a file is there, else built-in defaults.
    ///
    /// Never writes anything to disk.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PipelineError> {
        let config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, PipelineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            PipelineError::Config(message) => {
                PipelineError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, PipelineError> {
        // toml errors span several lines; keep the first
        toml::from_str(content).map_err(|e: toml::de::Error| {
            PipelineError::Config(e.message().lines().next().unwrap_or("parse error").to_string())
        })
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reject layouts that could not be created under the output root.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.engine.binary.trim().is_empty() {
            return Err(PipelineError::Config("engine.binary is empty".to_string()));
        }
        if !is_plain_name(&self.output.connection_log) {
            return Err(PipelineError::Config(format!(
                "output.connection_log '{}' must be a plain file name",
                self.output.connection_log
            )));
        }

        let mut names = HashSet::new();
        let mut directories = HashSet::new();
        for category in &self.categories {
            if !names.insert(category.name.as_str()) {
                return Err(PipelineError::Config(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            if !is_plain_name(&category.directory) {
                return Err(PipelineError::Config(format!(
                    "category '{}' directory '{}' must be a single relative path component",
                    category.name, category.directory
                )));
            }
            if !directories.insert(category.directory.as_str()) {
                return Err(PipelineError::Config(format!(
                    "categories share directory '{}'",
                    category.directory
                )));
            }
        }

        Ok(())
    }

    pub fn classification_policy(&self) -> ClassificationPolicy {
        self.categories
            .iter()
            .fold(ClassificationPolicy::new(), |policy, category| {
                policy.with_category(
                    LogCategory::new(category.name.clone(), category.directory.clone()),
                    category.logs.iter().cloned(),
                )
            })
    }

    pub fn layout(&self) -> LogLayout {
        self.classification_policy().layout(&self.output.root)
    }

    pub fn connection_log_path(&self) -> PathBuf {
        self.output.root.join(&self.output.connection_log)
    }

    pub fn factory_config(&self) -> FactoryConfig {
        FactoryConfig::builder()
            .engine_binary(self.engine.binary.clone())
            .engine_extra_args(self.engine.extra_args.clone())
            .colors(self.enable_colors)
            .emoji(self.enable_emoji)
            .build()
    }

    pub fn update_output_root(&mut self, root: PathBuf) {
        self.output.root = root;
    }

    pub fn update_engine_binary(&mut self, binary: String) {
        self.engine.binary = binary;
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_default_policy_matches_zeek_layout() {
        let config = AppConfig::default();
        let policy = config.classification_policy();
        let stock = ClassificationPolicy::zeek_default();

        assert_eq!(policy.categories(), stock.categories());
        for log in CORE_LOGS.iter().chain(NETWORK_SERVICE_LOGS).chain(APPLICATION_LOGS) {
            assert_eq!(
                policy.classify(log).map(|c| c.name()),
                stock.classify(log).map(|c| c.name())
            );
        }
        assert_eq!(config.layout().root(), Path::new("zeek_logs"));
        assert_eq!(config.connection_log_path(), PathBuf::from("zeek_logs/conn.log"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [engine]
            binary = "/opt/zeek/bin/zeek"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.engine.binary, "/opt/zeek/bin/zeek");
        assert!(config.engine.extra_args.is_empty());
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.categories.len(), 3);
    }

    #[test]
    fn test_custom_categories() {
        let config = AppConfig::from_toml(
            r#"
            [[categories]]
            name = "web"
            directory = "web"
            logs = ["http.log", "ssl.log"]

            [[categories]]
            name = "rest"
            directory = "misc"
            logs = ["conn.log", "http.log"]
            "#,
        )
        .unwrap();
        config.validate().unwrap();

        let policy = config.classification_policy();
        assert_eq!(policy.classify("http.log").unwrap().name(), "web");
        assert_eq!(policy.classify("conn.log").unwrap().directory(), "misc");
        assert!(policy.classify("dns.log").is_none());
    }

    #[test]
    fn test_validation_rejects_bad_layouts() {
        let mut config = AppConfig::default();
        config.categories[1].name = "core".to_string();
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));

        let mut config = AppConfig::default();
        config.categories[0].directory = "../outside".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.categories[2].directory = "core".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.output.connection_log = "nested/conn.log".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.engine.binary = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();
        config.enable_colors = false;
        config.save(&config_path).unwrap();

        let loaded = AppConfig::load(Some(&config_path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(&temp_dir.path().join("absent.toml")));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_parse_error_is_single_line() {
        let error = AppConfig::from_toml("log_level = [").unwrap_err();
        assert!(!error.to_string().contains('\n'));
    }
}
