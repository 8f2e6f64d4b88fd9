use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".refscope";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Number of worker threads for the extraction phase (None = auto-detect)
    #[serde(default)]
    pub parallel_threads: Option<usize>,

    /// Maximum number of skipped files listed in the log summary
    #[serde(default = "default_max_skip_report")]
    pub max_skip_report: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            parallel_threads: None,
            max_skip_report: default_max_skip_report(),
        }
    }
}

fn default_max_skip_report() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file-based logging
    #[serde(default)]
    pub enabled: bool,

    /// Also log to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// Log level for the file layer: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory (relative paths resolve against the working root)
    #[serde(default = "default_log_dir")]
    pub directory: PathBuf,

    /// Log file name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation strategy: hourly, daily, minutely, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_level(),
            directory: default_log_dir(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".refscope/logs")
}

fn default_file_prefix() -> String {
    "refscope".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .refscope directory, falling back to
    /// defaults when no config file exists.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .refscope directory.
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.resolver.parallel_threads.is_none());
        assert_eq!(config.resolver.max_skip_report, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.stderr);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.resolver.parallel_threads = Some(4);

        config.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();

        assert_eq!(loaded.resolver.parallel_threads, Some(4));
        assert_eq!(loaded.logging.level, config.logging.level);
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.resolver.max_skip_report, 5);
    }
}
