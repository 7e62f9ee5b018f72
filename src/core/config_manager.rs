// src/core/config_manager.rs
//! Unified configuration: YAML file, then environment overrides, then defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::export::ExportFormat;

const CONFIG_ENV: &str = "RESUME_SCOUT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigManager {
    pub http: HttpConfig,
    pub sites: SitesConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Résumé detail pages fetched at once.
    pub detail_concurrency: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0"
                .to_string(),
            detail_concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    pub work_ua: WorkUaConfig,
    pub robota_ua: RobotaUaConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkUaConfig {
    pub base_url: String,
}

impl Default for WorkUaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.work.ua".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotaUaConfig {
    pub api_url: String,
    pub candidate_base_url: String,
    pub origin: String,
}

impl Default for RobotaUaConfig {
    fn default() -> Self {
        Self {
            api_url: "https://employer-api.robota.ua/cvdb/resumes".to_string(),
            candidate_base_url: "https://robota.ua/ru/candidates".to_string(),
            origin: "https://robota.ua".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_pages: u32,
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_pages: 1,
            default_limit: crate::types::criteria::DEFAULT_RESULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: ExportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resumes.txt"),
            format: ExportFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Optional JSON log file, in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ConfigManager {
    /// Load configuration. An explicit path must exist; otherwise
    /// `RESUME_SCOUT_CONFIG` or `./config.yaml` is used when present.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var(CONFIG_ENV)
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                    default.exists().then_some(default)
                }),
        };

        let mut config = match path {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid configuration YAML")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(timeout) = std::env::var("RESUME_SCOUT_TIMEOUT_SECS") {
            self.http.timeout_secs = timeout
                .parse()
                .map_err(|_| anyhow::anyhow!("RESUME_SCOUT_TIMEOUT_SECS must be a number of seconds"))?;
        }

        if let Ok(output) = std::env::var("RESUME_SCOUT_OUTPUT") {
            self.output.path = PathBuf::from(output);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigManager::from_yaml("").unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.search.max_pages, 1);
        assert_eq!(config.search.default_limit, 10);
        assert_eq!(config.sites.work_ua.base_url, "https://www.work.ua");
        assert_eq!(config.output.path, PathBuf::from("resumes.txt"));
        assert_eq!(config.output.format, ExportFormat::Text);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = ConfigManager::from_yaml(
            r#"
http:
  timeout_secs: 5
search:
  max_pages: 3
output:
  format: csv
"#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.detail_concurrency, 4);
        assert_eq!(config.search.max_pages, 3);
        assert_eq!(config.search.default_limit, 10);
        assert_eq!(config.output.format, ExportFormat::Csv);
        assert_eq!(config.sites.robota_ua.origin, "https://robota.ua");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(ConfigManager::from_yaml("http: [unclosed").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(ConfigManager::load(Some(Path::new("/definitely/not/here.yaml"))).is_err());
    }
}
