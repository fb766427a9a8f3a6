use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::limits;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub bootstrap: BootstrapConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// "text" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 1)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/visitdesk.db".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            worker_threads: 1,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

/// Canonical values for the primary admin account, re-applied on every load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub admin_name: String,

    pub admin_email: String,

    /// Only used when the primary admin has to be created from scratch.
    pub default_password: String,

    /// Earlier admin usernames that are migrated onto the reserved id.
    pub legacy_admin_names: Vec<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_name: "admin".to_string(),
            admin_email: "braga.turismo.2024@gmail.com".to_string(),
            default_password: "admin".to_string(),
            legacy_admin_names: vec!["vitor.afonso".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Length of generated temporary passwords.
    pub temp_password_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            temp_password_length: limits::TEMP_PASSWORD_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    pub page_size: usize,

    /// Cap for the visit reason and length of stay tables.
    pub top_groups: usize,

    pub pie_slices: usize,

    pub trend_buckets: usize,

    pub map_top: usize,

    pub export_dir: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            page_size: limits::PAGE_SIZE,
            top_groups: limits::TOP_GROUPS,
            pie_slices: limits::PIE_SLICES,
            trend_buckets: limits::TREND_BUCKETS,
            map_top: limits::MAP_TOP,
            export_dir: "exports".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            bootstrap: BootstrapConfig::default(),
            security: SecurityConfig::default(),
            reports: ReportsConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("visitdesk").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".visitdesk").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if !matches!(self.general.log_format.as_str(), "text" | "json") {
            anyhow::bail!(
                "Unknown log format '{}', expected \"text\" or \"json\"",
                self.general.log_format
            );
        }

        if self.bootstrap.admin_name.trim().is_empty()
            || self.bootstrap.admin_email.trim().is_empty()
        {
            anyhow::bail!("Primary admin name and email must be set");
        }

        if self.security.temp_password_length == 0 {
            anyhow::bail!("Temporary password length must be > 0");
        }

        if self.reports.page_size == 0 {
            anyhow::bail!("Report page size must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reports.page_size, 15);
        assert_eq!(config.reports.top_groups, 10);
        assert_eq!(config.security.temp_password_length, 8);
        assert_eq!(config.bootstrap.admin_name, "admin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[bootstrap]"));
        assert!(toml_str.contains("[reports]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [reports]
            page_size = 25
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.reports.page_size, 25);

        assert_eq!(config.reports.pie_slices, 5);
        assert_eq!(config.bootstrap.legacy_admin_names, vec!["vitor.afonso"]);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.reports.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.general.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
