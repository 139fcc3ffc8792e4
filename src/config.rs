use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CrmError, CrmResult};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Backend name. Blank or absent selects the in-memory store.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs rotate into files in this directory instead of stderr.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Json,
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "memory" => Ok(StorageKind::Memory),
            "json" => Ok(StorageKind::Json),
            "sqlite" | "gorm" => Ok(StorageKind::Sqlite),
            _ => Err(CrmError::Config(format!("unsupported storage type: {}", s.trim()))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::Memory => "memory",
            StorageKind::Json => "json",
            StorageKind::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

impl StorageConfig {
    pub fn kind(&self) -> CrmResult<StorageKind> {
        self.kind.parse()
    }

    /// The configured path, treating a blank value as absent.
    pub fn path(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

impl Config {
    /// Reads the configuration from `path`, or from `./config.toml` when none is given.
    pub fn load(path: Option<&Path>) -> CrmResult<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let text = std::fs::read_to_string(path).map_err(|e| {
            CrmError::Config(format!("read configuration {}: {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> CrmResult<Self> {
        toml::from_str(text).map_err(|e| CrmError::Config(format!("parse configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_defaults_to_memory() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.storage.kind().unwrap(), StorageKind::Memory);
        assert_eq!(config.storage.path(), None);
        assert_eq!(config.log.level, "warn");
        assert!(config.log.dir.is_none());
    }

    #[test]
    fn parses_json_storage() {
        let config = Config::parse(
            r#"
            [storage]
            type = "json"
            path = "data/contacts.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.kind().unwrap(), StorageKind::Json);
        assert_eq!(config.storage.path(), Some(Path::new("data/contacts.json")));
    }

    #[test]
    fn gorm_is_an_alias_for_sqlite() {
        let config = Config::parse("[storage]\ntype = \"gorm\"\n").unwrap();
        assert_eq!(config.storage.kind().unwrap(), StorageKind::Sqlite);
    }

    #[test]
    fn storage_type_is_case_insensitive() {
        assert_eq!("JSON".parse::<StorageKind>().unwrap(), StorageKind::Json);
    }

    #[test]
    fn unsupported_storage_type_is_config_error() {
        let config = Config::parse("[storage]\ntype = \"redis\"\n").unwrap();
        let err = config.storage.kind().unwrap_err();
        assert_eq!(err.to_string(), "configuration error: unsupported storage type: redis");
    }

    #[test]
    fn blank_path_counts_as_absent() {
        let config = Config::parse("[storage]\ntype = \"json\"\npath = \"\"\n").unwrap();
        assert_eq!(config.storage.path(), None);
    }

    #[test]
    fn parses_log_section() {
        let config = Config::parse("[log]\nlevel = \"debug\"\ndir = \"logs\"\n").unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::parse("[storage\ntype = json").unwrap_err();
        assert!(matches!(err, CrmError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("read configuration"));
    }
}
