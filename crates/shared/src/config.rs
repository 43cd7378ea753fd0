//! Configuration types for EMS

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::EmsError;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default request body size limit (1MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Where employee records are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process-local map, lost on exit
    #[default]
    Memory,
    /// SQLite database file
    Sqlite { path: PathBuf },
}

/// Server configuration file format (`ems.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// Storage backend
    pub storage: StorageConfig,

    /// Browser origins allowed by CORS; empty disables the CORS layer
    pub cors_allowed_origins: Vec<String>,

    /// Maximum accepted request body, in bytes
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            storage: StorageConfig::default(),
            cors_allowed_origins: Vec::new(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.body_limit_bytes == 0 {
            return Err(EmsError::Config(
                "bodyLimitBytes must be greater than zero".to_string(),
            ));
        }
        if let StorageConfig::Sqlite { path } = &self.storage {
            if path.as_os_str().is_empty() {
                return Err(EmsError::Config("sqlite path must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Builder: override the listen address
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Builder: override the storage backend
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.storage, StorageConfig::Memory);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.body_limit_bytes, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn test_config_parse() {
        let json = r#"{
            "bindAddr": "0.0.0.0:9000",
            "storage": { "kind": "sqlite", "path": "/var/lib/ems/ems.db" },
            "corsAllowedOrigins": ["http://localhost:4200"]
        }"#;

        let config: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(
            config.storage,
            StorageConfig::Sqlite {
                path: PathBuf::from("/var/lib/ems/ems.db")
            }
        );
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:4200"]);
        // omitted fields fall back to defaults
        assert_eq!(config.body_limit_bytes, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "storage": {{ "kind": "memory" }}, "bodyLimitBytes": 2048 }}"#).unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.body_limit_bytes, 2048);
    }

    #[test]
    fn test_from_file_rejects_zero_body_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bodyLimitBytes": 0 }}"#).unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EmsError::Config(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ServerConfig::from_file(std::path::Path::new("/nonexistent/ems.json"))
            .unwrap_err();
        assert!(matches!(err, EmsError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let addr: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        let config = ServerConfig::default()
            .with_bind_addr(addr)
            .with_storage(StorageConfig::Sqlite {
                path: PathBuf::from("ems.db"),
            });

        assert_eq!(config.bind_addr, addr);
        assert!(matches!(config.storage, StorageConfig::Sqlite { .. }));
    }
}
