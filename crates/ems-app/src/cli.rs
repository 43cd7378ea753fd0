//! Command-line arguments and configuration resolution
//!
//! Precedence: defaults < config file < environment < flags. Clap reads the
//! environment variables, so env and flags arrive here already merged.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shared::config::{ServerConfig, StorageConfig};

/// Database file used when SQLite is selected without a path
pub const DEFAULT_DATABASE_PATH: &str = "ems.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    Memory,
    Sqlite,
}

#[derive(Debug, Parser)]
#[command(name = "ems")]
#[command(about = "EMS - Employee management REST service")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, env = "EMS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "EMS_BIND_ADDR")]
    pub bind: Option<SocketAddr>,

    /// Storage backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageKind>,

    /// SQLite database file (selects SQLite storage unless --storage says otherwise)
    #[arg(long, env = "EMS_DATABASE_PATH")]
    pub database: Option<PathBuf>,
}

impl Cli {
    /// Build the effective server configuration
    pub fn resolve(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(addr) = self.bind {
            config = config.with_bind_addr(addr);
        }

        let storage = match (self.storage, &self.database) {
            (Some(StorageKind::Memory), _) => Some(StorageConfig::Memory),
            (Some(StorageKind::Sqlite), Some(path)) | (None, Some(path)) => {
                Some(StorageConfig::Sqlite { path: path.clone() })
            }
            (Some(StorageKind::Sqlite), None) => match &config.storage {
                StorageConfig::Sqlite { .. } => None,
                StorageConfig::Memory => Some(StorageConfig::Sqlite {
                    path: PathBuf::from(DEFAULT_DATABASE_PATH),
                }),
            },
            (None, None) => None,
        };
        if let Some(storage) = storage {
            config = config.with_storage(storage);
        }

        config.validate()?;
        Ok(config)
    }
}
