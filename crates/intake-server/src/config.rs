use intake_db_postgres::PostgresConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.server.body_limit_bytes == 0 {
            return Err("server.body_limit_bytes must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.storage.backend == StorageBackend::Postgres {
            for (name, pg) in [
                ("primary", &self.storage.primary),
                ("replica", &self.storage.replica),
            ] {
                if pg.url.is_none() && pg.host.is_empty() {
                    return Err(format!(
                        "storage.{name} requires either 'url' or 'host' to be set"
                    ));
                }
                if pg.url.is_none() && pg.database.is_empty() {
                    return Err(format!("storage.{name}.database must not be empty"));
                }
                if pg.pool_size == 0 {
                    return Err(format!("storage.{name}.pool_size must be > 0"));
                }
            }
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Which record store implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// In-process store; records do not survive a restart. Dev/test only.
    Memory,
}

/// Storage configuration: a primary write target and an independent replica
/// target. Writes fan out to both; reads go to the replica.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub primary: PostgresConfig,
    #[serde(default)]
    pub replica: PostgresConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Load configuration from a TOML file.
///
/// A missing file falls back to defaults only when the path was not
/// explicitly requested; an unreadable or invalid file is always an error.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
    let (path, explicit) = match path {
        Some(p) => (p, true),
        None => ("intake.toml", false),
    };

    let cfg = if Path::new(path).exists() {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config file '{path}': {e}"))?;
        toml::from_str(&raw).map_err(|e| format!("invalid config file '{path}': {e}"))?
    } else if explicit {
        return Err(format!("config file '{path}' not found"));
    } else {
        AppConfig::default()
    };

    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_memory_backend_skips_postgres_checks() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        cfg.storage.primary.pool_size = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_config_parses_from_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [storage]
            backend = "memory"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_storage_targets_parse_independently() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [storage.primary]
            host = "db-primary.internal"

            [storage.replica]
            host = "db-replica.internal"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.storage.primary.host, "db-primary.internal");
        assert_eq!(cfg.storage.replica.host, "db-replica.internal");
    }
}
