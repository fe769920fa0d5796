//! Layered server configuration.
//!
//! Sources, lowest priority first:
//! 1. compiled defaults
//! 2. the YAML file given by `--config` (default `config/hostel.yaml`)
//! 3. `HOSTEL__`-prefixed environment variables, `__` separating nested keys

use std::path::Path;

use anyhow::Context;
use complaints::ComplaintsConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use static_authn_plugin::StaticAuthNPluginConfig;

pub const ENV_PREFIX: &str = "HOSTEL__";
pub const DEFAULT_CONFIG_PATH: &str = "config/hostel.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    /// Identity provider stand-in.
    pub authn: StaticAuthNPluginConfig,
    pub complaints: ComplaintsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub cors_enabled: bool,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_owned(),
            cors_enabled: false,
            request_timeout_secs: 30,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `sqlite://...` or `postgres://...`.
    pub dsn: String,
    pub max_conns: u32,
    pub min_conns: u32,
    pub connect_timeout_secs: u64,
    /// How long a SQLite connection waits on a locked database before
    /// failing. Ignored for Postgres.
    pub busy_timeout_ms: u64,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://hostel.db?mode=rwc".to_owned(),
            max_conns: 8,
            min_conns: 1,
            connect_timeout_secs: 10,
            busy_timeout_ms: 5000,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit one JSON object per line instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Merge defaults, the YAML file and the environment.
    ///
    /// An explicitly requested file must exist; the default path is optional.
    ///
    /// # Errors
    /// Returns an error if an explicit file is missing or any source fails to
    /// parse into the expected shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match path {
            Some(p) => {
                anyhow::ensure!(p.exists(), "config file not found: {}", p.display());
                figment = figment.merge(Yaml::file_exact(p));
            }
            None => {
                if Path::new(DEFAULT_CONFIG_PATH).exists() {
                    figment = figment.merge(Yaml::file_exact(DEFAULT_CONFIG_PATH));
                }
            }
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }
}
