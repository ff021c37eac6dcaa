use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, env, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Reads and validates the process environment. Call
    /// [`env::load_dotenv`] first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(env::app_environment())
    }

    fn from_environment(source: ::config::Environment) -> Result<Self> {
        let cfg: Self = env::deserialize(source)?;
        validate::validate(&cfg)?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Single-connection in-memory SQLite, used by tests and local experiments.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_idle: 1,
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_DATABASE_URL.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE,
            connect_timeout_secs: defaults::DEFAULT_DB_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::AppConfig;
    use crate::config::env::app_environment;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_environment(app_environment().source(Some(vars)))
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = load(&[]).expect("defaults should load");

        assert_eq!(cfg.general.host, "0.0.0.0");
        assert_eq!(cfg.general.port, 8080);
        assert_eq!(cfg.database.url, "sqlite://todos.db?mode=rwc");
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn nested_keys_override_defaults() {
        let cfg = load(&[
            ("APP_GENERAL__PORT", "9090"),
            ("APP_DATABASE__URL", "postgres://localhost/todos"),
            ("APP_DATABASE__MIN_IDLE", "0"),
        ])
        .expect("overrides should load");

        assert_eq!(cfg.general.port, 9090);
        assert_eq!(cfg.database.url, "postgres://localhost/todos");
        assert_eq!(cfg.database.min_idle, 0);
        assert_eq!(cfg.database.max_connections, 10);
    }

    #[test]
    fn invalid_values_are_rejected_after_loading() {
        let err = load(&[
            ("APP_DATABASE__MAX_CONNECTIONS", "0"),
            ("APP_DATABASE__MIN_IDLE", "0"),
        ])
        .expect_err("zero connections should be rejected");

        assert!(format!("{err:?}").contains("database.max_connections must be > 0"));
    }
}
