use serde::Deserialize;

use std::{
    fmt,
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};

use crate::readiness::RetryPolicy;

/// Which [`NoteStore`](crate::repository::NoteStore) the server runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Server configuration, read from environment variables.
///
/// Field names map to upper-case variables (`db_host` is `DB_HOST`) and
/// every field has a default, so an empty environment is valid.
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_user")]
    pub db_user: String,
    #[serde(default = "default_db_password")]
    pub db_password: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_db_pool_size")]
    pub db_pool_size: usize,
    #[serde(default = "default_db_connect_timeout", with = "humantime_serde")]
    pub db_connect_timeout: Duration,
    #[serde(default = "default_db_connect_retries")]
    pub db_connect_retries: u32,
    #[serde(default = "default_db_retry_interval", with = "humantime_serde")]
    pub db_retry_interval: Duration,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
    #[serde(default)]
    pub store_backend: StoreBackend,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_db_host() -> String {
    "db".to_string()
}

const fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "notesuser".to_string()
}

fn default_db_password() -> String {
    "notespass".to_string()
}

fn default_db_name() -> String {
    "notesdb".to_string()
}

const fn default_db_pool_size() -> usize {
    10
}

const fn default_db_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

const fn default_db_connect_retries() -> u32 {
    10
}

const fn default_db_retry_interval() -> Duration {
    Duration::from_secs(3)
}

const fn default_run_migrations() -> bool {
    true
}

const fn default_port() -> u16 {
    5000
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn pg_config(&self) -> tokio_postgres::Config {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.db_host)
            .port(self.db_port)
            .user(&self.db_user)
            .password(&self.db_password)
            .dbname(&self.db_name)
            .connect_timeout(self.db_connect_timeout);
        pg
    }

    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.db_connect_retries, self.db_retry_interval)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("db_pool_size", &self.db_pool_size)
            .field("db_connect_timeout", &self.db_connect_timeout)
            .field("db_connect_retries", &self.db_connect_retries)
            .field("db_retry_interval", &self.db_retry_interval)
            .field("run_migrations", &self.run_migrations)
            .field("store_backend", &self.store_backend)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(cfg.db_host, "db");
        assert_eq!(cfg.db_port, 5432);
        assert_eq!(cfg.db_user, "notesuser");
        assert_eq!(cfg.db_password, "notespass");
        assert_eq!(cfg.db_name, "notesdb");
        assert_eq!(cfg.db_pool_size, 10);
        assert_eq!(cfg.db_connect_retries, 10);
        assert_eq!(cfg.db_retry_interval, Duration::from_secs(3));
        assert!(cfg.run_migrations);
        assert_eq!(cfg.store_backend, StoreBackend::Postgres);
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = Config::from_vars(vars(&[
            ("DB_HOST", "localhost"),
            ("DB_USER", "alice"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "scratch"),
            ("DB_RETRY_INTERVAL", "500ms"),
            ("DB_CONNECT_RETRIES", "3"),
            ("RUN_MIGRATIONS", "false"),
            ("STORE_BACKEND", "memory"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(cfg.db_host, "localhost");
        assert_eq!(cfg.db_user, "alice");
        assert_eq!(cfg.db_password, "hunter2");
        assert_eq!(cfg.db_name, "scratch");
        assert!(!cfg.run_migrations);
        assert_eq!(cfg.store_backend, StoreBackend::Memory);
        assert_eq!(cfg.listen_addr().port(), 8080);

        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.interval, Duration::from_millis(500));
    }

    #[test]
    fn malformed_port_is_rejected() {
        assert!(Config::from_vars(vars(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = Config::from_vars(vars(&[("DB_PASSWORD", "hunter2")])).unwrap();
        let printed = format!("{cfg:?}");

        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
