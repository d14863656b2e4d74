use std::env;
use std::fmt;
use std::str::FromStr;

use sqlx::ConnectOptions;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::sqlite::SqliteConnectOptions;

use crate::core::{LoaderError, Result};

/// Database backend selected by `DB_DRIVER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    MySql,
    Sqlite,
}

impl FromStr for Driver {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(LoaderError::Config(format!(
                "Unsupported DB_DRIVER '{}' (expected 'mysql' or 'sqlite')",
                other
            ))),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MySql => write!(f, "mysql"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Database connection configuration
///
/// Assembled once at startup from `DB_*` environment variables.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Backend driver
    pub driver: Driver,

    /// Database host (MySQL only)
    pub host: String,

    /// Database port (MySQL only)
    pub port: u16,

    /// Database name, or the database file path for SQLite
    pub database: String,

    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

impl ConnectionConfig {
    /// Create a new MySQL connection configuration
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            driver: Driver::MySql,
            host: "localhost".to_string(),
            port: 3306,
            database: String::new(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Configuration for a SQLite database file (or `:memory:`)
    pub fn sqlite(path: &str) -> Self {
        Self {
            driver: Driver::Sqlite,
            host: String::new(),
            port: 0,
            database: path.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }

    /// Set the database name
    pub fn database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Set the host
    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present;
    /// variables already set in the environment take precedence.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| LoaderError::Config(format!("{} is not set", key)))
        };

        let driver = match lookup("DB_DRIVER") {
            Some(raw) if !raw.is_empty() => raw.parse()?,
            _ => Driver::MySql,
        };

        let config = match driver {
            Driver::Sqlite => Self::sqlite(&require("DB_NAME")?),
            Driver::MySql => {
                let port_raw = require("DB_PORT")?;
                let port = port_raw.parse::<u16>().map_err(|_| {
                    LoaderError::Config(format!("DB_PORT must be a valid port, got '{}'", port_raw))
                })?;

                // Passwordless accounts are valid
                let password = lookup("DB_PASSWORD").unwrap_or_default();

                Self::new(&require("DB_USERNAME")?, &password)
                    .host(&require("DB_HOST")?)
                    .port(port)
                    .database(&require("DB_NAME")?)
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Connection URL understood by the sqlx `Any` driver.
    ///
    /// Contains the password; use [`redacted_url`](Self::redacted_url) for logs.
    pub fn to_url(&self) -> String {
        match self.driver {
            Driver::MySql => {
                let mut options = MySqlConnectOptions::new()
                    .host(&self.host)
                    .port(self.port)
                    .username(&self.username)
                    .database(&self.database);
                if !self.password.is_empty() {
                    options = options.password(&self.password);
                }
                options.to_url_lossy().to_string()
            }
            Driver::Sqlite if self.database == ":memory:" => "sqlite::memory:".to_string(),
            Driver::Sqlite => SqliteConnectOptions::new()
                .filename(&self.database)
                .create_if_missing(true)
                .to_url_lossy()
                .to_string(),
        }
    }

    /// Connection string safe to print
    pub fn redacted_url(&self) -> String {
        match self.driver {
            Driver::MySql => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.username,
                "***", // Don't expose password
                self.host,
                self.port,
                self.database
            ),
            Driver::Sqlite => format!("sqlite://{}", self.database),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.is_empty() {
            return Err(LoaderError::Config("Database name cannot be empty".into()));
        }

        if self.driver == Driver::Sqlite {
            return Ok(());
        }

        if self.username.is_empty() {
            return Err(LoaderError::Config("Username cannot be empty".into()));
        }

        if self.host.is_empty() {
            return Err(LoaderError::Config("Host cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(LoaderError::Config("Port must be > 0".into()));
        }

        Ok(())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("driver", &self.driver)
            .field("url", &self.redacted_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn mysql_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DB_USERNAME", "loader"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "3307"),
            ("DB_NAME", "referensi"),
        ]
    }

    #[test]
    fn test_builder_pattern() {
        let config = ConnectionConfig::new("user", "pass")
            .host("example.com")
            .port(3306)
            .database("mydb");

        assert_eq!(config.driver, Driver::MySql);
        assert_eq!(config.host, "example.com");
        assert_eq!(config.port, 3306);
        assert_eq!(config.database, "mydb");
    }

    #[test]
    fn test_from_lookup_mysql() {
        let config = ConnectionConfig::from_lookup(lookup_from(&mysql_env())).unwrap();

        assert_eq!(config.driver, Driver::MySql);
        assert_eq!(config.username, "loader");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.database, "referensi");
    }

    #[test]
    fn test_from_lookup_missing_variable() {
        let mut env = mysql_env();
        env.retain(|(k, _)| *k != "DB_HOST");

        let err = ConnectionConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, LoaderError::Config(ref msg) if msg.contains("DB_HOST")));
    }

    #[test]
    fn test_from_lookup_invalid_port() {
        let mut env = mysql_env();
        env.retain(|(k, _)| *k != "DB_PORT");
        env.push(("DB_PORT", "not-a-port"));

        let err = ConnectionConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
    }

    #[test]
    fn test_from_lookup_sqlite_needs_only_name() {
        let config = ConnectionConfig::from_lookup(lookup_from(&[
            ("DB_DRIVER", "sqlite"),
            ("DB_NAME", ":memory:"),
        ]))
        .unwrap();

        assert_eq!(config.driver, Driver::Sqlite);
        assert_eq!(config.to_url(), "sqlite::memory:");
    }

    #[test]
    fn test_unknown_driver() {
        let err = ConnectionConfig::from_lookup(lookup_from(&[
            ("DB_DRIVER", "oracle"),
            ("DB_NAME", "x"),
        ]))
        .unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
    }

    #[test]
    fn test_mysql_url_carries_credentials() {
        let config = ConnectionConfig::from_lookup(lookup_from(&mysql_env())).unwrap();
        let url = config.to_url();

        assert!(url.starts_with("mysql://"));
        for part in ["loader", "s3cret", "db.internal", "3307", "referensi"] {
            assert!(url.contains(part), "{} missing from {}", part, url);
        }
    }

    #[test]
    fn test_from_lookup_empty_password() {
        let mut env = mysql_env();
        env.retain(|(k, _)| *k != "DB_PASSWORD");
        env.push(("DB_PASSWORD", ""));

        let config = ConnectionConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.password, "");

        let url = config.to_url();
        assert!(url.contains("loader@db.internal"), "{}", url);
    }

    #[test]
    fn test_from_lookup_unset_password() {
        let mut env = mysql_env();
        env.retain(|(k, _)| *k != "DB_PASSWORD");

        let config = ConnectionConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.password, "");
    }

    #[test]
    fn test_sqlite_url_encodes_path() {
        let config = ConnectionConfig::sqlite("/data/odd ?#%name.db");
        let url = config.to_url();

        assert!(url.starts_with("sqlite://"));
        assert!(!url.contains("odd ?#%name"), "{}", url);
        assert!(url.contains("mode=rwc"), "{}", url);
    }

    #[test]
    fn test_redacted_url_hides_password() {
        let config = ConnectionConfig::new("alice", "secret123")
            .host("example.com")
            .database("mydb");

        let url = config.redacted_url();
        assert!(!url.contains("secret123"));
        assert!(url.contains("***"));
        assert!(!format!("{:?}", config).contains("secret123"));
    }

    #[test]
    fn test_validate() {
        assert!(ConnectionConfig::new("user", "pass").database("db").validate().is_ok());
        assert!(ConnectionConfig::new("", "pass").database("db").validate().is_err());
        assert!(ConnectionConfig::new("user", "pass").validate().is_err());
        assert!(ConnectionConfig::sqlite("data.db").validate().is_ok());
    }
}
