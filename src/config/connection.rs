//! Database connection configuration.
//!
//! Supports configuration via environment variables:
//! - `DATABASE_TYPE`: Database driver (mysql, postgres)
//! - `DATABASE_HOST`: Database server hostname
//! - `DATABASE_USER`: Username
//! - `DATABASE_PASSWORD`: Password
//! - `DATABASE_NAME`: Database name
//! - `DATABASE_PORT`: Port (optional, uses driver default)
//! - `DATABASE_SCHEMA`: Namespace to introspect (optional, Postgres only)

use std::env;

use crate::dialect::Dialect;

/// Error type for connection configuration.
///
/// Every variant is raised before any network I/O takes place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing or invalid field: {0}")]
    MissingField(&'static str),

    #[error("No adapter was found for database {0}. Supported: mysql, postgres")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    /// MySQL / MariaDB
    MySql,
    /// PostgreSQL
    Postgres,
}

impl Driver {
    /// Parse driver from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConnectionError> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Driver::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Driver::Postgres),
            other => Err(ConnectionError::UnsupportedDriver(other.to_string())),
        }
    }

    /// Get the driver name for the worker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::MySql => "mysql",
            Driver::Postgres => "postgres",
        }
    }

    /// The catalog dialect spoken by this driver.
    pub fn dialect(&self) -> Dialect {
        match self {
            Driver::MySql => Dialect::MySql,
            Driver::Postgres => Dialect::Postgres,
        }
    }

    /// Get the default port for this driver.
    pub fn default_port(&self) -> u16 {
        self.dialect().catalog().default_port()
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    /// Database driver.
    pub driver: Driver,
    /// Server hostname.
    pub host: String,
    /// Username.
    pub user: String,
    /// Password (may be empty).
    pub password: String,
    /// Database name.
    pub database: String,
    /// Port (optional, defaults per driver).
    pub port: Option<u16>,
    /// Namespace to introspect (Postgres only).
    pub schema: Option<String>,
}

impl ConnectionConfig {
    /// Create a new connection config.
    pub fn new(
        driver: Driver,
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
            port: None,
            schema: None,
        }
    }

    /// Set an explicit port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the namespace to introspect.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_TYPE`: mysql or postgres
    /// - `DATABASE_HOST`, `DATABASE_USER`, `DATABASE_NAME`
    ///
    /// Optional:
    /// - `DATABASE_PASSWORD`: defaults to empty
    /// - `DATABASE_PORT`: Server port
    /// - `DATABASE_SCHEMA`: Postgres namespace
    ///
    /// The resulting config is validated before it is returned.
    pub fn from_env() -> Result<Self, ConnectionError> {
        let driver_str = required_env("DATABASE_TYPE")?;
        let driver = Driver::from_str(&driver_str)?;

        let port = match env::var("DATABASE_PORT") {
            Ok(p) => Some(p.trim().parse().map_err(|_| {
                ConnectionError::InvalidConfig(format!("DATABASE_PORT is not a port: {}", p))
            })?),
            Err(_) => None,
        };

        let config = Self {
            driver,
            host: required_env("DATABASE_HOST")?,
            user: required_env("DATABASE_USER")?,
            password: env::var("DATABASE_PASSWORD").unwrap_or_default(),
            database: required_env("DATABASE_NAME")?,
            port,
            schema: env::var("DATABASE_SCHEMA").ok().filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the required fields.
    ///
    /// A missing database name is always fatal; it is checked before any
    /// connection attempt is made.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.database.trim().is_empty() {
            return Err(ConnectionError::MissingField("database"));
        }
        if self.host.trim().is_empty() {
            return Err(ConnectionError::MissingField("host"));
        }
        if self.user.trim().is_empty() {
            return Err(ConnectionError::MissingField("user"));
        }
        if self.port == Some(0) {
            return Err(ConnectionError::InvalidConfig("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Port to connect to, falling back to the driver default.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.driver.default_port())
    }

    /// Namespace whose tables are introspected.
    ///
    /// MySQL has no namespace below the database, so the database name is used.
    pub fn effective_schema(&self) -> String {
        match (&self.schema, self.driver) {
            (Some(schema), _) => schema.clone(),
            (None, Driver::MySql) => self.database.clone(),
            (None, Driver::Postgres) => self
                .driver
                .dialect()
                .catalog()
                .default_namespace()
                .unwrap_or("public")
                .to_string(),
        }
    }

    /// Build the connection string for the worker.
    pub fn to_connection_string(&self) -> String {
        match self.driver {
            Driver::MySql => self.build_mysql_connection_string(),
            Driver::Postgres => self.build_postgres_connection_string(),
        }
    }

    fn build_mysql_connection_string(&self) -> String {
        format!(
            "{}:{}@tcp({}:{})/{}",
            self.user,
            self.password,
            self.host,
            self.effective_port(),
            self.database
        )
    }

    fn build_postgres_connection_string(&self) -> String {
        let mut conn = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password,
            self.host,
            self.effective_port(),
            self.database
        );
        if let Some(schema) = &self.schema {
            conn.push_str(&format!("?search_path={}", schema));
        }
        conn
    }

    /// Get the driver name for the worker.
    pub fn driver_name(&self) -> &'static str {
        self.driver.as_str()
    }
}

fn required_env(name: &str) -> Result<String, ConnectionError> {
    env::var(name).map_err(|_| ConnectionError::MissingEnvVar(name.to_string()))
}
