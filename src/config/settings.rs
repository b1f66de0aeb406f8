//! TOML-based configuration for schema-introspect.
//!
//! Supports a config file (introspect.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connections.default]
//! db_type = "postgres"
//! host = "${DATABASE_HOST}"
//! user = "app"
//! password = "${DATABASE_PASSWORD}"
//! database = "shop"
//! schema = "public"
//!
//! [introspection]
//! exclude = ["internal_cache"]
//! exclude_prefixes = ["tmp_"]
//! singularize_belongs_to = false
//!
//! [worker]
//! path = "./db-worker"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::{ConnectionConfig, ConnectionError, Driver};
use crate::dialect::Dialect;
use crate::introspect::ExtractOptions;
use crate::schema::{ExclusionSet, NamingOptions};

/// Name of the config file searched in the working directory.
pub const CONFIG_FILE_NAME: &str = "introspect.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named database connections.
    pub connections: BTreeMap<String, ConnectionSettings>,

    /// Extraction behaviour.
    pub introspection: IntrospectionSettings,

    /// Worker configuration.
    pub worker: WorkerSettings,
}

/// Connection configuration as written in the config file.
///
/// String fields support `${ENV_VAR}` expansion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSettings {
    /// Database driver (mysql, postgres).
    pub db_type: String,

    pub host: String,

    pub user: String,

    #[serde(default)]
    pub password: String,

    pub database: String,

    #[serde(default)]
    pub port: Option<u16>,

    /// Postgres namespace.
    #[serde(default)]
    pub schema: Option<String>,
}

impl ConnectionSettings {
    /// Get the driver type.
    pub fn driver_type(&self) -> Result<Driver, SettingsError> {
        Ok(Driver::from_str(&self.db_type)?)
    }

    /// Resolve into a validated [`ConnectionConfig`], expanding environment variables.
    pub fn to_config(&self) -> Result<ConnectionConfig, SettingsError> {
        let config = ConnectionConfig {
            driver: self.driver_type()?,
            host: expand_env_vars(&self.host)?,
            user: expand_env_vars(&self.user)?,
            password: expand_env_vars(&self.password)?,
            database: expand_env_vars(&self.database)?,
            port: self.port,
            schema: match &self.schema {
                Some(schema) => Some(expand_env_vars(schema)?),
                None => None,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Extraction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntrospectionSettings {
    /// Table names removed from the schema.
    pub exclude: Vec<String>,

    /// Table name prefixes removed from the schema.
    pub exclude_prefixes: Vec<String>,

    /// Keep the dialect's administrative tables out of the schema.
    pub include_default_exclusions: bool,

    /// Singularize belongs-to field names after stripping `_id`.
    pub singularize_belongs_to: bool,
}

impl Default for IntrospectionSettings {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            exclude_prefixes: Vec::new(),
            include_default_exclusions: true,
            singularize_belongs_to: false,
        }
    }
}

impl IntrospectionSettings {
    /// Build extraction options for a dialect.
    pub fn to_options(&self, dialect: Dialect) -> ExtractOptions {
        let mut exclusions = if self.include_default_exclusions {
            ExclusionSet::for_dialect(dialect)
        } else {
            ExclusionSet::default()
        };
        for name in &self.exclude {
            exclusions.insert_name(name);
        }
        for prefix in &self.exclude_prefixes {
            exclusions.insert_prefix(prefix);
        }

        ExtractOptions {
            exclusions,
            naming: NamingOptions {
                singularize_belongs_to: self.singularize_belongs_to,
            },
        }
    }
}

/// Worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to worker binary.
    pub path: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Extra command-line arguments for the worker.
    pub args: Vec<String>,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            path: None,
            timeout_secs: 30,
            args: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `INTROSPECT_CONFIG`
    /// 2. `./introspect.toml`
    /// 3. `~/.config/schema-introspect/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("INTROSPECT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schema-introspect").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Get a connection by name.
    pub fn get_connection(&self, name: &str) -> Result<&ConnectionSettings, SettingsError> {
        self.connections
            .get(name)
            .ok_or_else(|| SettingsError::ConnectionNotFound(name.to_string()))
    }

    /// Get the default connection (`default` if it exists, else the first by name).
    pub fn default_connection(&self) -> Option<(&str, &ConnectionSettings)> {
        if let Some(conn) = self.connections.get("default") {
            return Some(("default", conn));
        }
        self.connections.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    /// Get the worker binary path.
    ///
    /// Returns the configured path, or searches common locations and `PATH`.
    /// A configured path that names an unset variable is an error.
    pub fn worker_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        if let Some(path) = &self.worker.path {
            let expanded = expand_env_vars(path)?;
            return Ok(Some(PathBuf::from(expanded)));
        }

        let candidates = ["db-worker", "./db-worker", "./worker/db-worker"];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Ok(output) = std::process::Command::new("which").arg("db-worker").output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Ok(Some(PathBuf::from(path)));
                }
            }
        }

        Ok(None)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept as-is.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    var_name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if var_name.is_empty() {
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
