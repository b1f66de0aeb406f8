//! Configuration module for schema-introspect.
//!
//! Handles connection configuration, environment variables, and settings.

mod connection;
mod settings;

pub use connection::{ConnectionConfig, ConnectionError, Driver};
pub use settings::{
    expand_env_vars, ConnectionSettings, IntrospectionSettings, Settings, SettingsError,
    WorkerSettings, CONFIG_FILE_NAME,
};
