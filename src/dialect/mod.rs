//! Catalog dialect definitions.
//!
//! Each supported engine implements [`CatalogDialect`] to describe how its
//! catalog is read and how its type vocabulary maps onto [`ColumnKind`]:
//!
//! - Catalog SQL for the bulk column listing and the foreign-key listing,
//!   written with the engine's placeholder syntax (`?` vs `$1`)
//! - The known-type table consumed by the type mapper
//! - Administrative tables excluded by default
//! - Default port and namespace
//!
//! The table builder, relationship resolver and assembler never look at the
//! dialect directly; they work on the normalized rows produced by the catalog
//! reader.
//!
//! # Usage
//!
//! ```ignore
//! use schema_introspect::dialect::Dialect;
//!
//! let dialect = Dialect::Postgres;
//! let sql = dialect.catalog().columns_query(false);
//! ```
//!
//! [`ColumnKind`]: crate::schema::ColumnKind

mod mysql;
mod postgres;

pub use mysql::MySql;
pub use postgres::Postgres;

use serde::{Deserialize, Serialize};

use crate::schema::TypeEntry;

/// Catalog dialect trait - describes how one engine exposes its catalog.
pub trait CatalogDialect: std::fmt::Debug + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Port used when the configuration does not name one.
    fn default_port(&self) -> u16;

    /// Namespace introspected when the configuration does not name one.
    ///
    /// `None` means the database name itself is the namespace.
    fn default_namespace(&self) -> Option<&'static str> {
        None
    }

    /// SQL listing every column of every table in a namespace.
    ///
    /// Binds the namespace as the first parameter and, when `filter_table`
    /// is set, the table name as the second. Rows are ordered by table name
    /// then ordinal position and carry the normalized column aliases
    /// (`table_name`, `column_name`, `ordinal_position`, `data_type`,
    /// `character_maximum_length`, `numeric_precision`, `numeric_scale`,
    /// `is_nullable`, `column_default`, `constraint_type`, `extra`).
    fn columns_query(&self, filter_table: bool) -> String;

    /// SQL listing every foreign-key column pair in a namespace.
    ///
    /// Binds the namespace as the only parameter. Rows carry `constraint_name`,
    /// `table_name`, `column_name`, `foreign_table_name`, `foreign_column_name`.
    fn foreign_keys_query(&self) -> String;

    /// Known type tokens, looked up by the type mapper.
    fn type_table(&self) -> &'static [TypeEntry];

    /// Normalize a `column_default` value as the catalog reports it.
    ///
    /// `None` means the column has no default.
    fn normalize_default(&self, raw: String) -> Option<String> {
        Some(raw)
    }

    /// Table names excluded unless the caller opts out.
    fn default_excluded_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Table name prefixes excluded unless the caller opts out.
    fn default_excluded_prefixes(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Supported catalog dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    MySql,
    Postgres,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn catalog(&self) -> &'static dyn CatalogDialect {
        match self {
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
        }
    }

    /// Dialect name for display/logging.
    pub fn name(&self) -> &'static str {
        self.catalog().name()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
