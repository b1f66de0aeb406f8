//! MySQL catalog dialect.
//!
//! MySQL catalog differences:
//! - `information_schema.COLUMNS.COLUMN_TYPE` keeps display widths, which is
//!   the only way to tell `tinyint(1)` (boolean) from other tiny integers
//! - `COLUMN_KEY` carries `PRI` / `UNI` / `MUL` directly on the column row
//! - `EXTRA` reports `auto_increment`
//! - Foreign keys live in `KEY_COLUMN_USAGE` with `REFERENCED_*` columns
//! - A database is the namespace; there is no schema level below it
//! - MariaDB returns a missing default as the text `NULL` and quotes string
//!   defaults (`'active'`)

use super::CatalogDialect;
use crate::schema::{ColumnKind, Refinement, TypeEntry};

/// MySQL catalog dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

static MYSQL_TYPES: &[TypeEntry] = &[
    TypeEntry::new("varchar", ColumnKind::Text, Refinement::Length),
    TypeEntry::new("char", ColumnKind::Text, Refinement::Length),
    TypeEntry::new("tinytext", ColumnKind::Text, Refinement::None),
    TypeEntry::new("text", ColumnKind::Text, Refinement::None),
    TypeEntry::new("mediumtext", ColumnKind::LongText, Refinement::None),
    TypeEntry::new("longtext", ColumnKind::LongText, Refinement::None),
    TypeEntry::new("tinyint(1)", ColumnKind::Boolean, Refinement::None),
    TypeEntry::new("boolean", ColumnKind::Boolean, Refinement::None),
    TypeEntry::new("bool", ColumnKind::Boolean, Refinement::None),
    TypeEntry::new("tinyint", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("smallint", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("mediumint", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("int", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("integer", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("bigint", ColumnKind::Integer, Refinement::Precision),
    TypeEntry::new("decimal", ColumnKind::Decimal, Refinement::PrecisionScale),
    TypeEntry::new("numeric", ColumnKind::Decimal, Refinement::PrecisionScale),
    TypeEntry::new("float", ColumnKind::Float, Refinement::None),
    TypeEntry::new("double", ColumnKind::Float, Refinement::None),
    TypeEntry::new("double precision", ColumnKind::Float, Refinement::None),
    TypeEntry::new("real", ColumnKind::Float, Refinement::None),
    TypeEntry::new("json", ColumnKind::Json, Refinement::None),
    TypeEntry::new("date", ColumnKind::Date, Refinement::None),
    TypeEntry::new("datetime", ColumnKind::DateTime, Refinement::None),
    TypeEntry::new("time", ColumnKind::Time, Refinement::None),
    TypeEntry::new("timestamp", ColumnKind::Timestamp, Refinement::None),
    TypeEntry::new("year", ColumnKind::Year, Refinement::None),
    TypeEntry::new("binary", ColumnKind::Binary, Refinement::Length),
    TypeEntry::new("varbinary", ColumnKind::Binary, Refinement::Length),
    TypeEntry::new("tinyblob", ColumnKind::Binary, Refinement::None),
    TypeEntry::new("blob", ColumnKind::Binary, Refinement::None),
    TypeEntry::new("mediumblob", ColumnKind::Binary, Refinement::None),
    TypeEntry::new("longblob", ColumnKind::Binary, Refinement::None),
];

impl CatalogDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn default_port(&self) -> u16 {
        3306
    }

    fn columns_query(&self, filter_table: bool) -> String {
        let mut sql = String::from(
            "SELECT \
                TABLE_NAME AS table_name, \
                COLUMN_NAME AS column_name, \
                ORDINAL_POSITION AS ordinal_position, \
                COLUMN_TYPE AS data_type, \
                CHARACTER_MAXIMUM_LENGTH AS character_maximum_length, \
                NUMERIC_PRECISION AS numeric_precision, \
                NUMERIC_SCALE AS numeric_scale, \
                IS_NULLABLE AS is_nullable, \
                COLUMN_DEFAULT AS column_default, \
                COLUMN_KEY AS constraint_type, \
                EXTRA AS extra \
            FROM information_schema.COLUMNS \
            WHERE TABLE_SCHEMA = ?",
        );
        if filter_table {
            sql.push_str(" AND TABLE_NAME = ?");
        }
        sql.push_str(" ORDER BY TABLE_NAME ASC, ORDINAL_POSITION ASC");
        sql
    }

    fn foreign_keys_query(&self) -> String {
        "SELECT \
            CONSTRAINT_NAME AS constraint_name, \
            TABLE_NAME AS table_name, \
            COLUMN_NAME AS column_name, \
            REFERENCED_TABLE_NAME AS foreign_table_name, \
            REFERENCED_COLUMN_NAME AS foreign_column_name \
        FROM information_schema.KEY_COLUMN_USAGE \
        WHERE TABLE_SCHEMA = ? \
            AND REFERENCED_TABLE_NAME IS NOT NULL \
            AND REFERENCED_TABLE_SCHEMA = TABLE_SCHEMA \
        ORDER BY TABLE_NAME ASC, CONSTRAINT_NAME ASC, ORDINAL_POSITION ASC"
            .to_string()
    }

    fn type_table(&self) -> &'static [TypeEntry] {
        MYSQL_TYPES
    }

    fn default_excluded_prefixes(&self) -> &'static [&'static str] {
        // phpMyAdmin configuration storage
        &["pma__"]
    }

    fn normalize_default(&self, raw: String) -> Option<String> {
        // MariaDB reports "no default" as the bare text NULL and quotes
        // string literals, doubling any embedded quote.
        if raw == "NULL" {
            return None;
        }
        match raw.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
            Some(inner) => Some(inner.replace("''", "'")),
            None => Some(raw),
        }
    }
}
