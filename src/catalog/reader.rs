//! Catalog reader traits.

use super::error::CatalogResult;
use super::rows::QueryRows;
use super::types::{CatalogColumn, ForeignKeyEdge};
use crate::schema::ExclusionSet;

/// Restricts which tables a column listing returns.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Tables never returned.
    pub exclusions: ExclusionSet,
    /// Only return this table, when set.
    pub table: Option<String>,
}

impl CatalogFilter {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            table: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Whether rows of `table` pass the filter.
    pub fn admits(&self, table: &str) -> bool {
        if self.exclusions.contains(table) {
            return false;
        }
        self.table.as_deref().map_or(true, |only| only == table)
    }
}

/// Reads raw column and foreign-key rows from a catalog.
///
/// Column rows come back ordered by table name then ordinal position.
/// Both calls are single round trips; any failure aborts the extraction.
pub trait CatalogReader {
    /// List column rows for every admitted table.
    fn list_columns(&self, filter: &CatalogFilter) -> CatalogResult<Vec<CatalogColumn>>;

    /// List every foreign-key column pair in the namespace.
    fn list_foreign_keys(&self) -> CatalogResult<Vec<ForeignKeyEdge>>;
}

/// Runs one SQL statement with positional arguments and returns its rows.
///
/// This is the only thing the extraction needs from a database connection.
pub trait QueryRunner {
    fn query(&self, sql: &str, args: &[serde_json::Value]) -> CatalogResult<QueryRows>;
}

impl<R: QueryRunner + ?Sized> QueryRunner for &R {
    fn query(&self, sql: &str, args: &[serde_json::Value]) -> CatalogResult<QueryRows> {
        (**self).query(sql, args)
    }
}

impl<R: QueryRunner + ?Sized> QueryRunner for Box<R> {
    fn query(&self, sql: &str, args: &[serde_json::Value]) -> CatalogResult<QueryRows> {
        (**self).query(sql, args)
    }
}
