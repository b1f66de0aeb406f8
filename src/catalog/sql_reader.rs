//! Catalog reader that issues dialect SQL through a [`QueryRunner`].

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use super::error::CatalogResult;
use super::reader::{CatalogFilter, CatalogReader, QueryRunner};
use super::rows::Record;
use super::types::{CatalogColumn, ConstraintKind, ForeignKeyEdge};
use crate::dialect::Dialect;

/// Reads the catalog with one bulk query per listing.
#[derive(Debug)]
pub struct SqlCatalogReader<R> {
    runner: R,
    dialect: Dialect,
    namespace: String,
}

impl<R: QueryRunner> SqlCatalogReader<R> {
    /// Create a reader for one namespace (MySQL database or Postgres schema).
    pub fn new(runner: R, dialect: Dialect, namespace: impl Into<String>) -> Self {
        Self {
            runner,
            dialect,
            namespace: namespace.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn decode_column(&self, record: &Record<'_>) -> CatalogResult<CatalogColumn> {
        Ok(CatalogColumn {
            table_name: record.str("table_name")?,
            column_name: record.str("column_name")?,
            ordinal_position: record.u32("ordinal_position")?,
            data_type: record.str("data_type")?,
            character_maximum_length: record.opt_u32("character_maximum_length")?,
            numeric_precision: record.opt_u32("numeric_precision")?,
            numeric_scale: record.opt_u32("numeric_scale")?,
            is_nullable: record.flag("is_nullable", true)?,
            column_default: record
                .opt_str("column_default")?
                .and_then(|raw| self.dialect.catalog().normalize_default(raw)),
            constraint: record
                .opt_str("constraint_type")?
                .map(|tag| ConstraintKind::from_tag(&tag))
                .unwrap_or_default(),
            extra: record.opt_str("extra")?.filter(|e| !e.is_empty()),
        })
    }

    fn decode_edge(record: &Record<'_>) -> CatalogResult<ForeignKeyEdge> {
        Ok(ForeignKeyEdge {
            from_table: record.str("table_name")?,
            from_column: record.str("column_name")?,
            to_table: record.str("foreign_table_name")?,
            to_column: record.str("foreign_column_name")?,
            constraint_name: record.opt_str("constraint_name")?,
        })
    }
}

impl<R: QueryRunner> CatalogReader for SqlCatalogReader<R> {
    fn list_columns(&self, filter: &CatalogFilter) -> CatalogResult<Vec<CatalogColumn>> {
        let start = Instant::now();
        let sql = self.dialect.catalog().columns_query(filter.table.is_some());

        let mut args = vec![Value::String(self.namespace.clone())];
        if let Some(table) = &filter.table {
            args.push(Value::String(table.clone()));
        }

        let rows = self.runner.query(&sql, &args)?;

        let mut columns = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for record in rows.records() {
            let column = self.decode_column(&record)?;
            if filter.admits(&column.table_name) {
                columns.push(column);
            } else {
                skipped += 1;
            }
        }

        debug!(
            dialect = %self.dialect,
            namespace = %self.namespace,
            rows = columns.len(),
            skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "listed catalog columns"
        );
        Ok(columns)
    }

    fn list_foreign_keys(&self) -> CatalogResult<Vec<ForeignKeyEdge>> {
        let start = Instant::now();
        let sql = self.dialect.catalog().foreign_keys_query();
        let rows = self
            .runner
            .query(&sql, &[Value::String(self.namespace.clone())])?;

        let edges = rows
            .records()
            .map(|record| Self::decode_edge(&record))
            .collect::<CatalogResult<Vec<_>>>()?;

        debug!(
            dialect = %self.dialect,
            namespace = %self.namespace,
            edges = edges.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "listed foreign keys"
        );
        Ok(edges)
    }
}
