//! Table builder.
//!
//! Turns the sorted column stream into [`TableDescriptor`]s. The stream is
//! ordered by table name then ordinal position, so tables are contiguous
//! runs found with one linear scan.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::type_mapper::map_type;
use super::types::{ColumnDescriptor, TableDescriptor};
use crate::catalog::CatalogColumn;
use crate::dialect::Dialect;

/// Build one column descriptor from a catalog row.
pub fn build_column(column: &CatalogColumn, dialect: Dialect) -> ColumnDescriptor {
    let mapped = map_type(dialect, &column.data_type, column);
    let default_value = column.default_literal().map(str::to_string);

    ColumnDescriptor {
        name: column.column_name.clone(),
        position: column.ordinal_position,
        data_type: column.data_type.clone(),
        kind: mapped.kind,
        length: mapped.length,
        precision: mapped.precision,
        scale: mapped.scale,
        is_primary_key: column.constraint.is_primary_key(),
        is_unique: column.constraint.is_unique(),
        is_auto_increment: column.is_auto_increment(),
        is_nullable: column.is_nullable,
        has_default: default_value.is_some(),
        default_value,
    }
}

/// Fold a repeated row for the same column into the first one.
///
/// Catalog joins can report a column once per constraint it takes part in.
fn merge_column(existing: &mut ColumnDescriptor, extra: ColumnDescriptor) {
    existing.is_primary_key |= extra.is_primary_key;
    existing.is_unique |= extra.is_unique;
    existing.is_auto_increment |= extra.is_auto_increment;
    existing.is_nullable &= extra.is_nullable;
    if !existing.has_default && extra.has_default {
        existing.has_default = true;
        existing.default_value = extra.default_value;
    }
}

/// Add a column to a table's list, merging it into an existing entry of the same name.
fn push_column(table: &str, columns: &mut Vec<ColumnDescriptor>, column: ColumnDescriptor) {
    match columns.iter_mut().find(|c| c.name == column.name) {
        Some(existing) => {
            debug!(table, column = %column.name, "merging duplicate column row");
            merge_column(existing, column);
        }
        None => columns.push(column),
    }
}

/// Build a table from its run of column rows.
///
/// Columns end up in ordinal order with one entry per name.
pub fn build_table(name: &str, run: &[CatalogColumn], dialect: Dialect) -> TableDescriptor {
    let mut columns: Vec<ColumnDescriptor> = Vec::with_capacity(run.len());
    for row in run {
        push_column(name, &mut columns, build_column(row, dialect));
    }
    columns.sort_by_key(|c| c.position);

    TableDescriptor {
        name: name.to_string(),
        columns,
    }
}

/// Partition the sorted column stream into tables.
///
/// A run ends where the next row names a different table, or at the last
/// row. A table whose rows reappear after another table's run is merged
/// rather than duplicated.
pub fn build_tables(columns: &[CatalogColumn], dialect: Dialect) -> BTreeMap<String, TableDescriptor> {
    let mut tables: BTreeMap<String, TableDescriptor> = BTreeMap::new();
    let mut start = 0;

    for (i, row) in columns.iter().enumerate() {
        let is_boundary = columns
            .get(i + 1)
            .map_or(true, |next| next.table_name != row.table_name);
        if !is_boundary {
            continue;
        }

        let run = &columns[start..=i];
        start = i + 1;

        let name = &row.table_name;
        match tables.get_mut(name) {
            Some(existing) => {
                warn!(table = %name, "table rows are not contiguous in the catalog stream; merging");
                for row in run {
                    push_column(name, &mut existing.columns, build_column(row, dialect));
                }
                existing.columns.sort_by_key(|c| c.position);
            }
            None => {
                tables.insert(name.clone(), build_table(name, run, dialect));
            }
        }
    }

    debug!(tables = tables.len(), rows = columns.len(), "built tables");
    tables
}
