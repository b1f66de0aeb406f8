//! In-memory catalog, loaded from a JSON dump or built in code.
//!
//! Dump format:
//!
//! ```json
//! {
//!   "columns": [{"table_name": "author", "column_name": "id", "ordinal_position": 1,
//!                "data_type": "int", "constraint": "primary_key"}],
//!   "foreign_keys": [{"from_table": "book", "from_column": "author_id",
//!                     "to_table": "author", "to_column": "id"}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::CatalogResult;
use super::reader::{CatalogFilter, CatalogReader};
use super::types::{CatalogColumn, ForeignKeyEdge};

/// Catalog rows held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    pub columns: Vec<CatalogColumn>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyEdge>,
}

impl StaticCatalog {
    pub fn new(columns: Vec<CatalogColumn>, foreign_keys: Vec<ForeignKeyEdge>) -> Self {
        Self {
            columns,
            foreign_keys,
        }
    }

    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_column(mut self, column: CatalogColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_foreign_key(mut self, edge: ForeignKeyEdge) -> Self {
        self.foreign_keys.push(edge);
        self
    }
}

impl CatalogReader for StaticCatalog {
    fn list_columns(&self, filter: &CatalogFilter) -> CatalogResult<Vec<CatalogColumn>> {
        let mut columns: Vec<CatalogColumn> = self
            .columns
            .iter()
            .filter(|c| filter.admits(&c.table_name))
            .cloned()
            .collect();
        // Same order the SQL readers guarantee.
        columns.sort_by(|a, b| {
            a.table_name
                .cmp(&b.table_name)
                .then(a.ordinal_position.cmp(&b.ordinal_position))
        });
        Ok(columns)
    }

    fn list_foreign_keys(&self) -> CatalogResult<Vec<ForeignKeyEdge>> {
        Ok(self.foreign_keys.clone())
    }
}
