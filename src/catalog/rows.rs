//! Tabular query results and typed field access.

use serde_json::Value;

use super::error::{CatalogError, CatalogResult};

/// Rows returned by a [`QueryRunner`](super::QueryRunner).
///
/// Column lookup is case-insensitive: engines disagree on the case of
/// `information_schema` aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl QueryRows {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Build rows from JSON objects, taking column order from the first one.
    pub fn from_objects(objects: &[Value]) -> Self {
        let columns: Vec<String> = objects
            .first()
            .and_then(Value::as_object)
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();

        let rows = objects
            .iter()
            .map(|obj| {
                columns
                    .iter()
                    .map(|c| obj.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(field))
    }

    /// Iterate rows as records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            rows: self,
            values,
        })
    }
}

/// One row of a [`QueryRows`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    rows: &'a QueryRows,
    values: &'a [Value],
}

impl<'a> Record<'a> {
    /// Raw value of a field. SQL NULL and absent fields are both `None`.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        let idx = self.rows.index_of(field)?;
        self.values.get(idx).filter(|v| !v.is_null())
    }

    /// A required text field.
    pub fn str(&self, field: &str) -> CatalogResult<String> {
        self.opt_str(field)?
            .ok_or_else(|| CatalogError::MissingField(field.to_string()))
    }

    /// An optional text field. Numbers are rendered as text.
    pub fn opt_str(&self, field: &str) -> CatalogResult<Option<String>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(CatalogError::invalid_value(field, other)),
        }
    }

    /// An optional unsigned integer, accepting JSON numbers or numeric text.
    ///
    /// Values above `u32::MAX` saturate.
    pub fn opt_u32(&self, field: &str) -> CatalogResult<Option<u32>> {
        let parsed = match self.get(field) {
            None => return Ok(None),
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            Some(_) => None,
        };

        match parsed {
            Some(v) => Ok(Some(u32::try_from(v).unwrap_or(u32::MAX))),
            None => Err(CatalogError::invalid_value(
                field,
                self.get(field).cloned().unwrap_or(Value::Null),
            )),
        }
    }

    /// A required unsigned integer.
    pub fn u32(&self, field: &str) -> CatalogResult<u32> {
        self.opt_u32(field)?
            .ok_or_else(|| CatalogError::MissingField(field.to_string()))
    }

    /// A yes/no flag (`YES`/`NO`, booleans, or 1/0). Absent reads as `default`.
    pub fn flag(&self, field: &str, default: bool) -> CatalogResult<bool> {
        match self.get(field) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.as_i64().map(|v| v != 0).unwrap_or(default)),
            Some(Value::String(s)) => match s.trim().to_uppercase().as_str() {
                "YES" | "Y" | "TRUE" | "T" | "1" => Ok(true),
                "NO" | "N" | "FALSE" | "F" | "0" => Ok(false),
                _ => Err(CatalogError::invalid_value(field, s)),
            },
            Some(other) => Err(CatalogError::invalid_value(field, other)),
        }
    }
}
