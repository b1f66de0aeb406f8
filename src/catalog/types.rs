//! Normalized catalog rows.
//!
//! Dialect-specific catalog queries are decoded into these shapes so the
//! table builder and relationship resolver never see engine differences.

use serde::{Deserialize, Serialize};

/// Key constraint tag reported for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    /// First column of a non-unique index (MySQL `MUL`).
    Multiple,
    #[default]
    None,
}

impl ConstraintKind {
    /// Parse a catalog tag.
    ///
    /// Accepts MySQL `COLUMN_KEY` values (`PRI`, `UNI`, `MUL`) and
    /// `table_constraints.constraint_type` values (`PRIMARY KEY`, `UNIQUE`).
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "PRI" | "PRIMARY KEY" | "PRIMARY" => Self::PrimaryKey,
            "UNI" | "UNIQUE" => Self::Unique,
            "MUL" => Self::Multiple,
            _ => Self::None,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self, Self::PrimaryKey)
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, Self::PrimaryKey | Self::Unique)
    }
}

/// One column row from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumn {
    pub table_name: String,
    pub column_name: String,
    /// 1-based ordinal position within the table.
    pub ordinal_position: u32,
    /// Type token as reported (e.g. `varchar(255)`, `character varying`).
    pub data_type: String,
    #[serde(default)]
    pub character_maximum_length: Option<u32>,
    #[serde(default)]
    pub numeric_precision: Option<u32>,
    #[serde(default)]
    pub numeric_scale: Option<u32>,
    #[serde(default = "default_nullable")]
    pub is_nullable: bool,
    #[serde(default)]
    pub column_default: Option<String>,
    #[serde(default)]
    pub constraint: ConstraintKind,
    /// Engine-specific extra metadata (`auto_increment`).
    #[serde(default)]
    pub extra: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl CatalogColumn {
    /// Create a nullable column row with no constraints.
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        ordinal_position: u32,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            ordinal_position,
            data_type: data_type.into(),
            character_maximum_length: None,
            numeric_precision: None,
            numeric_scale: None,
            is_nullable: true,
            column_default: None,
            constraint: ConstraintKind::None,
            extra: None,
        }
    }

    /// Mark as primary key (which also makes it NOT NULL).
    pub fn primary_key(mut self) -> Self {
        self.constraint = ConstraintKind::PrimaryKey;
        self.is_nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.constraint = ConstraintKind::Unique;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.extra = Some("auto_increment".to_string());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.column_default = Some(value.into());
        self
    }

    pub fn max_length(mut self, length: u32) -> Self {
        self.character_maximum_length = Some(length);
        self
    }

    pub fn precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.numeric_precision = Some(precision);
        self.numeric_scale = scale;
        self
    }

    /// Whether the engine reported this column as auto-incrementing.
    pub fn is_auto_increment(&self) -> bool {
        self.extra
            .as_deref()
            .map(|e| e.to_lowercase().contains("auto_increment"))
            .unwrap_or(false)
    }

    /// Default literal, if one is set and non-empty. Whitespace is kept.
    pub fn default_literal(&self) -> Option<&str> {
        self.column_default.as_deref().filter(|d| !d.is_empty())
    }
}

/// One column pair of a foreign key.
///
/// Transient: consumed by the relationship resolver, not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    #[serde(default)]
    pub constraint_name: Option<String>,
}

impl ForeignKeyEdge {
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
    ) -> Self {
        Self {
            from_table: from_table.into(),
            from_column: from_column.into(),
            to_table: to_table.into(),
            to_column: to_column.into(),
            constraint_name: None,
        }
    }

    pub fn with_constraint(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    /// Whether both ends are the same four identifiers, ignoring constraint name.
    pub fn same_columns(&self, other: &ForeignKeyEdge) -> bool {
        self.from_table == other.from_table
            && self.from_column == other.from_column
            && self.to_table == other.to_table
            && self.to_column == other.to_column
    }
}
