//! Reconstructed schema model.
//!
//! These types are what the extraction pipeline hands to its caller. A
//! [`Schema`] is built once per extraction run and never mutated afterwards:
//! its fields are private and only the assembler constructs one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic column type.
///
/// Derived from the catalog's type token by the type mapper. Tokens the
/// dialect does not know map to [`ColumnKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Decimal,
    Float,
    Text,
    LongText,
    Boolean,
    Json,
    Date,
    DateTime,
    Time,
    Timestamp,
    Year,
    Binary,
    /// A kind this version does not know, read back from a serialized schema.
    #[serde(other)]
    Unknown,
}

impl ColumnKind {
    /// Lowercase name used in summaries and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::LongText => "long_text",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Json => "json",
            ColumnKind::Date => "date",
            ColumnKind::DateTime => "date_time",
            ColumnKind::Time => "time",
            ColumnKind::Timestamp => "timestamp",
            ColumnKind::Year => "year",
            ColumnKind::Binary => "binary",
            ColumnKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a reconstructed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, unique within its table.
    pub name: String,
    /// Catalog ordinal position (1-based).
    pub position: u32,
    /// Type token exactly as the catalog reported it.
    pub data_type: String,
    pub kind: ColumnKind,
    /// Character length for variable-length text and binary types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Numeric precision for big integers and decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Numeric scale for decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    pub is_primary_key: bool,
    /// Part of a primary key or unique constraint.
    pub is_unique: bool,
    pub is_auto_increment: bool,
    pub is_nullable: bool,
    pub has_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A reconstructed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    /// Columns in catalog ordinal order. Never empty.
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check whether the table has a column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in ordinal order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Primary key columns in ordinal order.
    pub fn primary_key_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }
}

/// Which side of a foreign key a relationship describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// The owner holds the foreign key and points at one target row.
    BelongsTo,
    /// The owner is referenced by many rows of the target.
    HasMany,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::BelongsTo => "one",
            RelationshipKind::HasMany => "many",
        }
    }
}

/// One half of a foreign-key relationship, as seen from its owner table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDescriptor {
    pub kind: RelationshipKind,
    pub owner_table: String,
    /// Field name, unique within the owner's relationship set.
    pub field_name: String,
    pub target_table: String,
    /// Foreign key column on the owner (belongs-to side only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_column: Option<String>,
    /// Referenced column on the target (belongs-to side only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
    /// Shared by exactly the two halves derived from one foreign key.
    pub relationship_name: String,
}

impl RelationshipDescriptor {
    pub fn is_belongs_to(&self) -> bool {
        self.kind == RelationshipKind::BelongsTo
    }

    pub fn is_has_many(&self) -> bool {
        self.kind == RelationshipKind::HasMany
    }
}

/// Relationships of every table, keyed by owner table then field name.
pub type RelationshipMap = BTreeMap<String, BTreeMap<String, RelationshipDescriptor>>;

/// The reconstructed schema.
///
/// Built once per extraction run, then read-only. Every relationship's owner
/// and target table exist in [`Schema::tables`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    tables: BTreeMap<String, TableDescriptor>,
    relationships: RelationshipMap,
}

impl Schema {
    pub(crate) fn from_parts(
        tables: BTreeMap<String, TableDescriptor>,
        relationships: RelationshipMap,
    ) -> Self {
        Self {
            tables,
            relationships,
        }
    }

    /// All tables, keyed by name.
    pub fn tables(&self) -> &BTreeMap<String, TableDescriptor> {
        &self.tables
    }

    /// All relationships, keyed by owner table then field name.
    ///
    /// Tables without relationships have no entry.
    pub fn relationships(&self) -> &RelationshipMap {
        &self.relationships
    }

    /// Get a table by name.
    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.get(name)
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Relationships owned by one table, in field-name order.
    pub fn relationships_of(&self, table: &str) -> impl Iterator<Item = &RelationshipDescriptor> {
        self.relationships
            .get(table)
            .into_iter()
            .flat_map(|fields| fields.values())
    }

    /// Get one relationship by owner table and field name.
    pub fn relationship(&self, table: &str, field: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.get(table).and_then(|fields| fields.get(field))
    }

    /// Total number of relationship halves.
    pub fn relationship_count(&self) -> usize {
        self.relationships.values().map(BTreeMap::len).sum()
    }

    /// Find the complementary half of a relationship.
    pub fn counterpart(&self, rel: &RelationshipDescriptor) -> Option<&RelationshipDescriptor> {
        self.relationships_of(&rel.target_table).find(|other| {
            other.relationship_name == rel.relationship_name
                && other.kind != rel.kind
                && other.target_table == rel.owner_table
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
