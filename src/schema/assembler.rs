//! Schema assembler.
//!
//! Applies table exclusions and freezes the result into a [`Schema`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{RelationshipMap, Schema, TableDescriptor};
use crate::dialect::Dialect;

/// Tables kept out of the schema, by exact name or by prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    #[serde(default)]
    names: BTreeSet<String>,
    #[serde(default)]
    prefixes: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialect's administrative tables.
    pub fn for_dialect(dialect: Dialect) -> Self {
        let catalog = dialect.catalog();
        let mut set = Self::default();
        for name in catalog.default_excluded_names() {
            set.insert_name(*name);
        }
        for prefix in catalog.default_excluded_prefixes() {
            set.insert_prefix(*prefix);
        }
        set
    }

    pub fn insert_name(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn insert_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.prefixes.insert(prefix);
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.insert_name(name);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.insert_prefix(prefix);
        self
    }

    pub fn extend(&mut self, other: &ExclusionSet) {
        self.names.extend(other.names.iter().cloned());
        self.prefixes.extend(other.prefixes.iter().cloned());
    }

    /// Whether a table is excluded.
    pub fn contains(&self, table: &str) -> bool {
        self.names.contains(table) || self.prefixes.iter().any(|p| table.starts_with(p.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.prefixes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }
}

/// Remove excluded tables and every relationship touching them, then freeze.
///
/// Relationships whose owner or target is not a surviving table are dropped
/// too, so every relationship in the result points at an existing table.
pub fn assemble(
    mut tables: BTreeMap<String, TableDescriptor>,
    relationships: RelationshipMap,
    excluded: &ExclusionSet,
) -> Schema {
    let before = tables.len();
    tables.retain(|name, _| !excluded.contains(name));

    let mut dropped = 0usize;
    let relationships: RelationshipMap = relationships
        .into_iter()
        .filter(|(owner, _)| tables.contains_key(owner))
        .filter_map(|(owner, fields)| {
            let total = fields.len();
            let kept: BTreeMap<_, _> = fields
                .into_iter()
                .filter(|(_, rel)| tables.contains_key(&rel.target_table))
                .collect();
            dropped += total - kept.len();
            (!kept.is_empty()).then_some((owner, kept))
        })
        .collect();

    debug!(
        tables = tables.len(),
        excluded = before - tables.len(),
        dropped_relationships = dropped,
        "assembled schema"
    );
    Schema::from_parts(tables, relationships)
}
