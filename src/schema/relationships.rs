//! Relationship resolver.
//!
//! Each surviving foreign-key edge yields two halves that share one
//! relationship name:
//!
//! ```text
//!   book.author_id ──► author.id
//!
//!   relationships[book]["author"]  = belongs-to author  (local author_id → id)
//!   relationships[author]["books"] = has-many book
//! ```
//!
//! Structural problems never fail the run. Dangling edges are dropped and
//! colliding field names are renamed deterministically.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::naming::{
    belongs_to_field_name, has_many_field_name, unique_field_name, NamingOptions,
    RelationshipNamer,
};
use super::types::{RelationshipDescriptor, RelationshipKind, RelationshipMap, TableDescriptor};
use crate::catalog::ForeignKeyEdge;

/// Why an edge cannot produce relationships.
fn dangling_reason(
    tables: &BTreeMap<String, TableDescriptor>,
    edge: &ForeignKeyEdge,
) -> Option<&'static str> {
    let Some(from) = tables.get(&edge.from_table) else {
        return Some("referencing table is absent");
    };
    if !from.has_column(&edge.from_column) {
        return Some("referencing column is absent");
    }
    let Some(to) = tables.get(&edge.to_table) else {
        return Some("referenced table is absent");
    };
    if !to.has_column(&edge.to_column) {
        return Some("referenced column is absent");
    }
    None
}

/// Insert a relationship half under a field name unique within the table.
fn insert_unique(
    fields: &mut BTreeMap<String, RelationshipDescriptor>,
    candidate: String,
    edge: &ForeignKeyEdge,
    mut descriptor: RelationshipDescriptor,
) {
    let field = unique_field_name(&candidate, edge, |name| fields.contains_key(name));
    if field != candidate {
        warn!(
            table = %descriptor.owner_table,
            field = %candidate,
            renamed = %field,
            relationship = %descriptor.relationship_name,
            "relationship field name collision"
        );
    }
    descriptor.field_name = field.clone();
    fields.insert(field, descriptor);
}

/// Build both halves of every resolvable foreign-key edge.
///
/// Edges are processed in sorted order (from table, from column, to table,
/// to column) after removing exact duplicates, so the result depends only on
/// the set of edges and tables.
pub fn build_relationships(
    tables: &BTreeMap<String, TableDescriptor>,
    edges: &[ForeignKeyEdge],
    options: &NamingOptions,
) -> RelationshipMap {
    let mut sorted: Vec<&ForeignKeyEdge> = edges.iter().collect();
    sorted.sort();
    sorted.dedup_by(|a, b| a.same_columns(b));

    let mut namer = RelationshipNamer::new();
    let mut resolved: Vec<(&ForeignKeyEdge, String)> = Vec::with_capacity(sorted.len());
    for edge in sorted {
        if let Some(reason) = dangling_reason(tables, edge) {
            debug!(
                from = %format!("{}.{}", edge.from_table, edge.from_column),
                to = %format!("{}.{}", edge.to_table, edge.to_column),
                reason,
                "skipping dangling foreign key"
            );
            continue;
        }
        let name = namer.assign(edge);
        resolved.push((edge, name));
    }

    let mut relationships = RelationshipMap::new();
    for table in tables.keys() {
        let mut fields: BTreeMap<String, RelationshipDescriptor> = BTreeMap::new();

        for (edge, name) in resolved.iter().filter(|(e, _)| &e.from_table == table) {
            let candidate = belongs_to_field_name(&edge.from_column, options);
            let descriptor = RelationshipDescriptor {
                kind: RelationshipKind::BelongsTo,
                owner_table: table.clone(),
                field_name: String::new(),
                target_table: edge.to_table.clone(),
                local_column: Some(edge.from_column.clone()),
                target_column: Some(edge.to_column.clone()),
                relationship_name: name.clone(),
            };
            insert_unique(&mut fields, candidate, edge, descriptor);
        }

        for (edge, name) in resolved.iter().filter(|(e, _)| &e.to_table == table) {
            let candidate = has_many_field_name(&edge.from_table);
            let descriptor = RelationshipDescriptor {
                kind: RelationshipKind::HasMany,
                owner_table: table.clone(),
                field_name: String::new(),
                target_table: edge.from_table.clone(),
                local_column: None,
                target_column: None,
                relationship_name: name.clone(),
            };
            insert_unique(&mut fields, candidate, edge, descriptor);
        }

        if !fields.is_empty() {
            relationships.insert(table.clone(), fields);
        }
    }

    debug!(
        edges = edges.len(),
        resolved = resolved.len(),
        tables = relationships.len(),
        "resolved relationships"
    );
    relationships
}
