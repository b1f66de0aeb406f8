//! Integration tests for properties every extracted schema must hold.

use std::collections::BTreeSet;

use schema_introspect::catalog::{CatalogColumn, ForeignKeyEdge, StaticCatalog};
use schema_introspect::dialect::Dialect;
use schema_introspect::schema::{ColumnKind, RelationshipKind, Schema};
use schema_introspect::{extract_schema, ExtractOptions};

fn columns() -> Vec<CatalogColumn> {
    vec![
        CatalogColumn::new("author", "id", 1, "int(11)").primary_key().auto_increment(),
        CatalogColumn::new("author", "name", 2, "varchar(255)").not_null(),
        CatalogColumn::new("author", "bio", 3, "geometry"),
        CatalogColumn::new("book", "id", 1, "int(11)").primary_key().auto_increment(),
        CatalogColumn::new("book", "title", 2, "varchar(255)"),
        CatalogColumn::new("book", "author_id", 3, "int(11)"),
        CatalogColumn::new("book", "editor_id", 4, "int(11)"),
        CatalogColumn::new("book", "price", 5, "decimal(10,2)"),
        CatalogColumn::new("category", "id", 1, "int(11)").primary_key(),
        CatalogColumn::new("category", "parent_id", 2, "int(11)"),
    ]
}

fn edges() -> Vec<ForeignKeyEdge> {
    vec![
        ForeignKeyEdge::new("book", "author_id", "author", "id"),
        ForeignKeyEdge::new("book", "editor_id", "author", "id"),
        ForeignKeyEdge::new("category", "parent_id", "category", "id"),
        // Points at a table that is not in the catalog.
        ForeignKeyEdge::new("book", "publisher_id", "publisher", "id"),
        ForeignKeyEdge::new("book", "title", "category", "name"),
    ]
}

fn extract(columns: Vec<CatalogColumn>, edges: Vec<ForeignKeyEdge>) -> Schema {
    let catalog = StaticCatalog::new(columns, edges);
    extract_schema(&catalog, Dialect::MySql, &ExtractOptions::default(), None).unwrap()
}

#[test]
fn test_every_column_is_kept() {
    let schema = extract(columns(), edges());

    let total: usize = schema.tables().values().map(|t| t.columns.len()).sum();
    assert_eq!(total, columns().len());

    for table in schema.tables().values() {
        assert!(!table.columns.is_empty());
        let positions: Vec<u32> = table.columns.iter().map(|c| c.position).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}

#[test]
fn test_unknown_type_becomes_text() {
    let schema = extract(columns(), edges());
    let bio = schema.table("author").unwrap().column("bio").unwrap();
    assert_eq!(bio.kind, ColumnKind::Text);
    assert_eq!(bio.data_type, "geometry");

    let price = schema.table("book").unwrap().column("price").unwrap();
    assert_eq!(price.kind, ColumnKind::Decimal);
    assert_eq!((price.precision, price.scale), (Some(10), Some(2)));
}

#[test]
fn test_every_relationship_has_a_counterpart() {
    let schema = extract(columns(), edges());

    for fields in schema.relationships().values() {
        for rel in fields.values() {
            let other = schema.counterpart(rel).unwrap_or_else(|| {
                panic!("{}.{} has no counterpart", rel.owner_table, rel.field_name)
            });
            assert_eq!(other.relationship_name, rel.relationship_name);
            assert_eq!(other.owner_table, rel.target_table);
            assert_ne!(other.kind, rel.kind);
        }
    }

    let names: Vec<&str> = schema
        .relationships()
        .values()
        .flat_map(|fields| fields.values())
        .map(|rel| rel.relationship_name.as_str())
        .collect();
    let distinct: BTreeSet<&str> = names.iter().copied().collect();
    assert_eq!(names.len(), distinct.len() * 2);
}

#[test]
fn test_dangling_edges_are_ignored() {
    let schema = extract(columns(), edges());

    assert!(schema.table("publisher").is_none());
    assert!(schema.relationship("book", "publisher").is_none());
    // category has no `name` column.
    assert!(schema.relationship("category", "books").is_none());

    for rel in schema.relationships().values().flat_map(|f| f.values()) {
        assert!(schema.table(&rel.owner_table).is_some());
        assert!(schema.table(&rel.target_table).is_some());
    }
    // author_id, editor_id and parent_id each give two halves.
    assert_eq!(schema.relationship_count(), 6);
}

#[test]
fn test_two_keys_to_one_target_get_distinct_fields() {
    let schema = extract(columns(), edges());

    let author = &schema.relationships()["author"];
    assert_eq!(author.len(), 2);
    assert!(author.values().all(|rel| rel.kind == RelationshipKind::HasMany));
    assert!(author.contains_key("books"));

    let book = &schema.relationships()["book"];
    assert!(book.contains_key("author"));
    assert!(book.contains_key("editor"));

    for (field, rel) in author.iter().chain(book.iter()) {
        assert_eq!(field, &rel.field_name);
    }
}

#[test]
fn test_self_reference_lives_on_one_table() {
    let schema = extract(columns(), edges());

    let parent = schema.relationship("category", "parent").unwrap();
    assert_eq!(parent.kind, RelationshipKind::BelongsTo);
    assert_eq!(parent.target_table, "category");

    let children = schema.relationship("category", "categories").unwrap();
    assert_eq!(children.kind, RelationshipKind::HasMany);
    assert_eq!(children.relationship_name, parent.relationship_name);
}

#[test]
fn test_extraction_is_repeatable() {
    let first = extract(columns(), edges());
    let second = extract(columns(), edges());
    assert_eq!(first, second);

    let mut shuffled_columns = columns();
    shuffled_columns.reverse();
    shuffled_columns.rotate_left(3);
    let mut shuffled_edges = edges();
    shuffled_edges.reverse();

    let shuffled = extract(shuffled_columns, shuffled_edges);
    assert_eq!(first, shuffled);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&shuffled).unwrap()
    );
}
