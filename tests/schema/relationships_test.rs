//! Integration tests for relationship resolution.
//!
//! These tests verify pairing, naming and collision handling of
//! belongs-to / has-many halves.

use std::collections::{BTreeMap, BTreeSet};

use schema_introspect::catalog::{CatalogColumn, ForeignKeyEdge};
use schema_introspect::dialect::Dialect;
use schema_introspect::schema::{
    build_relationships, build_tables, NamingOptions, RelationshipKind, RelationshipMap,
    TableDescriptor,
};

fn library() -> BTreeMap<String, TableDescriptor> {
    build_tables(
        &[
            CatalogColumn::new("author", "id", 1, "int").primary_key(),
            CatalogColumn::new("author", "name", 2, "varchar(255)"),
            CatalogColumn::new("book", "id", 1, "int").primary_key(),
            CatalogColumn::new("book", "title", 2, "varchar(255)"),
            CatalogColumn::new("book", "author_id", 3, "int"),
            CatalogColumn::new("book", "editor_id", 4, "int"),
            CatalogColumn::new("employee", "id", 1, "int").primary_key(),
            CatalogColumn::new("employee", "manager_id", 2, "int"),
        ],
        Dialect::MySql,
    )
}

fn resolve(edges: &[ForeignKeyEdge]) -> RelationshipMap {
    build_relationships(&library(), edges, &NamingOptions::default())
}

#[test]
fn test_author_book_pair() {
    let rels = resolve(&[ForeignKeyEdge::new("book", "author_id", "author", "id")]);

    let belongs = &rels["book"]["author"];
    assert_eq!(belongs.kind, RelationshipKind::BelongsTo);
    assert_eq!(belongs.owner_table, "book");
    assert_eq!(belongs.target_table, "author");
    assert_eq!(belongs.local_column.as_deref(), Some("author_id"));
    assert_eq!(belongs.target_column.as_deref(), Some("id"));

    let has_many = &rels["author"]["books"];
    assert_eq!(has_many.kind, RelationshipKind::HasMany);
    assert_eq!(has_many.target_table, "book");
    assert_eq!(has_many.local_column, None);

    assert_eq!(belongs.relationship_name, has_many.relationship_name);
}

#[test]
fn test_two_keys_to_same_target_keep_both() {
    let rels = resolve(&[
        ForeignKeyEdge::new("book", "editor_id", "author", "id"),
        ForeignKeyEdge::new("book", "author_id", "author", "id"),
    ]);

    let book: BTreeSet<_> = rels["book"].keys().map(String::as_str).collect();
    assert_eq!(book, BTreeSet::from(["author", "editor"]));

    // author_id sorts first, so it keeps the plain name.
    let author: BTreeSet<_> = rels["author"].keys().map(String::as_str).collect();
    assert_eq!(author, BTreeSet::from(["books", "books_editor"]));
    assert_eq!(rels["author"]["books"].relationship_name, "book_author_id");
    assert_eq!(rels["author"]["books_editor"].relationship_name, "book_editor_id");

    assert_ne!(
        rels["book"]["author"].relationship_name,
        rels["book"]["editor"].relationship_name
    );
}

#[test]
fn test_edge_order_does_not_matter() {
    let forward = resolve(&[
        ForeignKeyEdge::new("book", "author_id", "author", "id"),
        ForeignKeyEdge::new("book", "editor_id", "author", "id"),
    ]);
    let reverse = resolve(&[
        ForeignKeyEdge::new("book", "editor_id", "author", "id"),
        ForeignKeyEdge::new("book", "author_id", "author", "id"),
    ]);
    assert_eq!(forward, reverse);
}

#[test]
fn test_self_reference() {
    let rels = resolve(&[ForeignKeyEdge::new("employee", "manager_id", "employee", "id")]);
    let employee = &rels["employee"];
    assert_eq!(employee.len(), 2);
    assert_eq!(employee["manager"].kind, RelationshipKind::BelongsTo);
    assert_eq!(employee["employees"].kind, RelationshipKind::HasMany);
    assert_eq!(
        employee["manager"].relationship_name,
        employee["employees"].relationship_name
    );
}

#[test]
fn test_dangling_edges_are_dropped() {
    let rels = resolve(&[
        ForeignKeyEdge::new("book", "author_id", "publisher", "id"),
        ForeignKeyEdge::new("review", "book_id", "book", "id"),
        ForeignKeyEdge::new("book", "missing_id", "author", "id"),
    ]);
    assert!(rels.is_empty());
}

#[test]
fn test_field_names_unique_when_belongs_to_meets_has_many() {
    // `book.books_id` would produce a belongs-to named `books` on book,
    // and the self-reference's has-many is also `books`.
    let tables = build_tables(
        &[
            CatalogColumn::new("book", "id", 1, "int").primary_key(),
            CatalogColumn::new("book", "books_id", 2, "int"),
        ],
        Dialect::MySql,
    );
    let rels = build_relationships(
        &tables,
        &[ForeignKeyEdge::new("book", "books_id", "book", "id")],
        &NamingOptions::default(),
    );
    assert_eq!(rels["book"].len(), 2);
    assert!(rels["book"].contains_key("books"));
    assert!(rels["book"].contains_key("books_books"));
}

#[test]
fn test_singularized_belongs_to() {
    let tables = build_tables(
        &[
            CatalogColumn::new("author", "id", 1, "int").primary_key(),
            CatalogColumn::new("book", "id", 1, "int").primary_key(),
            CatalogColumn::new("book", "authors_id", 2, "int"),
        ],
        Dialect::MySql,
    );
    let options = NamingOptions {
        singularize_belongs_to: true,
    };
    let rels = build_relationships(
        &tables,
        &[ForeignKeyEdge::new("book", "authors_id", "author", "id")],
        &options,
    );
    assert!(rels["book"].contains_key("author"));
}

#[test]
fn test_field_name_matches_key() {
    let rels = resolve(&[
        ForeignKeyEdge::new("book", "author_id", "author", "id"),
        ForeignKeyEdge::new("book", "editor_id", "author", "id"),
    ]);
    for fields in rels.values() {
        for (key, rel) in fields {
            assert_eq!(key, &rel.field_name);
        }
    }
}
