//! Integration tests for the table builder.

use schema_introspect::catalog::CatalogColumn;
use schema_introspect::dialect::Dialect;
use schema_introspect::schema::{build_table, build_tables, ColumnKind};

fn stream() -> Vec<CatalogColumn> {
    vec![
        CatalogColumn::new("author", "id", 1, "int").primary_key().auto_increment(),
        CatalogColumn::new("author", "name", 2, "varchar(255)").max_length(255).not_null(),
        CatalogColumn::new("author", "active", 3, "tinyint(1)").default_value("1"),
        CatalogColumn::new("book", "id", 1, "int").primary_key().auto_increment(),
        CatalogColumn::new("book", "title", 2, "varchar(200)").max_length(200).not_null(),
        CatalogColumn::new("book", "author_id", 3, "int").not_null(),
        CatalogColumn::new("tag", "label", 1, "varchar(32)").unique(),
    ]
}

#[test]
fn test_every_table_appears_once() {
    let tables = build_tables(&stream(), Dialect::MySql);
    let names: Vec<_> = tables.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["author", "book", "tag"]);
}

#[test]
fn test_final_single_row_table_is_kept() {
    let tables = build_tables(&stream(), Dialect::MySql);
    let tag = &tables["tag"];
    assert_eq!(tag.columns.len(), 1);
    assert!(tag.columns[0].is_unique);
    assert!(!tag.columns[0].is_primary_key);
}

#[test]
fn test_columns_in_ordinal_order() {
    let tables = build_tables(&stream(), Dialect::MySql);
    assert_eq!(tables["book"].column_names(), vec!["id", "title", "author_id"]);
    let positions: Vec<u32> = tables["book"].columns.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[test]
fn test_out_of_order_rows_are_sorted() {
    let rows = vec![
        CatalogColumn::new("t", "b", 2, "int"),
        CatalogColumn::new("t", "a", 1, "int"),
    ];
    let table = build_table("t", &rows, Dialect::MySql);
    assert_eq!(table.column_names(), vec!["a", "b"]);
}

#[test]
fn test_column_flags() {
    let tables = build_tables(&stream(), Dialect::MySql);
    let author = &tables["author"];

    let id = author.column("id").unwrap();
    assert!(id.is_primary_key);
    assert!(id.is_auto_increment);
    assert!(!id.is_nullable);
    assert!(!id.has_default);

    let name = author.column("name").unwrap();
    assert_eq!(name.kind, ColumnKind::Text);
    assert_eq!(name.length, Some(255));
    assert!(!name.is_nullable);

    let active = author.column("active").unwrap();
    assert_eq!(active.kind, ColumnKind::Boolean);
    assert!(active.is_nullable);
    assert!(active.has_default);
    assert_eq!(active.default_value.as_deref(), Some("1"));
    assert_eq!(active.data_type, "tinyint(1)");
}

#[test]
fn test_primary_key_columns() {
    let rows = vec![
        CatalogColumn::new("book_tag", "book_id", 1, "int").primary_key(),
        CatalogColumn::new("book_tag", "tag_id", 2, "int").primary_key(),
        CatalogColumn::new("book_tag", "added_at", 3, "datetime"),
    ];
    let table = build_table("book_tag", &rows, Dialect::MySql);
    let pk: Vec<_> = table.primary_key_columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(pk, vec!["book_id", "tag_id"]);
}

#[test]
fn test_postgres_serial_default() {
    let mut id = CatalogColumn::new("users", "id", 1, "integer")
        .primary_key()
        .default_value("nextval('users_id_seq'::regclass)");
    id.extra = Some("auto_increment".to_string());

    let table = build_table("users", &[id], Dialect::Postgres);
    let id = &table.columns[0];
    assert!(id.is_auto_increment);
    assert!(id.has_default);
    assert_eq!(id.kind, ColumnKind::Integer);
}

#[test]
fn test_whitespace_default_is_kept_verbatim() {
    let rows = vec![
        CatalogColumn::new("label", "pad", 1, "char(1)").default_value(" "),
        CatalogColumn::new("label", "text", 2, "varchar(8)").default_value(" x "),
        CatalogColumn::new("label", "note", 3, "varchar(8)").default_value(""),
    ];
    let table = build_table("label", &rows, Dialect::MySql);

    let pad = table.column("pad").unwrap();
    assert!(pad.has_default);
    assert_eq!(pad.default_value.as_deref(), Some(" "));

    let text = table.column("text").unwrap();
    assert_eq!(text.default_value.as_deref(), Some(" x "));

    let note = table.column("note").unwrap();
    assert!(!note.has_default);
    assert_eq!(note.default_value, None);
}
