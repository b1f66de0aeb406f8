//! Integration tests for end-to-end schema extraction.

use std::cell::RefCell;

use serde_json::{json, Value};

use schema_introspect::catalog::{CatalogResult, QueryRows, QueryRunner, StaticCatalog};
use schema_introspect::config::{ConnectionConfig, ConnectionError, Driver};
use schema_introspect::dialect::Dialect;
use schema_introspect::schema::{ColumnKind, RelationshipKind};
use schema_introspect::{extract_schema, ExtractOptions, IntrospectError, Introspector};

/// Answers catalog queries from fixed rows, honoring the table filter.
#[derive(Debug)]
struct FakeCatalog {
    columns: Vec<Value>,
    foreign_keys: Vec<Value>,
    seen: RefCell<Vec<Vec<Value>>>,
}

impl QueryRunner for FakeCatalog {
    fn query(&self, sql: &str, args: &[Value]) -> CatalogResult<QueryRows> {
        self.seen.borrow_mut().push(args.to_vec());

        if sql.contains("foreign_table_name") {
            return Ok(QueryRows::from_objects(&self.foreign_keys));
        }

        let rows: Vec<Value> = match args.get(1) {
            Some(table) => self
                .columns
                .iter()
                .filter(|row| &row["table_name"] == table)
                .cloned()
                .collect(),
            None => self.columns.clone(),
        };
        Ok(QueryRows::from_objects(&rows))
    }
}

fn column(table: &str, name: &str, position: u32, data_type: &str) -> Value {
    json!({
        "table_name": table,
        "column_name": name,
        "ordinal_position": position,
        "data_type": data_type,
        "character_maximum_length": null,
        "numeric_precision": null,
        "numeric_scale": null,
        "is_nullable": "YES",
        "column_default": null,
        "constraint_type": "",
        "extra": ""
    })
}

fn primary_key(table: &str) -> Value {
    let mut row = column(table, "id", 1, "int(11)");
    row["is_nullable"] = json!("NO");
    row["constraint_type"] = json!("PRI");
    row["extra"] = json!("auto_increment");
    row
}

fn library() -> FakeCatalog {
    let mut name = column("author", "name", 2, "varchar(255)");
    name["character_maximum_length"] = json!(255);
    name["is_nullable"] = json!("NO");

    let mut active = column("author", "active", 3, "tinyint(1)");
    active["column_default"] = json!("1");

    FakeCatalog {
        columns: vec![
            primary_key("author"),
            name,
            active,
            primary_key("book"),
            column("book", "title", 2, "varchar(255)"),
            column("book", "author_id", 3, "int(11)"),
            column("internal_cache", "cache_key", 1, "varchar(64)"),
            column("internal_cache", "book_id", 2, "int(11)"),
        ],
        foreign_keys: vec![
            json!({"constraint_name": "fk_book_author", "table_name": "book",
                   "column_name": "author_id", "foreign_table_name": "author",
                   "foreign_column_name": "id"}),
            json!({"constraint_name": "fk_cache_book", "table_name": "internal_cache",
                   "column_name": "book_id", "foreign_table_name": "book",
                   "foreign_column_name": "id"}),
        ],
        seen: RefCell::new(Vec::new()),
    }
}

fn mysql_config() -> ConnectionConfig {
    ConnectionConfig::new(Driver::MySql, "localhost", "root", "secret", "library")
}

#[test]
fn test_author_book_schema() {
    let catalog = library();
    let introspector = Introspector::new(mysql_config(), &catalog)
        .unwrap()
        .with_options(ExtractOptions::for_dialect(Dialect::MySql).exclude("internal_cache"));

    let schema = introspector.extract_schema().unwrap();

    assert_eq!(schema.table_names().collect::<Vec<_>>(), vec!["author", "book"]);

    let author = schema.table("author").unwrap();
    assert_eq!(author.column_names(), vec!["id", "name", "active"]);

    let id = author.column("id").unwrap();
    assert_eq!(id.kind, ColumnKind::Integer);
    assert!(id.is_primary_key && id.is_unique && id.is_auto_increment);
    assert!(!id.is_nullable);

    let name = author.column("name").unwrap();
    assert_eq!(name.kind, ColumnKind::Text);
    assert_eq!(name.length, Some(255));
    assert!(!name.is_nullable);

    let active = author.column("active").unwrap();
    assert_eq!(active.kind, ColumnKind::Boolean);
    assert!(active.has_default);
    assert_eq!(active.default_value.as_deref(), Some("1"));

    let books = schema.relationship("author", "books").unwrap();
    assert_eq!(books.kind, RelationshipKind::HasMany);
    assert_eq!(books.target_table, "book");

    let owner = schema.relationship("book", "author").unwrap();
    assert_eq!(owner.kind, RelationshipKind::BelongsTo);
    assert_eq!(owner.local_column.as_deref(), Some("author_id"));
    assert_eq!(owner.relationship_name, books.relationship_name);

    // The excluded table's key into book leaves no trace.
    assert!(schema.relationship("book", "internal_caches").is_none());
    assert_eq!(schema.relationship_count(), 2);
}

#[test]
fn test_database_is_the_mysql_namespace() {
    let catalog = library();
    let introspector = Introspector::new(mysql_config(), &catalog).unwrap();
    introspector.extract_schema().unwrap();

    let seen = catalog.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|args| args[0] == json!("library")));
}

#[test]
fn test_postgres_uses_public_namespace() {
    let catalog = FakeCatalog {
        columns: Vec::new(),
        foreign_keys: Vec::new(),
        seen: RefCell::new(Vec::new()),
    };
    let config = ConnectionConfig::new(Driver::Postgres, "db", "app", "", "shop");
    let introspector = Introspector::new(config, &catalog).unwrap();
    assert_eq!(introspector.dialect(), Dialect::Postgres);

    introspector.extract_schema().unwrap();
    assert_eq!(catalog.seen.borrow()[0], vec![json!("public")]);
}

#[test]
fn test_extract_single_table() {
    let catalog = library();
    let introspector = Introspector::new(mysql_config(), &catalog).unwrap();

    let schema = introspector.extract_table("book").unwrap();
    assert_eq!(schema.table_names().collect::<Vec<_>>(), vec!["book"]);
    // author was not built, so book's key to it resolves to nothing.
    assert_eq!(schema.relationship_count(), 0);
    assert_eq!(catalog.seen.borrow()[0], vec![json!("library"), json!("book")]);
}

#[test]
fn test_missing_database_is_rejected_before_any_query() {
    let catalog = library();
    let config = ConnectionConfig::new(Driver::MySql, "localhost", "root", "", " ");

    let err = Introspector::new(config, &catalog).unwrap_err();
    assert!(matches!(
        err,
        IntrospectError::Config(ConnectionError::MissingField("database"))
    ));
    assert!(err.is_configuration());
    assert!(catalog.seen.borrow().is_empty());
}

#[test]
fn test_extract_from_json_dump() {
    let catalog = StaticCatalog::from_json_str(
        r#"{
            "columns": [
                {"table_name": "post", "column_name": "id", "ordinal_position": 1,
                 "data_type": "integer", "is_nullable": false, "constraint": "primary_key"},
                {"table_name": "post", "column_name": "body", "ordinal_position": 2,
                 "data_type": "text"},
                {"table_name": "comment", "column_name": "id", "ordinal_position": 1,
                 "data_type": "integer", "is_nullable": false, "constraint": "primary_key"},
                {"table_name": "comment", "column_name": "post_id", "ordinal_position": 2,
                 "data_type": "integer"}
            ],
            "foreign_keys": [
                {"from_table": "comment", "from_column": "post_id",
                 "to_table": "post", "to_column": "id"}
            ]
        }"#,
    )
    .unwrap();

    let schema =
        extract_schema(&catalog, Dialect::Postgres, &ExtractOptions::default(), None).unwrap();

    assert_eq!(schema.table_names().collect::<Vec<_>>(), vec!["comment", "post"]);
    assert!(schema.relationship("post", "comments").unwrap().is_has_many());
    assert!(schema.relationship("comment", "post").unwrap().is_belongs_to());
    assert_eq!(
        schema.table("post").unwrap().column("body").unwrap().kind,
        ColumnKind::Text
    );
}
