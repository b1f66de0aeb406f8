//! Integration tests for the type mapper.
//!
//! These tests verify how MySQL and Postgres type tokens map to column kinds.

use schema_introspect::catalog::CatalogColumn;
use schema_introspect::dialect::Dialect;
use schema_introspect::schema::{map_type, ColumnKind};

fn map(dialect: Dialect, column: CatalogColumn) -> schema_introspect::schema::MappedType {
    let token = column.data_type.clone();
    map_type(dialect, &token, &column)
}

#[test]
fn test_mysql_text_family() {
    let varchar = map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "varchar(255)").max_length(255));
    assert_eq!(varchar.kind, ColumnKind::Text);
    assert_eq!(varchar.length, Some(255));

    assert_eq!(
        map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "mediumtext")).kind,
        ColumnKind::LongText
    );
    assert_eq!(
        map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "longtext")).kind,
        ColumnKind::LongText
    );
    assert_eq!(
        map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "text")).kind,
        ColumnKind::Text
    );
}

#[test]
fn test_mysql_tinyint_one_is_boolean() {
    assert_eq!(
        map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "tinyint(1)")).kind,
        ColumnKind::Boolean
    );
    assert_eq!(
        map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "tinyint(3) unsigned")).kind,
        ColumnKind::Integer
    );
}

#[test]
fn test_bigint_precision() {
    let mapped = map(
        Dialect::MySql,
        CatalogColumn::new("t", "c", 1, "bigint(20) unsigned").precision(20, Some(0)),
    );
    assert_eq!(mapped.kind, ColumnKind::Integer);
    assert_eq!(mapped.precision, Some(20));
    assert_eq!(mapped.scale, None);

    let pg = map(Dialect::Postgres, CatalogColumn::new("t", "c", 1, "bigint").precision(64, Some(0)));
    assert_eq!(pg.precision, Some(64));
}

#[test]
fn test_decimal_precision_and_scale() {
    let from_catalog = map(
        Dialect::Postgres,
        CatalogColumn::new("t", "c", 1, "numeric").precision(12, Some(4)),
    );
    assert_eq!(from_catalog.kind, ColumnKind::Decimal);
    assert_eq!((from_catalog.precision, from_catalog.scale), (Some(12), Some(4)));

    let from_token = map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "decimal(10,2)"));
    assert_eq!((from_token.precision, from_token.scale), (Some(10), Some(2)));
}

#[test]
fn test_mysql_temporal() {
    let cases = [
        ("date", ColumnKind::Date),
        ("datetime", ColumnKind::DateTime),
        ("time", ColumnKind::Time),
        ("timestamp", ColumnKind::Timestamp),
        ("year", ColumnKind::Year),
        ("json", ColumnKind::Json),
        ("double", ColumnKind::Float),
        ("blob", ColumnKind::Binary),
    ];
    for (token, expected) in cases {
        assert_eq!(
            map(Dialect::MySql, CatalogColumn::new("t", "c", 1, token)).kind,
            expected,
            "token {}",
            token
        );
    }
}

#[test]
fn test_postgres_vocabulary() {
    let cases = [
        ("character varying", ColumnKind::Text),
        ("boolean", ColumnKind::Boolean),
        ("jsonb", ColumnKind::Json),
        ("timestamp with time zone", ColumnKind::Timestamp),
        ("timestamp(3) without time zone", ColumnKind::Timestamp),
        ("time without time zone", ColumnKind::Time),
        ("double precision", ColumnKind::Float),
        ("uuid", ColumnKind::Text),
        ("bytea", ColumnKind::Binary),
        ("integer", ColumnKind::Integer),
    ];
    for (token, expected) in cases {
        assert_eq!(
            map(Dialect::Postgres, CatalogColumn::new("t", "c", 1, token)).kind,
            expected,
            "token {}",
            token
        );
    }
}

#[test]
fn test_postgres_varchar_length_from_catalog() {
    let mapped = map(
        Dialect::Postgres,
        CatalogColumn::new("t", "c", 1, "character varying").max_length(80),
    );
    assert_eq!(mapped.length, Some(80));
}

#[test]
fn test_unknown_tokens_fall_back_to_text() {
    for (dialect, token) in [
        (Dialect::MySql, "geometry"),
        (Dialect::MySql, "enum('a','b')"),
        (Dialect::Postgres, "USER-DEFINED"),
        (Dialect::Postgres, "tsvector"),
        (Dialect::Postgres, ""),
    ] {
        let mapped = map(dialect, CatalogColumn::new("t", "c", 1, token));
        assert_eq!(mapped.kind, ColumnKind::Text, "token {:?}", token);
        assert!(!mapped.recognized);
    }
}

#[test]
fn test_dialect_tables_are_separate() {
    // Postgres has no tinyint, MySQL has no bytea.
    assert!(!map(Dialect::Postgres, CatalogColumn::new("t", "c", 1, "tinyint(1)")).recognized);
    assert!(!map(Dialect::MySql, CatalogColumn::new("t", "c", 1, "bytea")).recognized);
}
