//! PostgreSQL catalog dialect.
//!
//! PostgreSQL catalog differences:
//! - `information_schema.columns.data_type` uses SQL-standard spellings
//!   (`character varying`, `timestamp without time zone`)
//! - Native `boolean`; no display-width tricks
//! - Key membership is not on the column row and has to be joined from
//!   `key_column_usage` + `table_constraints`
//! - Auto-increment shows up as an identity column or a `nextval(...)` default
//! - Foreign keys are read from `pg_constraint`, pairing `conkey`/`confkey`
//!   positionally so composite keys map column to column

use super::CatalogDialect;
use crate::schema::{ColumnKind, Refinement, TypeEntry};

/// PostgreSQL catalog dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

static POSTGRES_TYPES: &[TypeEntry] = &[
    TypeEntry::new("character varying", ColumnKind::Text, Refinement::Length),
    TypeEntry::new("varchar", ColumnKind::Text, Refinement::Length),
    TypeEntry::new("character", ColumnKind::Text, Refinement::Length),
    TypeEntry::new("char", ColumnKind::Text, Refinement::Length),
    TypeEntry::new("text", ColumnKind::Text, Refinement::None),
    TypeEntry::new("uuid", ColumnKind::Text, Refinement::None),
    TypeEntry::new("smallint", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("integer", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("int", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("int2", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("int4", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("serial", ColumnKind::Integer, Refinement::None),
    TypeEntry::new("bigint", ColumnKind::Integer, Refinement::Precision),
    TypeEntry::new("int8", ColumnKind::Integer, Refinement::Precision),
    TypeEntry::new("bigserial", ColumnKind::Integer, Refinement::Precision),
    TypeEntry::new("numeric", ColumnKind::Decimal, Refinement::PrecisionScale),
    TypeEntry::new("decimal", ColumnKind::Decimal, Refinement::PrecisionScale),
    TypeEntry::new("real", ColumnKind::Float, Refinement::None),
    TypeEntry::new("float4", ColumnKind::Float, Refinement::None),
    TypeEntry::new("double precision", ColumnKind::Float, Refinement::None),
    TypeEntry::new("float8", ColumnKind::Float, Refinement::None),
    TypeEntry::new("boolean", ColumnKind::Boolean, Refinement::None),
    TypeEntry::new("bool", ColumnKind::Boolean, Refinement::None),
    TypeEntry::new("json", ColumnKind::Json, Refinement::None),
    TypeEntry::new("jsonb", ColumnKind::Json, Refinement::None),
    TypeEntry::new("date", ColumnKind::Date, Refinement::None),
    TypeEntry::new("timestamp", ColumnKind::Timestamp, Refinement::None),
    TypeEntry::new("timestamp without time zone", ColumnKind::Timestamp, Refinement::None),
    TypeEntry::new("timestamp with time zone", ColumnKind::Timestamp, Refinement::None),
    TypeEntry::new("timestamptz", ColumnKind::Timestamp, Refinement::None),
    TypeEntry::new("time", ColumnKind::Time, Refinement::None),
    TypeEntry::new("time without time zone", ColumnKind::Time, Refinement::None),
    TypeEntry::new("time with time zone", ColumnKind::Time, Refinement::None),
    TypeEntry::new("bytea", ColumnKind::Binary, Refinement::None),
];

impl CatalogDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn default_port(&self) -> u16 {
        5432
    }

    fn default_namespace(&self) -> Option<&'static str> {
        Some("public")
    }

    fn columns_query(&self, filter_table: bool) -> String {
        // PRIMARY KEY wins over UNIQUE when a column sits in both, and the
        // scalar subquery keeps exactly one row per column.
        let mut sql = String::from(
            "SELECT \
                c.table_name, \
                c.column_name, \
                c.ordinal_position, \
                c.data_type, \
                c.character_maximum_length, \
                c.numeric_precision, \
                c.numeric_scale, \
                c.is_nullable, \
                c.column_default, \
                ( \
                    SELECT CASE \
                        WHEN bool_or(tc.constraint_type = 'PRIMARY KEY') THEN 'PRIMARY KEY' \
                        WHEN bool_or(tc.constraint_type = 'UNIQUE') THEN 'UNIQUE' \
                    END \
                    FROM information_schema.key_column_usage kcu \
                    JOIN information_schema.table_constraints tc \
                        ON tc.constraint_schema = kcu.constraint_schema \
                        AND tc.constraint_name = kcu.constraint_name \
                        AND tc.table_name = kcu.table_name \
                    WHERE kcu.table_schema = c.table_schema \
                        AND kcu.table_name = c.table_name \
                        AND kcu.column_name = c.column_name \
                ) AS constraint_type, \
                CASE \
                    WHEN c.is_identity = 'YES' OR c.column_default LIKE 'nextval(%' \
                        THEN 'auto_increment' \
                    ELSE '' \
                END AS extra \
            FROM information_schema.columns c \
            WHERE c.table_schema = $1",
        );
        if filter_table {
            sql.push_str(" AND c.table_name = $2");
        }
        sql.push_str(" ORDER BY c.table_name ASC, c.ordinal_position ASC");
        sql
    }

    fn foreign_keys_query(&self) -> String {
        "SELECT \
            c.conname AS constraint_name, \
            cl.relname AS table_name, \
            a.attname AS column_name, \
            clf.relname AS foreign_table_name, \
            af.attname AS foreign_column_name \
        FROM pg_constraint AS c \
        JOIN pg_class AS cl ON c.conrelid = cl.oid \
        JOIN pg_namespace AS n ON cl.relnamespace = n.oid \
        JOIN pg_class AS clf ON c.confrelid = clf.oid \
        JOIN pg_namespace AS nf ON clf.relnamespace = nf.oid \
        CROSS JOIN LATERAL unnest(c.conkey, c.confkey) AS k(attnum, fattnum) \
        JOIN pg_attribute AS a ON a.attrelid = cl.oid AND a.attnum = k.attnum \
        JOIN pg_attribute AS af ON af.attrelid = clf.oid AND af.attnum = k.fattnum \
        WHERE c.contype = 'f' \
            AND n.nspname = $1 \
            AND nf.nspname = $1 \
        ORDER BY cl.relname ASC, c.conname ASC, a.attnum ASC"
            .to_string()
    }

    fn type_table(&self) -> &'static [TypeEntry] {
        POSTGRES_TYPES
    }

    fn default_excluded_names(&self) -> &'static [&'static str] {
        // PostGIS reference table installed into the user namespace
        &["spatial_ref_sys"]
    }

    fn default_excluded_prefixes(&self) -> &'static [&'static str] {
        &["pg_"]
    }
}
