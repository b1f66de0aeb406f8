//! # schema-introspect
//!
//! Reconstructs a typed relational schema and its relationship graph from a
//! live database catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        ConnectionConfig / Settings (introspect.toml)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validate, spawn worker]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Catalog Reader                           │
//! │   bulk column listing + bulk foreign-key listing         │
//! │   (dialect SQL through a QueryRunner, or a JSON dump)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [type mapper, table builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Tables (typed columns, flags)               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [relationship resolver]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Relationships (belongs-to / has-many pairs)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [assembler: exclusions]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Schema (read-only)                       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use schema_introspect::prelude::*;
//!
//! let settings = Settings::load()?;
//! let config = ConnectionConfig::from_env()?;
//! let introspector = Introspector::connect(config, &settings)?;
//!
//! let schema = introspector.extract_schema()?;
//! for rel in schema.relationships_of("book") {
//!     println!("{} -> {}", rel.field_name, rel.target_table);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod dialect;
pub mod error;
pub mod introspect;
pub mod schema;
pub mod worker;

pub use error::{IntrospectError, IntrospectResult};
pub use introspect::{extract_schema, ExtractOptions, Introspector};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{
        CatalogColumn, CatalogReader, ForeignKeyEdge, QueryRows, QueryRunner, StaticCatalog,
    };
    pub use crate::config::{ConnectionConfig, Driver, Settings};
    pub use crate::dialect::Dialect;
    pub use crate::error::{IntrospectError, IntrospectResult};
    pub use crate::introspect::{extract_schema, ExtractOptions, Introspector};
    pub use crate::schema::{
        ColumnDescriptor, ColumnKind, ExclusionSet, NamingOptions, RelationshipDescriptor,
        RelationshipKind, Schema, SchemaConsumer, SummaryConsumer, TableDescriptor,
    };
}
