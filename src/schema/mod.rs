//! Schema reconstruction.
//!
//! Turns normalized catalog rows into a typed [`Schema`]:
//!
//! ```text
//! CatalogColumn stream ──► type_mapper ──► table_builder ──┐
//!                                                          ├──► assembler ──► Schema
//! ForeignKeyEdge list ─────────────────► relationships ────┘
//! ```
//!
//! Every stage is a pure function of its inputs. Nothing here performs I/O
//! or returns an error: unknown types fall back to text, dangling foreign keys
//! are dropped and field-name clashes are renamed.

mod assembler;
mod consumer;
pub mod inflection;
pub mod naming;
mod relationships;
mod table_builder;
mod type_mapper;
mod types;

pub use assembler::{assemble, ExclusionSet};
pub use consumer::{SchemaConsumer, SummaryConsumer};
pub use naming::NamingOptions;
pub use relationships::build_relationships;
pub use table_builder::{build_column, build_table, build_tables};
pub use type_mapper::{lookup, map_type, MappedType, Refinement, TypeEntry};
pub use types::{
    ColumnDescriptor, ColumnKind, RelationshipDescriptor, RelationshipKind, RelationshipMap,
    Schema, TableDescriptor,
};
