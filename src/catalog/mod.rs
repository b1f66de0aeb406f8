//! Catalog reader.
//!
//! Reads raw column and foreign-key rows from a database catalog. Two
//! implementations of [`CatalogReader`] exist:
//!
//! - [`SqlCatalogReader`] issues the dialect's bulk catalog queries through
//!   any [`QueryRunner`] (normally the database worker)
//! - [`StaticCatalog`] serves rows held in memory or loaded from a JSON dump
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                CatalogReader                  │
//! │   list_columns(filter)   list_foreign_keys()  │
//! └───────────────┬───────────────────┬───────────┘
//!                 │                   │
//!                 ▼                   ▼
//! ┌───────────────────────────┐ ┌───────────────┐
//! │ SqlCatalogReader<R>       │ │ StaticCatalog │
//! │  dialect SQL + QueryRunner│ │  (JSON dump)  │
//! └───────────────┬───────────┘ └───────────────┘
//!                 ▼
//!        WorkerQueryRunner / any QueryRunner
//! ```

mod error;
mod reader;
mod rows;
mod sql_reader;
mod static_catalog;
mod types;

pub use error::{CatalogError, CatalogResult};
pub use reader::{CatalogFilter, CatalogReader, QueryRunner};
pub use rows::{QueryRows, Record};
pub use sql_reader::SqlCatalogReader;
pub use static_catalog::StaticCatalog;
pub use types::{CatalogColumn, ConstraintKind, ForeignKeyEdge};
