//! Database worker communication.
//!
//! Catalog queries are executed by a separate worker process that owns the
//! database drivers. This crate only builds SQL text and reads rows back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 schema-introspect (sync caller)                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │     WorkerQueryRunner (current-thread runtime, block_on)  │  │
//! │  │  ┌─────────────────────────────────────────────────────┐  │  │
//! │  │  │               WorkerClient (async)                  │  │  │
//! │  │  │  - Spawns the worker as a child process             │  │  │
//! │  │  │  - NDJSON protocol over stdin/stdout                │  │  │
//! │  │  │  - Request IDs for response correlation             │  │  │
//! │  │  └─────────────────────────────────────────────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │               stdin (NDJSON) │ stdout (NDJSON)                   │
//! └──────────────────────────────┼──────────────────────────────────┘
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                db-worker (long-running child process)           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod client;
mod error;
pub mod protocol;
mod runner;

pub use client::{WorkerClient, DEFAULT_TIMEOUT_SECS};
pub use error::{WorkerError, WorkerResult};
pub use runner::WorkerQueryRunner;
