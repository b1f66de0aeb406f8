//! Extraction pipeline and the connection-level [`Introspector`].
//!
//! One extraction is a single sequential flow:
//!
//! 1. list columns (one bulk catalog query)
//! 2. build tables
//! 3. list foreign keys (one bulk catalog query)
//! 4. resolve relationships
//! 5. assemble the schema, applying exclusions
//!
//! Nothing is cached between calls. A failed run is retried from the top.

use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::catalog::{CatalogFilter, CatalogReader, CatalogResult, QueryRunner, SqlCatalogReader};
use crate::config::{ConnectionConfig, Settings};
use crate::dialect::Dialect;
use crate::error::IntrospectResult;
use crate::schema::{assemble, build_relationships, build_tables, ExclusionSet, NamingOptions, Schema};
use crate::worker::WorkerQueryRunner;

/// Options for one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Tables kept out of the schema.
    pub exclusions: ExclusionSet,
    pub naming: NamingOptions,
}

impl ExtractOptions {
    /// Defaults for a dialect: its administrative tables are excluded.
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            exclusions: ExclusionSet::for_dialect(dialect),
            naming: NamingOptions::default(),
        }
    }

    /// Exclude one more table by name.
    pub fn exclude(mut self, table: impl Into<String>) -> Self {
        self.exclusions.insert_name(table);
        self
    }

    /// Exclude every table with a prefix.
    pub fn exclude_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exclusions.insert_prefix(prefix);
        self
    }

    pub fn with_naming(mut self, naming: NamingOptions) -> Self {
        self.naming = naming;
        self
    }
}

/// Run the extraction pipeline against any catalog reader.
///
/// With `table` set, only that table is built; its foreign keys to other
/// tables are dangling in that case and produce no relationships.
#[instrument(skip(reader, options))]
pub fn extract_schema(
    reader: &dyn CatalogReader,
    dialect: Dialect,
    options: &ExtractOptions,
    table: Option<&str>,
) -> CatalogResult<Schema> {
    let start = Instant::now();

    let mut filter = CatalogFilter::new(options.exclusions.clone());
    if let Some(table) = table {
        filter = filter.with_table(table);
    }

    let columns = reader.list_columns(&filter)?;
    let tables = build_tables(&columns, dialect);
    debug!(
        tables = tables.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "tables built"
    );

    let edges = reader.list_foreign_keys()?;
    let relationships = build_relationships(&tables, &edges, &options.naming);
    debug!(
        edges = edges.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "relationships resolved"
    );

    let schema = assemble(tables, relationships, &options.exclusions);
    info!(
        tables = schema.tables().len(),
        relationships = schema.relationship_count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "schema extracted"
    );
    Ok(schema)
}

/// Extracts schemas from one configured database connection.
///
/// Construction validates the configuration before anything touches the
/// network; each extraction then runs two catalog queries.
#[derive(Debug)]
pub struct Introspector<R> {
    config: ConnectionConfig,
    dialect: Dialect,
    reader: SqlCatalogReader<R>,
    options: ExtractOptions,
}

impl<R: QueryRunner> Introspector<R> {
    /// Create an introspector over an existing query runner.
    ///
    /// The dialect comes from the configured driver. Fails if the
    /// configuration is incomplete.
    pub fn new(config: ConnectionConfig, runner: R) -> IntrospectResult<Self> {
        config.validate()?;
        let dialect = config.driver.dialect();
        let reader = SqlCatalogReader::new(runner, dialect, config.effective_schema());
        Ok(Self {
            config,
            dialect,
            reader,
            options: ExtractOptions::for_dialect(dialect),
        })
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Extract the whole namespace.
    pub fn extract_schema(&self) -> IntrospectResult<Schema> {
        Ok(extract_schema(&self.reader, self.dialect, &self.options, None)?)
    }

    /// Extract a single table.
    pub fn extract_table(&self, table: &str) -> IntrospectResult<Schema> {
        Ok(extract_schema(
            &self.reader,
            self.dialect,
            &self.options,
            Some(table),
        )?)
    }

    /// The query runner, for callers that want to reuse the session.
    pub fn runner(&self) -> &R {
        self.reader.runner()
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }
}

impl Introspector<WorkerQueryRunner> {
    /// Validate the configuration, then spawn the worker from `settings`.
    ///
    /// Options come from the `[introspection]` settings.
    pub fn connect(config: ConnectionConfig, settings: &Settings) -> IntrospectResult<Self> {
        config.validate()?;
        let runner = WorkerQueryRunner::connect(&config, settings)?;
        let options = settings
            .introspection
            .to_options(config.driver.dialect());
        Ok(Self::new(config, runner)?.with_options(options))
    }
}
