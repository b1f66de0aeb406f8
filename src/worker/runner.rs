//! Blocking query runner backed by the worker process.

use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::client::WorkerClient;
use super::error::{WorkerError, WorkerResult};
use super::protocol::ConnectionParams;
use crate::catalog::{CatalogResult, QueryRows, QueryRunner};
use crate::config::{ConnectionConfig, Settings};

/// [`QueryRunner`] that sends each catalog query to the worker.
///
/// Owns a single-threaded tokio runtime and blocks on every request, so
/// callers stay synchronous. Must not be used from inside another runtime.
pub struct WorkerQueryRunner {
    // Dropped before the runtime so the child is killed while it still runs.
    client: WorkerClient,
    connection: ConnectionParams,
    runtime: Runtime,
}

impl WorkerQueryRunner {
    /// Spawn the worker configured in `settings` for one connection.
    pub fn connect(config: &ConnectionConfig, settings: &Settings) -> WorkerResult<Self> {
        let runtime = Self::runtime()?;
        let client = runtime.block_on(WorkerClient::spawn_with_settings(settings))?;
        Ok(Self::with_client(runtime, client, config))
    }

    /// Spawn a worker from an explicit path.
    pub fn spawn(
        worker_path: &std::path::Path,
        config: &ConnectionConfig,
        timeout: Duration,
    ) -> WorkerResult<Self> {
        let runtime = Self::runtime()?;
        let client = runtime.block_on(WorkerClient::spawn_with_args_and_timeout(
            worker_path,
            &[],
            timeout,
        ))?;
        Ok(Self::with_client(runtime, client, config))
    }

    fn runtime() -> WorkerResult<Runtime> {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WorkerError::Runtime)
    }

    fn with_client(runtime: Runtime, client: WorkerClient, config: &ConnectionConfig) -> Self {
        Self {
            runtime,
            client,
            connection: ConnectionParams {
                driver: config.driver_name().to_string(),
                connection_string: config.to_connection_string(),
            },
        }
    }

    /// Get the driver name sent with each request.
    pub fn driver(&self) -> &str {
        &self.connection.driver
    }

    /// Whether the worker process is still running.
    pub fn is_alive(&self) -> bool {
        self.client.is_alive()
    }
}

impl QueryRunner for WorkerQueryRunner {
    fn query(&self, sql: &str, args: &[serde_json::Value]) -> CatalogResult<QueryRows> {
        debug!(driver = %self.connection.driver, args = args.len(), "executing catalog query");
        let response = self.runtime.block_on(self.client.execute_query(
            &self.connection,
            sql,
            args.to_vec(),
        ))?;

        Ok(QueryRows::new(
            response.columns.into_iter().map(|c| c.name).collect(),
            response.rows,
        ))
    }
}

impl std::fmt::Debug for WorkerQueryRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerQueryRunner")
            .field("driver", &self.connection.driver)
            .field("timeout", &self.client.timeout())
            .finish()
    }
}
