//! Async client for the database worker process.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use super::error::{WorkerError, WorkerResult};
use super::protocol::{
    methods, ConnectionParams, ErrorInfo, ExecuteQueryParams, ExecuteQueryResponse,
    RequestEnvelope, ResponseEnvelope,
};
use crate::config::Settings;

/// Default timeout for requests (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>;

/// Async client for the database worker.
///
/// The worker runs as a child process and speaks NDJSON over stdin/stdout.
/// Each request carries a unique ID so responses can be matched even when
/// they arrive out of order.
///
/// # Example
///
/// ```ignore
/// use schema_introspect::worker::WorkerClient;
///
/// let client = WorkerClient::spawn("./db-worker").await?;
/// let response = client.execute_query(&connection, "SELECT 1", vec![]).await?;
/// ```
pub struct WorkerClient {
    /// Writer for sending requests to worker stdin.
    stdin: Arc<Mutex<BufWriter<ChildStdin>>>,

    /// Map of pending request IDs to response channels.
    pending: PendingMap,

    /// Handle to the worker child process.
    _child: Child,

    /// Handle to the background reader task.
    reader_task: tokio::task::JoinHandle<()>,

    /// Request timeout duration.
    timeout: Duration,
}

impl WorkerClient {
    /// Spawn a worker with no arguments and the default timeout.
    pub async fn spawn<P: AsRef<Path>>(worker_path: P) -> WorkerResult<Self> {
        Self::spawn_with_args_and_timeout(
            worker_path,
            &[],
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .await
    }

    /// Spawn a worker using the `[worker]` settings.
    pub async fn spawn_with_settings(settings: &Settings) -> WorkerResult<Self> {
        let worker_path = settings.worker_path()?.ok_or(WorkerError::NotFound)?;
        Self::spawn_with_args_and_timeout(
            &worker_path,
            &settings.worker.args,
            Duration::from_secs(settings.worker.timeout_secs),
        )
        .await
    }

    /// Spawn a worker with arguments and custom timeout.
    ///
    /// Must be called from inside a tokio runtime: the response reader is
    /// spawned as a task on it.
    pub async fn spawn_with_args_and_timeout<P: AsRef<Path>>(
        worker_path: P,
        args: &[String],
        timeout: Duration,
    ) -> WorkerResult<Self> {
        debug!(path = %worker_path.as_ref().display(), "spawning database worker");

        let mut child = Command::new(worker_path.as_ref())
            .args(args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(WorkerError::SpawnFailed)?;

        let stdin = child
            .stdin
            .take()
            .ok_or(WorkerError::PipeUnavailable("stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or(WorkerError::PipeUnavailable("stdout"))?;

        let stdin = Arc::new(Mutex::new(BufWriter::new(stdin)));
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let reader_task = Self::spawn_reader_task(stdout, pending.clone());

        Ok(Self {
            stdin,
            pending,
            _child: child,
            reader_task,
            timeout,
        })
    }

    /// Spawn the background task that reads responses from the worker.
    fn spawn_reader_task(stdout: ChildStdout, pending: PendingMap) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => break,
                    Ok(_) => match serde_json::from_str::<ResponseEnvelope>(&line) {
                        Ok(resp) => {
                            let mut pending = pending.lock().await;
                            if let Some(tx) = pending.remove(&resp.id) {
                                let _ = tx.send(resp);
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "worker sent an unparseable response line");
                        }
                    },
                    Err(e) => {
                        warn!(error = %e, "worker read error");
                        break;
                    }
                }
            }

            // Worker exited: fail every request still waiting.
            let mut pending = pending.lock().await;
            for (id, tx) in pending.drain() {
                let _ = tx.send(ResponseEnvelope {
                    id,
                    success: false,
                    result: None,
                    error: Some(ErrorInfo {
                        code: "WORKER_EXITED".to_string(),
                        message: "Worker process exited unexpectedly".to_string(),
                    }),
                });
            }
        })
    }

    /// Send a request to the worker and wait for a response.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Serialization fails
    /// - Writing to the worker fails
    /// - The request times out
    /// - The worker returns an error response
    /// - Deserialization of the response fails
    pub async fn request<P, R>(&self, method: &str, params: P) -> WorkerResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = uuid::Uuid::new_v4().to_string();

        let request = RequestEnvelope {
            id: id.clone(),
            method: method.to_string(),
            params: serde_json::to_value(params).map_err(WorkerError::SerializeFailed)?,
        };

        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), tx);
        }

        if let Err(e) = self.send_line(&request).await {
            self.pending.lock().await.remove(&id);
            return Err(e);
        }

        let response = match tokio::time::timeout(self.timeout, rx).await {
            Ok(received) => received?,
            Err(_) => {
                // Drop the pending entry so a late response is discarded.
                self.pending.lock().await.remove(&id);
                return Err(WorkerError::Timeout(self.timeout.as_secs()));
            }
        };

        if response.success {
            let result = response.result.unwrap_or(serde_json::Value::Null);
            serde_json::from_value(result).map_err(WorkerError::DeserializeFailed)
        } else {
            let error = response.error.unwrap_or_else(|| ErrorInfo {
                code: "UNKNOWN".to_string(),
                message: "Unknown error".to_string(),
            });
            Err(WorkerError::classify(&error.code, &error.message))
        }
    }

    /// Write one request line to the worker's stdin.
    async fn send_line(&self, request: &RequestEnvelope) -> WorkerResult<()> {
        let line = serde_json::to_string(request).map_err(WorkerError::SerializeFailed)? + "\n";
        let mut stdin = self.stdin.lock().await;
        stdin
            .write_all(line.as_bytes())
            .await
            .map_err(WorkerError::WriteFailed)?;
        stdin.flush().await.map_err(WorkerError::WriteFailed)
    }

    /// Execute a SQL query with positional arguments.
    pub async fn execute_query(
        &self,
        connection: &ConnectionParams,
        sql: &str,
        args: Vec<serde_json::Value>,
    ) -> WorkerResult<ExecuteQueryResponse> {
        self.request(
            methods::EXECUTE_QUERY,
            ExecuteQueryParams {
                connection: connection.clone(),
                sql: sql.to_string(),
                args: if args.is_empty() { None } else { Some(args) },
            },
        )
        .await
    }

    /// Whether the response reader is still running.
    pub fn is_alive(&self) -> bool {
        !self.reader_task.is_finished()
    }

    /// Get the current request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
