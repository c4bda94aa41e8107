use crate::starrocks::{
    config::StreamLoadConfig,
    encoder::WireRowEncoder,
    error::{AttemptError, ConfigError, LoadError},
    request::LoadRequest,
    result::StreamLoadResult,
    transport::{HttpTransport, LoadTransport},
};
use engine_core::{
    metrics::{CounterRegistry, LoadMetrics},
    retry::{RetryDisposition, RetryPolicy},
};
use model::{core::identifiers::LoadLabel, records::record::Record};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Created,
    Open,
    Closed,
}

/// Buffers wire rows for one destination table and flushes them through
/// stream load once `batch_size` rows are pending.
///
/// One instance serves one parallel task and is driven from one thread:
/// `open`, then any number of `submit`, then `close`. Flushes block the
/// caller for every attempt. Rows stay buffered until the store confirms
/// them, so a failed flush loses nothing at this layer.
pub struct StreamLoadClient<T = HttpTransport> {
    config: StreamLoadConfig,
    transport: T,
    encoder: WireRowEncoder,
    retry: RetryPolicy,
    rows: Vec<String>,
    metrics: LoadMetrics,
    state: ClientState,
}

impl StreamLoadClient<HttpTransport> {
    pub fn new(config: StreamLoadConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: LoadTransport> StreamLoadClient<T> {
    pub fn with_transport(config: StreamLoadConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            retry: config.retry_policy(),
            rows: Vec::with_capacity(config.batch_size.min(8192)),
            config,
            transport,
            encoder: WireRowEncoder::new(),
            metrics: LoadMetrics::new(),
            state: ClientState::Created,
        })
    }

    /// Opens the transport and hands the row counters to the host registry.
    pub fn open(
        &mut self,
        task_index: usize,
        total_tasks: usize,
        registry: &dyn CounterRegistry,
    ) -> Result<(), LoadError> {
        match self.state {
            ClientState::Created => {}
            ClientState::Open => return Err(LoadError::AlreadyOpen),
            ClientState::Closed => return Err(LoadError::Closed),
        }

        self.transport.open().map_err(LoadError::Open)?;
        self.metrics.register(registry);
        self.state = ClientState::Open;

        info!(
            task_index,
            total_tasks,
            url = %self.config.load_url(),
            batch_size = self.config.batch_size,
            "Stream load client opened"
        );
        Ok(())
    }

    /// Encodes `record` and buffers it, flushing once the batch is full.
    pub fn submit<R: Record + ?Sized>(&mut self, record: &R) -> Result<(), LoadError> {
        self.ensure_open()?;

        let row = self.encoder.encode_record(record);
        self.rows.push(row);

        if self.rows.len() >= self.config.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Sends every buffered row as one stream load.
    ///
    /// The buffer is cleared only after the store reports success. When all
    /// attempts fail the rows are left exactly as they were.
    pub fn flush(&mut self) -> Result<(), LoadError> {
        self.ensure_open()?;
        if self.rows.is_empty() {
            return Ok(());
        }

        let row_count = self.rows.len();
        // Counts attempted sends, not confirmed loads.
        self.metrics.increment_sent(row_count as u64);

        let label = LoadLabel::generate(self.config.label_prefix.as_deref());
        let request = LoadRequest::new(&self.config, label.clone(), &self.rows);
        let start = std::time::Instant::now();

        let transport = &mut self.transport;
        let outcome = self.retry.run(
            |attempt| {
                let result = attempt_load(transport, &request);
                if let Err(err) = &result {
                    warn!(
                        attempt,
                        label = %request.label,
                        error = %err,
                        "Stream load attempt failed"
                    );
                }
                result
            },
            |_: &AttemptError| RetryDisposition::Retry,
        );

        match outcome {
            Ok(result) => {
                self.metrics.increment_imported(result.loaded_rows());
                self.rows.clear();
                info!(
                    label = %label,
                    rows = row_count,
                    loaded = result.loaded_rows(),
                    filtered = result.number_filtered_rows.unwrap_or(0),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Stream load succeeded"
                );
                Ok(())
            }
            Err(err) => {
                let attempts = self.retry.max_attempts;
                let last = err.into_inner();
                warn!(
                    label = %label,
                    rows = row_count,
                    attempts,
                    error = %last,
                    "Stream load failed, rows kept in buffer"
                );
                Err(LoadError::RetriesExhausted {
                    attempts,
                    rows: row_count,
                    label,
                    last,
                })
            }
        }
    }

    /// Flushes what is left and ends the task. A second call does nothing.
    ///
    /// If the final flush fails the client stays open with its rows intact.
    pub fn close(&mut self) -> Result<(), LoadError> {
        match self.state {
            ClientState::Closed => return Ok(()),
            ClientState::Created => {
                self.state = ClientState::Closed;
                return Ok(());
            }
            ClientState::Open => {}
        }

        if !self.rows.is_empty() {
            self.flush()?;
        }
        self.rows.clear();
        self.state = ClientState::Closed;

        let snapshot = self.metrics.snapshot();
        info!(
            rows_sent = snapshot.rows_sent,
            rows_imported = snapshot.rows_imported,
            "Stream load client closed"
        );
        Ok(())
    }

    pub fn buffered_rows(&self) -> &[String] {
        &self.rows
    }

    pub fn metrics(&self) -> &LoadMetrics {
        &self.metrics
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn ensure_open(&self) -> Result<(), LoadError> {
        match self.state {
            ClientState::Open => Ok(()),
            ClientState::Created => Err(LoadError::NotOpen),
            ClientState::Closed => Err(LoadError::Closed),
        }
    }
}

/// One PUT plus interpretation of its response.
fn attempt_load<T: LoadTransport>(
    transport: &mut T,
    request: &LoadRequest,
) -> Result<StreamLoadResult, AttemptError> {
    let response = transport.send(request)?;

    // 200 only says the frontend is healthy; the body decides the load.
    if response.status != 200 || response.body.is_empty() {
        return Err(AttemptError::UnexpectedResponse {
            status: response.status,
            body: response.body,
        });
    }

    let result = StreamLoadResult::parse(response.body.as_bytes()).map_err(|e| {
        AttemptError::Unparseable {
            reason: e.to_string(),
            body: response.body.clone(),
        }
    })?;

    if !result.is_success() {
        return Err(AttemptError::Rejected {
            status: result.status.clone(),
            message: result.message.clone().unwrap_or_default(),
            body: response.body,
        });
    }

    debug!(
        label = %request.label,
        txn_id = ?result.txn_id,
        load_bytes = ?result.load_bytes,
        load_time_ms = ?result.load_time_ms,
        "Stream load attempt confirmed"
    );
    Ok(result)
}
