use crate::starrocks::error::ConfigError;
use engine_core::retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 5000;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Connection and batching parameters for one stream-load destination.
#[derive(Clone, Serialize, Deserialize)]
pub struct StreamLoadConfig {
    /// `host:port` of the frontend HTTP endpoint.
    pub host: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
    pub table: String,
    /// Destination column names, in the order fields appear in each record.
    pub columns: Vec<String>,
    /// Buffered row count that triggers a flush.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Pause between attempts of one flush. Zero retries immediately.
    #[serde(default)]
    pub retry_delay_ms: u64,
    #[serde(default)]
    pub label_prefix: Option<String>,
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl StreamLoadConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        table: impl Into<String>,
        columns: Vec<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            database: database.into(),
            table: table.into(),
            columns,
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: 0,
            label_prefix: None,
            connect_timeout_ms: None,
            request_timeout_ms: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = Some(prefix.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("host", &self.host),
            ("username", &self.username),
            ("database", &self.database),
            ("table", &self.table),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }

        if self.columns.is_empty() {
            return Err(ConfigError::Missing("columns"));
        }
        if let Some(idx) = self.columns.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::BlankColumn(idx));
        }

        if self.batch_size == 0 {
            return Err(ConfigError::NotPositive("batch_size"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NotPositive("max_attempts"));
        }

        Ok(())
    }

    pub fn load_url(&self) -> String {
        format!(
            "http://{}/api/{}/{}/_stream_load",
            self.host, self.database, self.table
        )
    }

    /// Value of the `columns` header.
    pub fn columns_header(&self) -> String {
        self.columns.join(",")
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.retry_delay_ms == 0 {
            return RetryPolicy::immediate(self.max_attempts);
        }
        let delay = Duration::from_millis(self.retry_delay_ms);
        // Flat delay: the cap equals the base so attempts are evenly spaced.
        RetryPolicy::new(self.max_attempts, delay, delay)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl std::fmt::Debug for StreamLoadConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamLoadConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("batch_size", &self.batch_size)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("label_prefix", &self.label_prefix)
            .finish_non_exhaustive()
    }
}
