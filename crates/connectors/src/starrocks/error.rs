use model::core::identifiers::LoadLabel;
use thiserror::Error;

/// Connection parameters rejected at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No {0} supplied")]
    Missing(&'static str),

    #[error("Column name at position {0} is blank")]
    BlankColumn(usize),

    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
}

/// Failures of the HTTP layer itself, before any load outcome is known.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport has not been opened")]
    NotOpen,

    #[error("Invalid load URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Could not reach {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Gave up after {limit} redirects, last target {url}")]
    TooManyRedirects { limit: usize, url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Why a single load attempt did not confirm the batch. Every variant is retried.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected response: status={status} body={body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Unparseable load result: {reason}; body={body}")]
    Unparseable { reason: String, body: String },

    #[error("Load rejected with status {status:?}: {message}; body={body}")]
    Rejected {
        status: Option<String>,
        message: String,
        body: String,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Load client is not open")]
    NotOpen,

    #[error("Load client is already open")]
    AlreadyOpen,

    #[error("Load client is closed")]
    Closed,

    #[error("Failed to open transport: {0}")]
    Open(#[source] TransportError),

    #[error("Stream load of {rows} rows (label {label}) failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: usize,
        rows: usize,
        label: LoadLabel,
        #[source]
        last: AttemptError,
    },
}

impl From<LoadError> for std::io::Error {
    fn from(err: LoadError) -> Self {
        let kind = match err {
            LoadError::NotOpen | LoadError::AlreadyOpen | LoadError::Closed => {
                std::io::ErrorKind::InvalidInput
            }
            LoadError::Open(_) | LoadError::RetriesExhausted { .. } => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
