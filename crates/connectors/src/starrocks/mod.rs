//! StarRocks stream-load sink: batches wire rows in memory and pushes them
//! to `/api/{db}/{table}/_stream_load` over blocking HTTP.

pub mod client;
pub mod config;
pub mod encoder;
pub mod error;
pub mod request;
pub mod result;
pub mod transport;

pub use client::StreamLoadClient;
pub use config::StreamLoadConfig;
pub use error::{AttemptError, ConfigError, LoadError, TransportError};
pub use result::StreamLoadResult;
