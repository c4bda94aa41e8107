use connectors::starrocks::error::{ConfigError, LoadError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to deserialize the configuration file as JSON: {0}")]
    ConfigDeserialize(#[from] serde_json::Error),

    #[error("Invalid stream load configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid env file: {0}")]
    Env(String),

    #[error("Failed to read input rows: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid delimiter '{0}', expected a single ASCII character")]
    InvalidDelimiter(String),

    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
