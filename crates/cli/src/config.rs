use crate::{
    env::{EnvManager, PASSWORD_VAR},
    error::CliError,
};
use connectors::starrocks::StreamLoadConfig;
use std::path::Path;

/// Reads a JSON config file and fills a missing password from the environment.
pub fn load_config(path: impl AsRef<Path>, env: &EnvManager) -> Result<StreamLoadConfig, CliError> {
    let source = std::fs::read_to_string(path)?;
    let mut config: StreamLoadConfig = serde_json::from_str(&source)?;

    if config.password.is_empty()
        && let Some(password) = env.get(PASSWORD_VAR)
    {
        config.password = password.to_string();
    }

    config.validate()?;
    Ok(config)
}
