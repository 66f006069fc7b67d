//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid config file")]
    Parse(#[from] toml::de::Error),
}
