//! Error types for scenario loading and simulation collaborators

use thiserror::Error;

/// Result type for scenario loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading or validating a scenario file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scenario: {0}")]
    Invalid(String),
}

/// Errors a driver reports about the state it is stepping
#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("satellite {index} has non-finite state at frame {frame}")]
    NonFinite { index: usize, frame: usize },
}
