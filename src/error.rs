//! Error types for the pusher core

use thiserror::Error;

/// Pusher core error type
///
/// Only configuration, lifecycle and sensor-shape checks can fail. Perception,
/// planning and placement degrade instead of erroring.
#[derive(Error, Debug)]
pub enum PusherError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown placement region: {0}")]
    UnknownPlacementRegion(String),

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    #[error("Sensor error: {0}")]
    Sensor(String),
}

impl From<toml::de::Error> for PusherError {
    fn from(e: toml::de::Error) -> Self {
        PusherError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PusherError>;
