//! Error types for Pulsehub
//!
//! The store operations themselves are infallible; errors only arise when
//! parsing external strings against the closed sensor vocabulary.

use thiserror::Error;

/// Result type alias for Pulsehub operations
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Main error type for Pulsehub operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
    /// Sensor type is not part of the closed set
    #[error("unknown sensor type: {0}")]
    UnknownSensorType(String),

    /// Quality flag is not part of the closed set
    #[error("unknown quality flag: {0}")]
    UnknownQuality(String),
}
