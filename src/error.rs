//! # Error Types
//!
//! Custom error types for Pad Bridge using `thiserror`.
//!
//! Settings loading never fails (malformed keys are absorbed by
//! [`ControllerSettings::load`](crate::controller::settings::ControllerSettings::load)),
//! so these errors only surface at the outer edges: the report codec, the
//! host output-report path, property-set events and the config file.

use thiserror::Error;

/// Main error type for Pad Bridge
#[derive(Debug, Error)]
pub enum PadBridgeError {
    /// Input report buffer could not be decoded
    #[error("Input report error: {0}")]
    Report(String),

    /// Host request that this device does not handle
    #[error("Unsupported request: {0}")]
    Unsupported(String),

    /// Property-set payload was not a dictionary
    #[error("Bad argument: {0}")]
    BadArgument(String),

    /// Rumble transport failure
    #[error("Rumble transport error: {0}")]
    Rumble(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Pad Bridge
pub type Result<T> = std::result::Result<T, PadBridgeError>;
