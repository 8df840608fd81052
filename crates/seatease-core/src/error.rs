//! Error types for simulated driver operations.
//!
//! Every call into the emulator that can fail returns [`Result<T>`]. The
//! variants mirror the failures a real spectrometer driver reports: a busy
//! device, a missing device, a feature the hardware does not have, or an
//! argument outside the device limits.

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a simulated spectrometer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Object handed to the front-end is not a device of the registry in use.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Device is already held open by another owner.
    #[error("Device already opened: {serial_number}")]
    AlreadyOpen { serial_number: String },

    /// No device matched the lookup.
    #[error("{0}")]
    NotFound(String),

    /// Operation is not supported by the simulated hardware.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// Requested integration time lies outside the device limits.
    #[error(
        "Requested integration time ({requested} us) outside limits: ({min} us, {max} us)"
    )]
    IntegrationTimeOutOfRange { requested: u64, min: u64, max: u64 },

    /// Argument outside the values the driver API defines.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Registry configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new type mismatch error.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch(message.into())
    }

    /// Create a new already-open error for the given serial number.
    pub fn already_open(serial_number: impl Into<String>) -> Self {
        Self::AlreadyOpen {
            serial_number: serial_number.into(),
        }
    }

    /// Create a new not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Not-found error raised when every device is already open.
    pub fn no_unopened_device() -> Self {
        Self::not_found("No unopened device found.")
    }

    /// Not-found error raised when no device carries `serial_number`.
    pub fn no_device_with_serial(serial_number: &str) -> Self {
        Self::not_found(format!(
            "No device attached with serial number '{serial_number}'."
        ))
    }

    /// Create a new unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` for errors caused by a feature the device lacks.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
