use crate::{
    Result,
    constants::{MAX_INTEGRATION_TIME_MICROS, MIN_INTEGRATION_TIME_MICROS},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive integration time range of a device, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegrationTimeLimits {
    /// Shortest accepted integration time.
    pub min_micros: u64,
    /// Longest accepted integration time.
    pub max_micros: u64,
}

impl IntegrationTimeLimits {
    /// Create new limits.
    ///
    /// # Errors
    /// Returns `Error::Config` if `min_micros` is greater than `max_micros`.
    pub fn new(min_micros: u64, max_micros: u64) -> Result<Self> {
        if min_micros > max_micros {
            return Err(Error::config(format!(
                "Integration time minimum ({min_micros} us) exceeds maximum ({max_micros} us)"
            )));
        }
        Ok(Self {
            min_micros,
            max_micros,
        })
    }

    /// Clamp a requested integration time into these limits.
    #[must_use]
    pub fn clamp(&self, micros: u64) -> u64 {
        micros.clamp(self.min_micros, self.max_micros)
    }

    /// Check whether `micros` lies inside the limits.
    #[must_use]
    pub fn contains(&self, micros: u64) -> bool {
        self.clamp(micros) == micros
    }

    /// The limits as a `(min, max)` tuple.
    #[must_use]
    pub fn as_tuple(&self) -> (u64, u64) {
        (self.min_micros, self.max_micros)
    }
}

impl Default for IntegrationTimeLimits {
    fn default() -> Self {
        Self {
            min_micros: MIN_INTEGRATION_TIME_MICROS,
            max_micros: MAX_INTEGRATION_TIME_MICROS,
        }
    }
}

impl fmt::Display for IntegrationTimeLimits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} us, {} us)", self.min_micros, self.max_micros)
    }
}

/// Acquisition trigger modes understood by spectrometer drivers.
///
/// The numeric codes follow the usual Ocean Optics numbering. The
/// simulated device accepts none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// Free-running acquisition.
    Normal,
    /// Acquisition started by a software command.
    Software,
    /// Integration synchronized to an external clock.
    ExternalSynchronization,
    /// Acquisition started by an external hardware edge.
    ExternalHardware,
}

impl TriggerMode {
    /// Numeric trigger code used by driver libraries.
    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            TriggerMode::Normal => 0,
            TriggerMode::Software => 1,
            TriggerMode::ExternalSynchronization => 2,
            TriggerMode::ExternalHardware => 3,
        }
    }
}

impl TryFrom<u8> for TriggerMode {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(TriggerMode::Normal),
            1 => Ok(TriggerMode::Software),
            2 => Ok(TriggerMode::ExternalSynchronization),
            3 => Ok(TriggerMode::ExternalHardware),
            other => Err(Error::invalid_argument(format!("Unknown trigger mode code {other}"))),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TriggerMode::Normal => "normal",
            TriggerMode::Software => "software",
            TriggerMode::ExternalSynchronization => "external synchronization",
            TriggerMode::ExternalHardware => "external hardware",
        };
        write!(f, "{name}")
    }
}

/// Static description of a simulated device.
///
/// Produced by the hardware crate for listings and serialized by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device serial number.
    pub serial_number: String,

    /// Model label (e.g., "USB2000-esk").
    pub model: String,

    /// Whether the device is currently held open.
    pub is_open: bool,

    /// Number of detector pixels.
    pub pixels: usize,
}

impl DeviceInfo {
    /// Create a new DeviceInfo for a closed device.
    pub fn new(serial_number: impl Into<String>, model: impl Into<String>, pixels: usize) -> Self {
        Self {
            serial_number: serial_number.into(),
            model: model.into(),
            is_open: false,
            pixels,
        }
    }

    /// Set the open flag.
    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }
}
