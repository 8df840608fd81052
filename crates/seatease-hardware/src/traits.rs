//! Feature traits implemented by spectrometer backends.
//!
//! A driver device exposes its capabilities as a set of features. Each
//! feature kind gets its own trait here; the simulated implementations in
//! [`crate::simulated`] implement them, and a real hardware backend would
//! implement the same traits.
//!
//! All methods take `&self`. Devices are shared as `Arc<SimulatedDevice>`
//! between owners and listings, so implementations keep their mutable state
//! behind interior mutability.
//!
//! # Examples
//!
//! ```
//! use seatease_hardware::traits::SpectrometerFeature;
//! use seatease_core::Result;
//!
//! fn peak_counts<S: SpectrometerFeature>(spectrometer: &S) -> Result<f64> {
//!     let intensities = spectrometer.get_intensities()?;
//!     Ok(intensities.into_iter().fold(f64::MIN, f64::max))
//! }
//! ```

use seatease_core::{IntegrationTimeLimits, Result, TriggerMode};
use std::sync::Arc;

/// Spectrum acquisition capability of a device.
pub trait SpectrometerFeature: Send + Sync {
    /// Wavelength of every pixel in nanometers, in pixel order.
    ///
    /// The axis never changes, so implementations hand out the same shared
    /// buffer on every call.
    fn get_wavelengths(&self) -> Arc<[f64]>;

    /// Acquire one spectrum using the current integration time.
    ///
    /// Blocks the calling thread for the duration of the acquisition.
    fn get_intensities(&self) -> Result<Vec<f64>>;

    /// Saturation ceiling of the detector, in counts.
    fn get_maximum_intensity(&self) -> f64;

    /// Integration time range accepted by the device.
    fn get_integration_time_micros_limits(&self) -> IntegrationTimeLimits;

    /// Set the integration time.
    ///
    /// Low-level drivers are lenient: values outside the limits are clamped
    /// into range rather than rejected.
    fn set_integration_time_micros(&self, integration_time_micros: u64) -> Result<()>;

    /// Indices of optically masked (electric dark) pixels.
    fn get_electric_dark_pixel_indices(&self) -> Vec<usize>;

    /// Select the acquisition trigger mode.
    fn set_trigger_mode(&self, mode: TriggerMode) -> Result<()>;

    /// Number of pixels in one spectrum.
    fn spectrum_length(&self) -> usize {
        self.get_wavelengths().len()
    }
}

/// On-board EEPROM capability of a device.
pub trait EepromFeature: Send + Sync {
    /// Read one EEPROM slot.
    ///
    /// When `strip_zero_bytes` is set, trailing zero padding is removed.
    fn eeprom_read_slot(&self, slot_number: u32, strip_zero_bytes: bool) -> Result<Vec<u8>>;
}
