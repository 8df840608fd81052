//! Constants describing the reference simulated spectrometer.
//!
//! The emulator ships a single device model that behaves like a USB2000
//! spectrometer: a 4096 pixel CCD covering roughly 300-1000 nm with a
//! maximum count of about 4000. The simulated light source is a single
//! emission peak at 500 nm (think photoluminescence from a quantum dot).
//!
//! # Intensity Model
//!
//! For a wavelength `w` (nm) and integration time `t` (µs) each pixel reads
//!
//! ```text
//! clip(exp(-(w - 500)^2 / 20) / 100 * t + U[0, 10) + 100, 0, 4000)
//! ```
//!
//! # Usage
//!
//! ```
//! use seatease_core::constants::*;
//!
//! let in_range = |micros: u64| {
//!     (MIN_INTEGRATION_TIME_MICROS..=MAX_INTEGRATION_TIME_MICROS).contains(&micros)
//! };
//! assert!(in_range(DEFAULT_INTEGRATION_TIME_MICROS));
//! assert!(!in_range(2_999));
//! ```

// ============================================================================
// Identity
// ============================================================================

/// Model label reported by the reference simulated device.
pub const MODEL_USB2000_ESK: &str = "USB2000-esk";

/// Serial number of the device in the default registry.
pub const DEFAULT_SERIAL_NUMBER: &str = "1";

// ============================================================================
// Wavelength Axis
// ============================================================================

/// Number of pixels on the simulated detector.
pub const PIXEL_COUNT: usize = 4096;

/// First wavelength of the axis in nanometers (inclusive).
pub const WAVELENGTH_START_NM: f64 = 300.0;

/// Last wavelength of the axis in nanometers (inclusive).
pub const WAVELENGTH_END_NM: f64 = 1000.0;

// ============================================================================
// Intensity Model
// ============================================================================

/// Center of the simulated emission peak in nanometers.
pub const PEAK_CENTER_NM: f64 = 500.0;

/// Denominator of the Gaussian exponent, in nm².
///
/// A value of 20 gives a full width at half maximum of about 7.4 nm.
pub const PEAK_WIDTH_NM2: f64 = 20.0;

/// Divisor applied to the peak shape before scaling by integration time.
pub const PEAK_AMPLITUDE_DIVISOR: f64 = 100.0;

/// Upper (exclusive) bound of the uniform per-pixel noise, in counts.
pub const NOISE_AMPLITUDE: f64 = 10.0;

/// Constant offset added to every pixel, in counts.
pub const BASELINE_COUNTS: f64 = 100.0;

/// Saturation ceiling of the detector, in counts.
pub const MAX_INTENSITY: f64 = 4000.0;

// ============================================================================
// Integration Time
// ============================================================================

/// Shortest supported integration time (3 ms).
pub const MIN_INTEGRATION_TIME_MICROS: u64 = 3_000;

/// Longest supported integration time (20 s).
pub const MAX_INTEGRATION_TIME_MICROS: u64 = 20_000_000;

/// Integration time a freshly created device starts with (100 ms).
pub const DEFAULT_INTEGRATION_TIME_MICROS: u64 = 100_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_time_bounds_ordered() {
        assert!(MIN_INTEGRATION_TIME_MICROS < DEFAULT_INTEGRATION_TIME_MICROS);
        assert!(DEFAULT_INTEGRATION_TIME_MICROS < MAX_INTEGRATION_TIME_MICROS);
    }

    #[test]
    fn test_wavelength_axis_bounds() {
        assert!(WAVELENGTH_START_NM < PEAK_CENTER_NM);
        assert!(PEAK_CENTER_NM < WAVELENGTH_END_NM);
    }

    #[test]
    fn test_baseline_plus_noise_below_ceiling() {
        assert!(BASELINE_COUNTS + NOISE_AMPLITUDE < MAX_INTENSITY);
    }
}
