//! Device kinds and the measurement parameters that define them.

use seatease_core::IntegrationTimeLimits;
use seatease_core::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of simulated spectrometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeviceKind {
    /// USB2000-like spectrometer with a 4096 pixel CCD.
    #[default]
    #[serde(rename = "usb2000-esk")]
    Usb2000Esk,
}

impl DeviceKind {
    /// Model label reported by devices of this kind.
    pub fn model(&self) -> &'static str {
        match self {
            Self::Usb2000Esk => MODEL_USB2000_ESK,
        }
    }

    /// Measurement parameters of this kind.
    pub fn profile(&self) -> SpectrometerProfile {
        match self {
            Self::Usb2000Esk => SpectrometerProfile::usb2000_esk(),
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model())
    }
}

/// Immutable parameters of a simulated spectrometer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrometerProfile {
    /// Number of detector pixels.
    pub pixels: usize,

    /// First wavelength of the axis (nm, inclusive).
    pub wavelength_start_nm: f64,

    /// Last wavelength of the axis (nm, inclusive).
    pub wavelength_end_nm: f64,

    /// Center of the emission peak (nm).
    pub peak_center_nm: f64,

    /// Denominator of the Gaussian exponent (nm²).
    pub peak_width_nm2: f64,

    /// Divisor applied to the peak before scaling by integration time.
    pub peak_amplitude_divisor: f64,

    /// Exclusive upper bound of uniform noise (counts).
    pub noise_amplitude: f64,

    /// Constant offset (counts).
    pub baseline_counts: f64,

    /// Saturation ceiling (counts).
    pub max_intensity: f64,

    /// Accepted integration time range.
    pub integration_time_limits: IntegrationTimeLimits,

    /// Integration time after power-up.
    pub default_integration_time_micros: u64,
}

impl SpectrometerProfile {
    /// Profile of the reference USB2000-like device.
    pub fn usb2000_esk() -> Self {
        Self {
            pixels: PIXEL_COUNT,
            wavelength_start_nm: WAVELENGTH_START_NM,
            wavelength_end_nm: WAVELENGTH_END_NM,
            peak_center_nm: PEAK_CENTER_NM,
            peak_width_nm2: PEAK_WIDTH_NM2,
            peak_amplitude_divisor: PEAK_AMPLITUDE_DIVISOR,
            noise_amplitude: NOISE_AMPLITUDE,
            baseline_counts: BASELINE_COUNTS,
            max_intensity: MAX_INTENSITY,
            integration_time_limits: IntegrationTimeLimits::default(),
            default_integration_time_micros: DEFAULT_INTEGRATION_TIME_MICROS,
        }
    }

    /// Linearly spaced wavelength axis with both endpoints included.
    pub fn wavelengths(&self) -> Vec<f64> {
        match self.pixels {
            0 => Vec::new(),
            1 => vec![self.wavelength_start_nm],
            n => {
                let span = self.wavelength_end_nm - self.wavelength_start_nm;
                let last = n - 1;
                (0..n)
                    .map(|i| {
                        if i == last {
                            self.wavelength_end_nm
                        } else {
                            self.wavelength_start_nm + span * (i as f64) / (last as f64)
                        }
                    })
                    .collect()
            }
        }
    }

    /// Signal per microsecond of integration at wavelength `nm`.
    pub fn peak_response(&self, nm: f64) -> f64 {
        let offset = nm - self.peak_center_nm;
        (-(offset * offset) / self.peak_width_nm2).exp() / self.peak_amplitude_divisor
    }
}

impl Default for SpectrometerProfile {
    fn default() -> Self {
        Self::usb2000_esk()
    }
}
