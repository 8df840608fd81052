//! Simulated spectrometer feature.
//!
//! The simulated device "measures" a single emission peak at 500 nm with a
//! FWHM of a few nanometers. Counts scale linearly with the integration
//! time, sit on a constant baseline, carry uniform noise, and saturate at
//! the detector ceiling.
//!
//! # Examples
//!
//! ```
//! use seatease_hardware::simulated::SimulatedSpectrometer;
//! use seatease_hardware::traits::SpectrometerFeature;
//! use seatease_hardware::{AcquisitionMode, SpectrometerProfile};
//!
//! let spectrometer = SimulatedSpectrometer::new(
//!     SpectrometerProfile::usb2000_esk(),
//!     AcquisitionMode::Instant,
//!     Some(42),
//! );
//!
//! spectrometer.set_integration_time_micros(3_000).unwrap();
//! let intensities = spectrometer.get_intensities().unwrap();
//!
//! assert_eq!(intensities.len(), spectrometer.get_wavelengths().len());
//! ```

use super::noise::NoiseSource;
use crate::config::AcquisitionMode;
use crate::profile::SpectrometerProfile;
use crate::traits::SpectrometerFeature;
use seatease_core::{Error, IntegrationTimeLimits, Result, TriggerMode};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

/// Mutable part of the simulated spectrometer.
#[derive(Debug)]
struct AcquisitionState {
    integration_time_micros: u64,
    noise: NoiseSource,
}

/// Spectrometer feature of a simulated device.
#[derive(Debug)]
pub struct SimulatedSpectrometer {
    profile: SpectrometerProfile,

    /// Shared wavelength axis handed out by `get_wavelengths`.
    wavelengths: Arc<[f64]>,

    /// Peak response per microsecond for every pixel.
    response: Box<[f64]>,

    mode: AcquisitionMode,

    state: Mutex<AcquisitionState>,
}

impl SimulatedSpectrometer {
    /// Create a spectrometer from a profile.
    ///
    /// `noise_seed` makes the noise sequence reproducible.
    pub fn new(profile: SpectrometerProfile, mode: AcquisitionMode, noise_seed: Option<u64>) -> Self {
        let wavelengths: Arc<[f64]> = profile.wavelengths().into();
        let response = wavelengths
            .iter()
            .map(|&nm| profile.peak_response(nm))
            .collect();
        let state = AcquisitionState {
            integration_time_micros: profile
                .integration_time_limits
                .clamp(profile.default_integration_time_micros),
            noise: NoiseSource::new(noise_seed, profile.noise_amplitude),
        };

        Self {
            profile,
            wavelengths,
            response,
            mode,
            state: Mutex::new(state),
        }
    }

    /// Currently configured integration time.
    pub fn integration_time_micros(&self) -> u64 {
        self.lock_state().integration_time_micros
    }

    /// Acquisition mode of this spectrometer.
    pub fn mode(&self) -> AcquisitionMode {
        self.mode
    }

    /// Measurement parameters of this spectrometer.
    pub fn profile(&self) -> &SpectrometerProfile {
        &self.profile
    }

    fn lock_state(&self) -> MutexGuard<'_, AcquisitionState> {
        // The state holds plain values that are valid after any panic.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn synthesize(&self, integration_time_micros: u64, noise: &mut NoiseSource) -> Vec<f64> {
        let scale = integration_time_micros as f64;
        self.response
            .iter()
            .map(|&response| {
                let counts = response * scale + noise.sample() + self.profile.baseline_counts;
                counts.clamp(0.0, self.profile.max_intensity)
            })
            .collect()
    }
}

impl SpectrometerFeature for SimulatedSpectrometer {
    fn get_wavelengths(&self) -> Arc<[f64]> {
        Arc::clone(&self.wavelengths)
    }

    fn get_intensities(&self) -> Result<Vec<f64>> {
        let integration_time_micros = self.integration_time_micros();

        if self.mode == AcquisitionMode::Realistic {
            thread::sleep(Duration::from_micros(integration_time_micros));
        }

        let mut state = self.lock_state();
        let intensities = self.synthesize(integration_time_micros, &mut state.noise);
        trace!(
            integration_time_micros,
            pixels = intensities.len(),
            "Acquired simulated spectrum"
        );
        Ok(intensities)
    }

    fn get_maximum_intensity(&self) -> f64 {
        self.profile.max_intensity
    }

    fn get_integration_time_micros_limits(&self) -> IntegrationTimeLimits {
        self.profile.integration_time_limits
    }

    fn set_integration_time_micros(&self, integration_time_micros: u64) -> Result<()> {
        let clamped = self
            .profile
            .integration_time_limits
            .clamp(integration_time_micros);
        if clamped != integration_time_micros {
            debug!(
                requested = integration_time_micros,
                clamped, "Integration time clamped into device limits"
            );
        }
        self.lock_state().integration_time_micros = clamped;
        Ok(())
    }

    fn get_electric_dark_pixel_indices(&self) -> Vec<usize> {
        Vec::new()
    }

    fn set_trigger_mode(&self, mode: TriggerMode) -> Result<()> {
        Err(Error::unsupported(format!("set_trigger_mode({mode})")))
    }

    fn spectrum_length(&self) -> usize {
        self.profile.pixels
    }
}
