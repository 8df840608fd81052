//! High-level spectrometer facade.
//!
//! [`Spectrometer`] binds one device of a [`Registry`], opens it, caches its
//! wavelength axis, and exposes the everyday verbs of a spectrometer driver
//! with argument validation on top of the lenient backend calls.
//!
//! # Ownership
//!
//! A device has at most one live facade. Every constructor claims the device
//! atomically and fails with `Error::AlreadyOpen` if it is taken. Calling
//! [`close`](Spectrometer::close), or dropping the facade, releases the
//! device for the next caller.
//!
//! A low-level `SimulatedDevice::close` ends the facade's claim. From then
//! on the facade reports itself closed and never releases a claim taken
//! by a later owner.
//!
//! ```text
//!            new / from_* / open()
//!  ┌────────┐ ─────────────────────► ┌──────┐
//!  │ Closed │                        │ Open │
//!  └────────┘ ◄───────────────────── └──────┘
//!               close() / drop
//! ```
//!
//! # Examples
//!
//! ```
//! use seatease::Spectrometer;
//! use seatease_hardware::Registry;
//!
//! # fn main() -> seatease_core::Result<()> {
//! let registry = Registry::one_usb2000();
//!
//! let mut spec = Spectrometer::from_first_available(&registry)?;
//! assert_eq!(spec.model(), "USB2000-esk");
//!
//! spec.integration_time_micros(3_000)?; // 3 ms
//! let intensities = spec.intensities()?;
//! assert_eq!(intensities.len(), spec.pixels());
//!
//! // Only one device exists and it is taken
//! assert!(Spectrometer::from_first_available(&registry).is_err());
//!
//! spec.close();
//! let _again = Spectrometer::from_first_available(&registry)?;
//! # Ok(())
//! # }
//! ```

use crate::spectrum::{Corrections, Spectrum};
use seatease_core::{Error, IntegrationTimeLimits, Result, TriggerMode};
use seatease_hardware::simulated::SimulatedSpectrometer;
use seatease_hardware::{FeatureSet, OpenClaim, Registry, SimulatedDevice, SpectrometerFeature};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Validating wrapper around one simulated device.
#[derive(Debug)]
pub struct Spectrometer {
    device: Arc<SimulatedDevice>,

    /// Axis cached at construction time.
    wavelengths: Arc<[f64]>,

    /// Claim taken when this facade opened the device.
    claim: Option<OpenClaim>,
}

impl Spectrometer {
    /// Wrap `device`, opening it.
    ///
    /// # Errors
    ///
    /// - `Error::TypeMismatch` if `device` does not belong to `registry`
    /// - `Error::AlreadyOpen` if the device is held by someone else
    /// - `Error::Unsupported` if the device has no spectrometer feature
    pub fn new(registry: &Registry, device: &Arc<SimulatedDevice>) -> Result<Self> {
        if !registry.contains(device) {
            return Err(Error::type_mismatch(format!(
                "device {device} is not a SeaTeaseDevice of this registry"
            )));
        }

        let wavelengths = device.spectrometer()?.get_wavelengths();
        let claim = device.try_open()?;
        info!(serial_number = %device.serial_number(), model = device.model(), "Spectrometer opened");

        Ok(Self {
            device: Arc::clone(device),
            wavelengths,
            claim: Some(claim),
        })
    }

    /// Open the first device of `registry` that is not already open.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if every device is open.
    pub fn from_first_available(registry: &Registry) -> Result<Self> {
        for device in registry.list_devices() {
            if device.is_open() {
                continue;
            }
            match Self::new(registry, device) {
                // Another owner claimed it between the check and the open
                Err(Error::AlreadyOpen { .. }) => continue,
                result => return result,
            }
        }
        warn!("No unopened device found");
        Err(Error::no_unopened_device())
    }

    /// Open the device with the given serial number.
    ///
    /// `None` or an empty serial number picks the first available device.
    ///
    /// # Errors
    ///
    /// - `Error::AlreadyOpen` if the device exists but is open
    /// - `Error::NotFound` if no device carries `serial_number`
    pub fn from_serial_number(registry: &Registry, serial_number: Option<&str>) -> Result<Self> {
        let serial_number = match serial_number {
            None | Some("") => return Self::from_first_available(registry),
            Some(serial_number) => serial_number,
        };

        let device = registry
            .find_by_serial(serial_number)
            .ok_or_else(|| Error::no_device_with_serial(serial_number))?;
        if device.is_open() {
            return Err(Error::already_open(serial_number));
        }
        Self::new(registry, device)
    }

    fn spectrometer(&self) -> Result<&SimulatedSpectrometer> {
        self.device.spectrometer()
    }

    /// Wavelength axis cached when the facade was created.
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Acquire raw intensities. Blocks for the integration time.
    ///
    /// # Errors
    ///
    /// Propagates backend acquisition failures.
    pub fn intensities(&self) -> Result<Vec<f64>> {
        self.intensities_with(Corrections::NONE)
    }

    /// Acquire intensities with the requested corrections.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` before acquiring if any correction is
    /// requested; the simulated device supports neither.
    pub fn intensities_with(&self, corrections: Corrections) -> Result<Vec<f64>> {
        if corrections.dark_counts {
            return Err(Error::unsupported("dark count correction"));
        }
        if corrections.nonlinearity {
            return Err(Error::unsupported("nonlinearity correction"));
        }
        self.spectrometer()?.get_intensities()
    }

    /// Acquire a raw spectrum.
    ///
    /// # Errors
    ///
    /// Same as [`intensities`](Self::intensities).
    pub fn spectrum(&self) -> Result<Spectrum> {
        self.spectrum_with(Corrections::NONE)
    }

    /// Acquire a spectrum with the requested corrections.
    ///
    /// # Errors
    ///
    /// Same as [`intensities_with`](Self::intensities_with).
    pub fn spectrum_with(&self, corrections: Corrections) -> Result<Spectrum> {
        let intensities = self.intensities_with(corrections)?;
        Ok(Spectrum::new(Arc::clone(&self.wavelengths), intensities))
    }

    /// Saturation ceiling of the detector.
    pub fn max_intensity(&self) -> Result<f64> {
        Ok(self.spectrometer()?.get_maximum_intensity())
    }

    /// Set the integration time.
    ///
    /// # Errors
    ///
    /// Returns `Error::IntegrationTimeOutOfRange` if `micros` lies outside
    /// [`integration_time_micros_limits`](Self::integration_time_micros_limits).
    pub fn integration_time_micros(&self, micros: u64) -> Result<()> {
        let spectrometer = self.spectrometer()?;
        let limits = spectrometer.get_integration_time_micros_limits();
        if !limits.contains(micros) {
            debug!(requested = micros, %limits, "Integration time rejected");
            return Err(Error::IntegrationTimeOutOfRange {
                requested: micros,
                min: limits.min_micros,
                max: limits.max_micros,
            });
        }
        spectrometer.set_integration_time_micros(micros)
    }

    /// Integration time range of the device.
    pub fn integration_time_micros_limits(&self) -> Result<IntegrationTimeLimits> {
        Ok(self.spectrometer()?.get_integration_time_micros_limits())
    }

    /// Select the trigger mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported`; the simulated device has no triggering.
    pub fn trigger_mode(&self, mode: TriggerMode) -> Result<()> {
        self.spectrometer()?.set_trigger_mode(mode)
    }

    /// Serial number of the wrapped device.
    pub fn serial_number(&self) -> &str {
        self.device.serial_number()
    }

    /// Model label of the wrapped device.
    pub fn model(&self) -> &str {
        self.device.model()
    }

    /// Number of pixels per spectrum.
    pub fn pixels(&self) -> usize {
        self.wavelengths.len()
    }

    /// Features of the wrapped device.
    pub fn features(&self) -> &FeatureSet {
        self.device.features()
    }

    /// Backend device handle, for calls the facade does not cover.
    pub fn device(&self) -> &Arc<SimulatedDevice> {
        &self.device
    }

    /// Whether this facade currently holds its device open.
    pub fn is_open(&self) -> bool {
        self.claim.is_some_and(|claim| self.device.is_held_by(claim))
    }

    /// Reopen the device after [`close`](Self::close). No-op while open.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyOpen` if another owner claimed the device in
    /// the meantime.
    pub fn open(&mut self) -> Result<()> {
        if !self.is_open() {
            self.claim = Some(self.device.try_open()?);
        }
        Ok(())
    }

    /// Release the device. Closing twice is harmless.
    ///
    /// Leaves the device alone if this facade's claim already ended.
    pub fn close(&mut self) {
        if let Some(claim) = self.claim.take()
            && self.device.release(claim)
        {
            info!(serial_number = %self.device.serial_number(), "Spectrometer closed");
        }
    }
}

impl Drop for Spectrometer {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Display for Spectrometer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Spectrometer {}:{}>", self.model(), self.serial_number())
    }
}
