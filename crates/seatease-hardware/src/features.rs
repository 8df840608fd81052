//! Per-device feature record.
//!
//! Driver libraries group a device's capabilities by feature kind, with zero
//! or more instances of each kind. [`FeatureSet`] keeps that shape as a
//! struct with one named field per kind.

use crate::config::AcquisitionMode;
use crate::profile::SpectrometerProfile;
use crate::simulated::{SimulatedEeprom, SimulatedSpectrometer};
use seatease_core::{Error, Result};
use std::fmt;

/// Kinds of features a device can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Spectrum acquisition.
    Spectrometer,

    /// On-board EEPROM.
    Eeprom,
}

impl FeatureKind {
    /// Every feature kind, in listing order.
    pub const ALL: [FeatureKind; 2] = [FeatureKind::Spectrometer, FeatureKind::Eeprom];
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spectrometer => write!(f, "spectrometer"),
            Self::Eeprom => write!(f, "eeprom"),
        }
    }
}

/// Features owned by one device.
#[derive(Debug)]
pub struct FeatureSet {
    /// Spectrometer features.
    pub spectrometer: Vec<SimulatedSpectrometer>,

    /// EEPROM features.
    pub eeprom: Vec<SimulatedEeprom>,
}

impl FeatureSet {
    /// Features of a simulated device: one spectrometer and one EEPROM.
    pub fn simulated(
        profile: SpectrometerProfile,
        mode: AcquisitionMode,
        noise_seed: Option<u64>,
    ) -> Self {
        Self {
            spectrometer: vec![SimulatedSpectrometer::new(profile, mode, noise_seed)],
            eeprom: vec![SimulatedEeprom::new()],
        }
    }

    /// First spectrometer feature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` if the device has no spectrometer feature.
    pub fn spectrometer(&self) -> Result<&SimulatedSpectrometer> {
        self.spectrometer
            .first()
            .ok_or_else(|| Error::unsupported(FeatureKind::Spectrometer.to_string()))
    }

    /// First EEPROM feature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` if the device has no EEPROM feature.
    pub fn eeprom(&self) -> Result<&SimulatedEeprom> {
        self.eeprom
            .first()
            .ok_or_else(|| Error::unsupported(FeatureKind::Eeprom.to_string()))
    }

    /// Number of instances of `kind`.
    pub fn count(&self, kind: FeatureKind) -> usize {
        match kind {
            FeatureKind::Spectrometer => self.spectrometer.len(),
            FeatureKind::Eeprom => self.eeprom.len(),
        }
    }

    /// Kinds with at least one instance.
    pub fn kinds(&self) -> Vec<FeatureKind> {
        FeatureKind::ALL
            .into_iter()
            .filter(|&kind| self.count(kind) > 0)
            .collect()
    }
}
