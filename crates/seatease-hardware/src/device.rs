//! Simulated device handle.
//!
//! A [`SimulatedDevice`] is the identity-bearing handle of one emulated
//! spectrometer: its serial number, its model, whether it is currently
//! open, and the features it owns.
//!
//! # Open/Close Semantics
//!
//! [`open`](SimulatedDevice::open) and [`close`](SimulatedDevice::close) are
//! idempotent flag updates, like the low-level calls of a driver library.
//! Ownership is claimed with [`try_open`](SimulatedDevice::try_open), an
//! atomic check-and-set that fails with `Error::AlreadyOpen` when another
//! owner holds the device. A successful claim returns an [`OpenClaim`];
//! [`release`](SimulatedDevice::release) only closes the device while that
//! claim is still current, so an owner whose claim was cut short by a
//! low-level `close` cannot release a later owner's claim.
//!
//! ```
//! use seatease_hardware::{DeviceKind, SimulatedDevice};
//!
//! let device = SimulatedDevice::new("1", DeviceKind::Usb2000Esk);
//!
//! let claim = device.try_open().unwrap();
//! assert!(device.try_open().is_err());
//! assert!(device.is_held_by(claim));
//!
//! device.close();
//! device.close();
//! assert!(!device.is_open());
//! assert!(!device.release(claim));
//! ```

use crate::config::AcquisitionMode;
use crate::features::FeatureSet;
use crate::profile::DeviceKind;
use crate::simulated::{SimulatedEeprom, SimulatedSpectrometer};
use crate::traits::SpectrometerFeature;
use seatease_core::{DeviceInfo, Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

// `holder` values. Claim ids start at FIRST_CLAIM and only grow.
const CLOSED: u64 = 0;
const ANONYMOUS: u64 = 1;
const FIRST_CLAIM: u64 = 2;

/// Proof of one successful [`SimulatedDevice::try_open`].
///
/// Claims are never reused on the same device, and only mean something to
/// the device that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenClaim(u64);

/// One emulated spectrometer.
#[derive(Debug)]
pub struct SimulatedDevice {
    serial_number: String,
    kind: DeviceKind,
    holder: AtomicU64,
    next_claim: AtomicU64,
    features: FeatureSet,
}

impl SimulatedDevice {
    /// Create a closed device with realistic timing and unseeded noise.
    pub fn new(serial_number: impl Into<String>, kind: DeviceKind) -> Self {
        Self::with_options(serial_number, kind, AcquisitionMode::Realistic, None)
    }

    /// Create a closed device with explicit acquisition mode and noise seed.
    pub fn with_options(
        serial_number: impl Into<String>,
        kind: DeviceKind,
        mode: AcquisitionMode,
        noise_seed: Option<u64>,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            kind,
            holder: AtomicU64::new(CLOSED),
            next_claim: AtomicU64::new(FIRST_CLAIM),
            features: FeatureSet::simulated(kind.profile(), mode, noise_seed),
        }
    }

    /// Serial number of the device.
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Model label of the device.
    pub fn model(&self) -> &'static str {
        self.kind.model()
    }

    /// Kind of the device.
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Whether the device is currently open.
    pub fn is_open(&self) -> bool {
        self.holder.load(Ordering::Acquire) != CLOSED
    }

    /// Mark the device open. Opening an open device is a no-op.
    pub fn open(&self) {
        if self
            .holder
            .compare_exchange(CLOSED, ANONYMOUS, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            debug!(serial_number = %self.serial_number, "Device opened");
        }
    }

    /// Mark the device closed, whoever opened it. Closing a closed device is
    /// a no-op.
    pub fn close(&self) {
        if self.holder.swap(CLOSED, Ordering::AcqRel) != CLOSED {
            debug!(serial_number = %self.serial_number, "Device closed");
        }
    }

    /// Open the device unless it is already open.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyOpen` if the device was open before the call.
    pub fn try_open(&self) -> Result<OpenClaim> {
        let claim = self.next_claim.fetch_add(1, Ordering::Relaxed);
        match self
            .holder
            .compare_exchange(CLOSED, claim, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                debug!(serial_number = %self.serial_number, claim, "Device claimed");
                Ok(OpenClaim(claim))
            }
            Err(_) => {
                warn!(serial_number = %self.serial_number, "Device already open");
                Err(Error::already_open(&self.serial_number))
            }
        }
    }

    /// Whether `claim` still holds the device open.
    pub fn is_held_by(&self, claim: OpenClaim) -> bool {
        self.holder.load(Ordering::Acquire) == claim.0
    }

    /// Close the device if `claim` still holds it.
    ///
    /// Returns `false`, leaving the device untouched, when the claim was
    /// already ended by [`close`](Self::close) or an earlier release.
    pub fn release(&self, claim: OpenClaim) -> bool {
        let released = self
            .holder
            .compare_exchange(claim.0, CLOSED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if released {
            debug!(serial_number = %self.serial_number, claim = claim.0, "Device released");
        }
        released
    }

    /// Features owned by the device.
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// The device's spectrometer feature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` if the device has no spectrometer.
    pub fn spectrometer(&self) -> Result<&SimulatedSpectrometer> {
        self.features.spectrometer()
    }

    /// The device's EEPROM feature.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` if the device has no EEPROM.
    pub fn eeprom(&self) -> Result<&SimulatedEeprom> {
        self.features.eeprom()
    }

    /// Snapshot of the device for listings.
    pub fn info(&self) -> DeviceInfo {
        let pixels = self
            .features
            .spectrometer()
            .map(|s| s.spectrum_length())
            .unwrap_or(0);
        DeviceInfo::new(self.serial_number.clone(), self.model(), pixels).with_open(self.is_open())
    }
}

impl fmt::Display for SimulatedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeaTeaseDevice({})", self.serial_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    fn device() -> SimulatedDevice {
        SimulatedDevice::with_options("1", DeviceKind::Usb2000Esk, AcquisitionMode::Instant, None)
    }

    #[test]
    fn test_new_device_is_closed() {
        let device = device();

        assert!(!device.is_open());
        assert_eq!(device.serial_number(), "1");
        assert_eq!(device.model(), "USB2000-esk");
        assert_eq!(device.kind(), DeviceKind::Usb2000Esk);
    }

    #[test]
    fn test_open_close_idempotent() {
        let device = device();

        device.open();
        device.open();
        assert!(device.is_open());

        device.close();
        device.close();
        assert!(!device.is_open());
    }

    #[test]
    fn test_try_open_rejects_second_owner() {
        let device = device();

        device.try_open().unwrap();
        let err = device.try_open().unwrap_err();
        assert!(matches!(err, Error::AlreadyOpen { ref serial_number } if serial_number == "1"));

        device.close();
        device.try_open().unwrap();
    }

    #[test]
    fn test_stale_claim_cannot_release_new_owner() {
        let device = device();

        let first = device.try_open().unwrap();
        device.close();
        let second = device.try_open().unwrap();

        assert_ne!(first, second);
        assert!(!device.is_held_by(first));
        assert!(!device.release(first));
        assert!(device.is_held_by(second));
        assert!(device.try_open().is_err());

        assert!(device.release(second));
        assert!(!device.is_open());
    }

    #[test]
    fn test_release_ignores_anonymous_open() {
        let device = device();

        let claim = device.try_open().unwrap();
        device.close();
        device.open();

        assert!(!device.release(claim));
        assert!(device.is_open());
    }

    #[test]
    fn test_concurrent_try_open_single_winner() {
        let device = Arc::new(device());
        let winners = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    if device.try_open().is_ok() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert!(device.is_open());
    }

    #[test]
    fn test_device_features() {
        let device = device();

        assert!(device.spectrometer().is_ok());
        assert!(device.eeprom().is_ok());
        assert_eq!(device.features().kinds().len(), 2);
    }

    #[test]
    fn test_device_info_tracks_open_flag() {
        let device = device();
        assert!(!device.info().is_open);

        device.open();
        let info = device.info();
        assert!(info.is_open);
        assert_eq!(info.serial_number, "1");
        assert_eq!(info.model, "USB2000-esk");
        assert_eq!(info.pixels, 4096);
    }

    #[test]
    fn test_display() {
        assert_eq!(device().to_string(), "SeaTeaseDevice(1)");
    }
}
