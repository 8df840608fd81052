//! Front-end API of the SeaTease spectrometer emulator.
//!
//! SeaTease stands in for a USB spectrometer driver so that applications
//! written against the driver API can be developed and tested without a
//! spectrometer plugged in. This crate is the convenient surface: list the
//! devices of a [`Registry`], wrap one in a [`Spectrometer`], and acquire.
//!
//! ```
//! use seatease::{Spectrometer, list_devices};
//! use seatease_hardware::Registry;
//!
//! # fn main() -> seatease_core::Result<()> {
//! let registry = Registry::one_usb2000();
//!
//! let devices = list_devices(&registry);
//! let mut spec = Spectrometer::new(&registry, &devices[0])?;
//!
//! spec.integration_time_micros(3_000)?;
//! let spectrum = spec.spectrum()?;
//! assert_eq!(spectrum.len(), 4096);
//!
//! // A second facade over the same device is refused until the first closes
//! assert!(Spectrometer::new(&registry, &devices[0]).is_err());
//! spec.close();
//! assert!(Spectrometer::new(&registry, &devices[0]).is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! The backend (`seatease_hardware`) stays reachable through
//! [`Spectrometer::device`] for calls the facade does not wrap.

pub mod spectrometer;
pub mod spectrum;

pub use seatease_core::{Error, IntegrationTimeLimits, Result, TriggerMode};
pub use seatease_hardware::{Registry, SimulatedDevice};
pub use spectrometer::Spectrometer;
pub use spectrum::{Corrections, Spectrum};

use std::sync::Arc;

/// All devices of `registry`, including ones already open elsewhere.
pub fn list_devices(registry: &Registry) -> &[Arc<SimulatedDevice>] {
    registry.list_devices()
}
