//! Backend of the SeaTease spectrometer emulator.
//!
//! This crate emulates the device layer of a USB spectrometer driver
//! library: a registry of "plugged in" devices, per-device open/close state,
//! and the features each device exposes. No hardware is touched; spectra are
//! synthesized from a fixed intensity model.
//!
//! # Layout
//!
//! - [`Registry`] owns the simulated devices and answers discovery queries.
//! - [`SimulatedDevice`] carries identity and open state, and owns a
//!   [`FeatureSet`].
//! - [`simulated::SimulatedSpectrometer`] implements
//!   [`SpectrometerFeature`](traits::SpectrometerFeature), the measurement
//!   model.
//! - [`RegistryConfig`] describes a registry as serializable data.
//!
//! # Examples
//!
//! ```no_run
//! use seatease_hardware::Registry;
//! use seatease_hardware::traits::SpectrometerFeature;
//!
//! fn main() -> seatease_core::Result<()> {
//!     let registry = Registry::one_usb2000();
//!     let device = &registry.list_devices()[0];
//!
//!     device.open();
//!     let spectrometer = device.spectrometer()?;
//!     spectrometer.set_integration_time_micros(3_000)?;
//!     let intensities = spectrometer.get_intensities()?; // blocks ~3 ms
//!     println!("{} pixels", intensities.len());
//!     device.close();
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`seatease_core::Result`]. Features the
//! simulated hardware lacks (trigger modes, EEPROM access, serial or network
//! transports) fail with `Error::Unsupported` instead of silently succeeding.

pub mod config;
pub mod device;
pub mod features;
pub mod profile;
pub mod registry;
pub mod simulated;
pub mod traits;

// Re-export commonly used types for convenience
pub use config::{AcquisitionMode, RegistryConfig};
pub use device::{OpenClaim, SimulatedDevice};
pub use features::{FeatureKind, FeatureSet};
pub use profile::{DeviceKind, SpectrometerProfile};
pub use registry::{Registry, new_registry};
pub use traits::{EepromFeature, SpectrometerFeature};
