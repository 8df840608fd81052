//! Common test utilities for backend integration tests.

#![allow(dead_code)]

use seatease_hardware::{AcquisitionMode, DeviceKind, Registry, RegistryConfig};

/// Seed shared by reproducible tests.
pub const TEST_SEED: u64 = 0x5EA7_EA5E;

/// Registry of `count` devices that skip the acquisition delay.
pub fn instant_registry(count: usize) -> Registry {
    let config = RegistryConfig::with_devices(count, DeviceKind::Usb2000Esk)
        .with_noise_seed(TEST_SEED)
        .with_acquisition(AcquisitionMode::Instant);
    Registry::from_config(&config).expect("valid test configuration")
}

/// Index of the pixel closest to `nm`.
pub fn pixel_near(wavelengths: &[f64], nm: f64) -> usize {
    wavelengths
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - nm).abs().total_cmp(&(b.1 - nm).abs()))
        .map(|(index, _)| index)
        .expect("non-empty wavelength axis")
}
