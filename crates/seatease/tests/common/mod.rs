//! Common test utilities for front-end integration tests.

#![allow(dead_code)]

use seatease::Registry;
use seatease_hardware::{AcquisitionMode, DeviceKind, RegistryConfig};

/// Serial number of the device in the default registry.
pub const DEFAULT_SERIAL: &str = "1";

/// Registry of `count` devices that skip the acquisition delay.
pub fn instant_registry(count: usize) -> Registry {
    let config = RegistryConfig::with_devices(count, DeviceKind::Usb2000Esk)
        .with_noise_seed(1234)
        .with_acquisition(AcquisitionMode::Instant);
    Registry::from_config(&config).expect("valid test configuration")
}
