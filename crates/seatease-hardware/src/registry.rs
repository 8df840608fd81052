//! Simulated device registry.
//!
//! The [`Registry`] is the backend entry point: it owns the fixed set of
//! simulated devices that are "plugged in" and lets clients list them or
//! look them up by serial number. Devices are created once, when the
//! registry is built, and live as long as the registry.
//!
//! There is no process-wide instance. The application builds a registry and
//! passes it by reference to whatever needs devices.
//!
//! # Examples
//!
//! ```
//! use seatease_hardware::{DeviceKind, Registry, new_registry};
//!
//! let registry = Registry::one_usb2000();
//! assert_eq!(registry.list_devices().len(), 1);
//!
//! let registry = new_registry(3, DeviceKind::Usb2000Esk);
//! let serials: Vec<&str> = registry
//!     .list_devices()
//!     .iter()
//!     .map(|device| device.serial_number())
//!     .collect();
//! assert_eq!(serials, ["1", "2", "3"]);
//! ```

use crate::config::{RegistryConfig, validate_serial_numbers};
use crate::device::SimulatedDevice;
use crate::profile::DeviceKind;
use seatease_core::constants::DEFAULT_SERIAL_NUMBER;
use seatease_core::{Error, Result};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Fixed collection of simulated devices.
#[derive(Debug)]
pub struct Registry {
    devices: Vec<Arc<SimulatedDevice>>,
}

impl Registry {
    /// Build a registry from explicit devices.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a serial number is empty or two devices
    /// share one.
    pub fn new(devices: Vec<SimulatedDevice>) -> Result<Self> {
        validate_serial_numbers(devices.iter().map(SimulatedDevice::serial_number))?;
        Ok(Self::from_devices(devices))
    }

    /// Registry with a single USB2000-like device, serial "1".
    pub fn one_usb2000() -> Self {
        Self::from_devices(vec![SimulatedDevice::new(
            DEFAULT_SERIAL_NUMBER,
            DeviceKind::Usb2000Esk,
        )])
    }

    /// Build a registry from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration fails validation.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;

        let devices = config
            .resolved_serial_numbers()
            .into_iter()
            .enumerate()
            .map(|(index, serial_number)| {
                let seed = config
                    .noise_seed
                    .map(|seed| seed.wrapping_add(index as u64));
                SimulatedDevice::with_options(serial_number, config.kind, config.acquisition, seed)
            })
            .collect();

        Ok(Self::from_devices(devices))
    }

    fn from_devices(devices: Vec<SimulatedDevice>) -> Self {
        info!(count = devices.len(), "Simulated device registry created");
        Self {
            devices: devices.into_iter().map(Arc::new).collect(),
        }
    }

    /// All devices, open or closed, in registry order.
    pub fn list_devices(&self) -> &[Arc<SimulatedDevice>] {
        &self.devices
    }

    /// Device with the given serial number, if any.
    pub fn find_by_serial(&self, serial_number: &str) -> Option<&Arc<SimulatedDevice>> {
        self.devices
            .iter()
            .find(|device| device.serial_number() == serial_number)
    }

    /// Whether `device` is one of this registry's devices.
    pub fn contains(&self, device: &Arc<SimulatedDevice>) -> bool {
        self.devices.iter().any(|own| Arc::ptr_eq(own, device))
    }

    /// Register a device reachable over RS-232.
    ///
    /// # Errors
    ///
    /// Always returns `Error::Unsupported`; there is no serial transport.
    pub fn add_rs232_device_location(
        &self,
        device_type: &str,
        bus_path: &str,
        baudrate: u32,
    ) -> Result<()> {
        debug!(device_type, bus_path, baudrate, "RS-232 device location rejected");
        Err(Error::unsupported("add_rs232_device_location"))
    }

    /// Register a device reachable over IPv4.
    ///
    /// # Errors
    ///
    /// Always returns `Error::Unsupported`; there is no network transport.
    pub fn add_ipv4_device_location(
        &self,
        device_type: &str,
        ip_address: IpAddr,
        port: u16,
    ) -> Result<()> {
        debug!(device_type, %ip_address, port, "IPv4 device location rejected");
        Err(Error::unsupported("add_ipv4_device_location"))
    }

    /// Initialize the underlying bus.
    ///
    /// # Errors
    ///
    /// Always returns `Error::Unsupported`; devices are ready at construction.
    pub fn initialize(&self) -> Result<()> {
        Err(Error::unsupported("initialize"))
    }

    /// Shut down the underlying bus. Nothing to release for simulated devices.
    pub fn shutdown(&self) {
        debug!("Registry shutdown requested");
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::one_usb2000()
    }
}

/// Registry of `count` identical devices of `kind`, serials "1".."count".
pub fn new_registry(count: usize, kind: DeviceKind) -> Registry {
    Registry::from_devices(
        (1..=count)
            .map(|n| SimulatedDevice::new(n.to_string(), kind))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AcquisitionMode;
    use crate::traits::SpectrometerFeature;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_registry() {
        let registry = Registry::default();
        let devices = registry.list_devices();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].serial_number(), "1");
        assert_eq!(devices[0].model(), "USB2000-esk");
        assert!(!devices[0].is_open());
    }

    #[test]
    fn test_list_includes_open_devices() {
        let registry = new_registry(2, DeviceKind::Usb2000Esk);
        registry.list_devices()[0].open();

        let open: Vec<bool> = registry.list_devices().iter().map(|d| d.is_open()).collect();
        assert_eq!(open, vec![true, false]);
    }

    #[test]
    fn test_new_registry_empty() {
        assert!(new_registry(0, DeviceKind::Usb2000Esk).list_devices().is_empty());
    }

    #[test]
    fn test_find_by_serial() {
        let registry = new_registry(3, DeviceKind::Usb2000Esk);

        assert_eq!(registry.find_by_serial("2").unwrap().serial_number(), "2");
        assert!(registry.find_by_serial("4").is_none());
    }

    #[test]
    fn test_contains_checks_identity() {
        let registry = Registry::one_usb2000();
        let other = Registry::one_usb2000();

        assert!(registry.contains(&registry.list_devices()[0]));
        assert!(!registry.contains(&other.list_devices()[0]));
    }

    #[test]
    fn test_new_rejects_duplicate_serials() {
        let devices = vec![
            SimulatedDevice::new("A", DeviceKind::Usb2000Esk),
            SimulatedDevice::new("A", DeviceKind::Usb2000Esk),
        ];
        assert!(matches!(Registry::new(devices), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_rejects_empty_serial() {
        let devices = vec![
            SimulatedDevice::new("1", DeviceKind::Usb2000Esk),
            SimulatedDevice::new("", DeviceKind::Usb2000Esk),
        ];
        assert!(matches!(Registry::new(devices), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_accepts_distinct_serials() {
        let devices = vec![
            SimulatedDevice::new("A", DeviceKind::Usb2000Esk),
            SimulatedDevice::new("B", DeviceKind::Usb2000Esk),
        ];
        let registry = Registry::new(devices).unwrap();
        assert!(registry.find_by_serial("B").is_some());
    }

    #[test]
    fn test_from_config_seeds_each_device() {
        let config = RegistryConfig::with_devices(2, DeviceKind::Usb2000Esk)
            .with_noise_seed(10)
            .with_acquisition(AcquisitionMode::Instant);
        let first = Registry::from_config(&config).unwrap();
        let second = Registry::from_config(&config).unwrap();

        let acquire = |registry: &Registry, index: usize| {
            registry.list_devices()[index]
                .spectrometer()
                .unwrap()
                .get_intensities()
                .unwrap()
        };

        assert_eq!(acquire(&first, 0), acquire(&second, 0));
        assert_eq!(acquire(&first, 1), acquire(&second, 1));
        assert_ne!(acquire(&first, 0), acquire(&first, 1));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = RegistryConfig::default().with_serial_numbers(["x", "x"]);
        assert!(Registry::from_config(&config).is_err());
    }

    #[test]
    fn test_transport_stubs_unsupported() {
        let registry = Registry::default();

        assert!(
            registry
                .add_rs232_device_location("USB2000", "/dev/ttyUSB0", 9600)
                .unwrap_err()
                .is_unsupported()
        );
        assert!(
            registry
                .add_ipv4_device_location("USB2000", IpAddr::V4(Ipv4Addr::LOCALHOST), 7654)
                .unwrap_err()
                .is_unsupported()
        );
        assert!(registry.initialize().unwrap_err().is_unsupported());
        registry.shutdown();
    }
}
