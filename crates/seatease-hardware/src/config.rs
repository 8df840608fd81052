//! Registry configuration.
//!
//! A [`RegistryConfig`] describes which simulated devices are "plugged in".
//! It is plain data with serde support so an application can keep it in a
//! JSON file next to its own settings.
//!
//! # Examples
//!
//! ```
//! use seatease_hardware::{AcquisitionMode, RegistryConfig};
//!
//! let config = RegistryConfig::from_json(
//!     r#"{ "serial_numbers": ["A1", "B2"], "noise_seed": 7, "acquisition": "instant" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.device_count(), 2);
//! assert_eq!(config.acquisition, AcquisitionMode::Instant);
//! ```

use crate::profile::DeviceKind;
use seatease_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether acquisitions wait out the integration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    /// Block the caller for the configured integration time, like hardware.
    #[default]
    Realistic,

    /// Return immediately. The intensity model is unchanged.
    Instant,
}

/// Configuration of a simulated device registry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Number of devices. Defaults to one, or to the number of explicit
    /// serial numbers when those are given.
    pub device_count: Option<usize>,

    /// Kind shared by every device.
    pub kind: DeviceKind,

    /// Explicit serial numbers. When empty, devices are numbered "1", "2", …
    pub serial_numbers: Vec<String>,

    /// Seed for the noise generators; device `i` uses `seed + i`.
    pub noise_seed: Option<u64>,

    /// Acquisition timing behavior.
    pub acquisition: AcquisitionMode,
}

impl RegistryConfig {
    /// Configuration for `count` identical devices of `kind`.
    pub fn with_devices(count: usize, kind: DeviceKind) -> Self {
        Self {
            device_count: Some(count),
            kind,
            ..Self::default()
        }
    }

    /// Set the noise seed.
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Set the acquisition mode.
    pub fn with_acquisition(mut self, acquisition: AcquisitionMode) -> Self {
        self.acquisition = acquisition;
        self
    }

    /// Set explicit serial numbers.
    pub fn with_serial_numbers<I, S>(mut self, serial_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.serial_numbers = serial_numbers.into_iter().map(Into::into).collect();
        self
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the JSON is malformed, contains unknown
    /// keys, or fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid registry configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Number of devices this configuration produces.
    pub fn device_count(&self) -> usize {
        if self.serial_numbers.is_empty() {
            self.device_count.unwrap_or(1)
        } else {
            self.serial_numbers.len()
        }
    }

    /// Serial numbers of the devices, in registry order.
    pub fn resolved_serial_numbers(&self) -> Vec<String> {
        if self.serial_numbers.is_empty() {
            (1..=self.device_count()).map(|n| n.to_string()).collect()
        } else {
            self.serial_numbers.clone()
        }
    }

    /// Check the configuration for conflicts.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - `device_count` disagrees with the number of explicit serial numbers
    /// - a serial number is empty (an empty serial means "any device" in lookups)
    /// - a serial number appears twice
    pub fn validate(&self) -> Result<()> {
        if let Some(count) = self.device_count
            && !self.serial_numbers.is_empty()
            && count != self.serial_numbers.len()
        {
            return Err(Error::config(format!(
                "device_count is {count} but {} serial numbers were given",
                self.serial_numbers.len()
            )));
        }

        validate_serial_numbers(self.serial_numbers.iter().map(String::as_str))
    }
}

/// Reject empty or repeated serial numbers.
///
/// An empty serial means "any device" in lookups, so a device carrying one
/// could never be found by serial.
pub(crate) fn validate_serial_numbers<'a>(
    serial_numbers: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for serial in serial_numbers {
        if serial.is_empty() {
            return Err(Error::config("Serial numbers must not be empty"));
        }
        if !seen.insert(serial) {
            return Err(Error::config(format!("Duplicate serial number '{serial}'")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();

        assert_eq!(config.device_count(), 1);
        assert_eq!(config.resolved_serial_numbers(), vec!["1"]);
        assert_eq!(config.acquisition, AcquisitionMode::Realistic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_serial_numbers() {
        let config = RegistryConfig::with_devices(3, DeviceKind::Usb2000Esk);
        assert_eq!(config.resolved_serial_numbers(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_explicit_serial_numbers() {
        let config = RegistryConfig::default().with_serial_numbers(["FLMS1", "FLMS2"]);

        assert_eq!(config.device_count(), 2);
        assert_eq!(config.resolved_serial_numbers(), vec!["FLMS1", "FLMS2"]);
    }

    #[test]
    fn test_from_json_empty_object_uses_defaults() {
        let config = RegistryConfig::from_json("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_from_json_full() {
        let config = RegistryConfig::from_json(
            r#"{
                "device_count": 2,
                "kind": "usb2000-esk",
                "noise_seed": 99,
                "acquisition": "instant"
            }"#,
        )
        .unwrap();

        assert_eq!(config.device_count(), 2);
        assert_eq!(config.noise_seed, Some(99));
        assert_eq!(config.acquisition, AcquisitionMode::Instant);
    }

    #[rstest]
    #[case(r#"{ "serial_numbers": ["1", "1"] }"#)] // duplicate
    #[case(r#"{ "serial_numbers": [""] }"#)] // empty serial
    #[case(r#"{ "device_count": 3, "serial_numbers": ["a", "b"] }"#)] // count mismatch
    #[case(r#"{ "devices": 3 }"#)] // unknown key
    #[case(r#"{ "kind": "usb4000" }"#)] // unknown kind
    #[case("not json")]
    fn test_from_json_invalid(#[case] json: &str) {
        let err = RegistryConfig::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_roundtrip_through_json() {
        let config = RegistryConfig::with_devices(2, DeviceKind::Usb2000Esk)
            .with_noise_seed(5)
            .with_acquisition(AcquisitionMode::Instant);

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(RegistryConfig::from_json(&json).unwrap(), config);
    }
}
