//! Simulated EEPROM feature.
//!
//! The simulated device advertises an EEPROM so feature listings match a
//! real USB2000, but it holds no data and every access fails.

use crate::traits::EepromFeature;
use seatease_core::{Error, Result};

/// EEPROM feature of a simulated device.
#[derive(Debug, Clone, Default)]
pub struct SimulatedEeprom;

impl SimulatedEeprom {
    /// Create a new EEPROM stub.
    pub fn new() -> Self {
        Self
    }
}

impl EepromFeature for SimulatedEeprom {
    fn eeprom_read_slot(&self, slot_number: u32, _strip_zero_bytes: bool) -> Result<Vec<u8>> {
        Err(Error::unsupported(format!("eeprom_read_slot({slot_number})")))
    }
}
