//! Simulated feature implementations.
//!
//! These stand in for the hardware-backed features of a real spectrometer
//! driver and need no device attached.

pub mod eeprom;
pub mod noise;
pub mod spectrometer;

// Re-export commonly used types
pub use eeprom::SimulatedEeprom;
pub use noise::NoiseSource;
pub use spectrometer::SimulatedSpectrometer;
