//! Shared building blocks for the SeaTease spectrometer emulator.
//!
//! This crate holds the pieces every other SeaTease crate agrees on: the
//! numeric constants of the reference USB2000-like device, the error type
//! returned by all driver calls, and a few small value types.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
