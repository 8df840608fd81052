//! SeaTease command-line tool.
//!
//! Builds a simulated device registry and drives it the way an acquisition
//! application would: list the attached spectrometers, open one, set the
//! integration time, and read a spectrum. Output is JSON on stdout; logs go
//! to stderr.
//!
//! # Usage
//!
//! ```bash
//! # List the default registry (one USB2000-like device, serial "1")
//! seatease list
//!
//! # Three devices, acquire from serial 2 with a 3 ms integration time
//! seatease --devices 3 acquire --serial 2 --integration-time-micros 3000
//!
//! # Reproducible spectra without the exposure delay
//! seatease --seed 7 --instant acquire --summary
//!
//! # Registry described in a JSON file
//! seatease --config registry.json list
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use seatease::{Registry, Spectrometer, list_devices};
use seatease_hardware::{AcquisitionMode, RegistryConfig};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI Argument Structure
// =============================================================================

/// Simulated USB spectrometer driver
#[derive(Parser, Debug)]
#[command(name = "seatease")]
#[command(version)]
#[command(about = "Drive simulated USB spectrometers", long_about = None)]
struct Cli {
    /// Registry configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of simulated devices
    #[arg(long, value_name = "N")]
    devices: Option<usize>,

    /// Seed for the simulated noise
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the simulated exposure delay
    #[arg(long)]
    instant: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all simulated devices
    List,

    /// Open a spectrometer and acquire one spectrum
    Acquire(AcquireArgs),
}

#[derive(Args, Debug)]
struct AcquireArgs {
    /// Serial number of the device (default: first available)
    #[arg(short, long)]
    serial: Option<String>,

    /// Integration time in microseconds
    #[arg(short = 't', long, default_value_t = 100_000)]
    integration_time_micros: u64,

    /// Print only the peak position instead of the full spectrum
    #[arg(long)]
    summary: bool,
}

/// Short report of one acquisition.
#[derive(Debug, Serialize)]
struct AcquisitionSummary<'a> {
    serial_number: &'a str,
    model: &'a str,
    integration_time_micros: u64,
    pixels: usize,
    peak_wavelength_nm: Option<f64>,
    peak_counts: Option<f64>,
    elapsed_ms: f64,
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let registry = Registry::from_config(&config).context("failed to build device registry")?;

    let result = match &cli.command {
        Command::List => list(&registry),
        Command::Acquire(args) => acquire(&registry, args),
    };

    registry.shutdown();
    result
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read the configuration file, if any, and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<RegistryConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RegistryConfig::from_json(&json)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None => RegistryConfig::default(),
    };

    if let Some(count) = cli.devices {
        config.device_count = Some(count);
    }
    if let Some(seed) = cli.seed {
        config.noise_seed = Some(seed);
    }
    if cli.instant {
        config.acquisition = AcquisitionMode::Instant;
    }

    debug!(?config, "Registry configuration resolved");
    Ok(config)
}

// =============================================================================
// Commands
// =============================================================================

fn list(registry: &Registry) -> Result<()> {
    let devices: Vec<_> = list_devices(registry)
        .iter()
        .map(|device| device.info())
        .collect();

    println!("{}", serde_json::to_string_pretty(&devices)?);
    Ok(())
}

fn acquire(registry: &Registry, args: &AcquireArgs) -> Result<()> {
    let mut spec = Spectrometer::from_serial_number(registry, args.serial.as_deref())
        .context("failed to open spectrometer")?;
    spec.integration_time_micros(args.integration_time_micros)?;
    info!(%spec, integration_time_micros = args.integration_time_micros, "Acquiring");

    let started = Instant::now();
    let spectrum = spec.spectrum()?;
    let elapsed = started.elapsed();

    if args.summary {
        let peak = spectrum.peak();
        let summary = AcquisitionSummary {
            serial_number: spec.serial_number(),
            model: spec.model(),
            integration_time_micros: args.integration_time_micros,
            pixels: spectrum.len(),
            peak_wavelength_nm: peak.map(|(nm, _)| nm),
            peak_counts: peak.map(|(_, counts)| counts),
            elapsed_ms: elapsed.as_secs_f64() * 1e3,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", serde_json::to_string(&spectrum)?);
    }

    spec.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_to_default_config() {
        let cli = Cli::parse_from(["seatease", "--devices", "3", "--seed", "9", "--instant", "list"]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.device_count(), 3);
        assert_eq!(config.noise_seed, Some(9));
        assert_eq!(config.acquisition, AcquisitionMode::Instant);
    }

    #[test]
    fn test_acquire_arguments() {
        let cli = Cli::parse_from(["seatease", "acquire", "-s", "2", "-t", "3000", "--summary"]);
        match cli.command {
            Command::Acquire(args) => {
                assert_eq!(args.serial.as_deref(), Some("2"));
                assert_eq!(args.integration_time_micros, 3_000);
                assert!(args.summary);
            }
            Command::List => panic!("expected acquire"),
        }
    }

    #[test]
    fn test_acquire_and_list_run_against_instant_registry() {
        let config = RegistryConfig::with_devices(2, Default::default())
            .with_acquisition(AcquisitionMode::Instant);
        let registry = Registry::from_config(&config).unwrap();
        let args = AcquireArgs {
            serial: Some("2".to_string()),
            integration_time_micros: 3_000,
            summary: true,
        };

        acquire(&registry, &args).unwrap();
        list(&registry).unwrap();
        assert!(list_devices(&registry).iter().all(|d| !d.is_open()));
    }
}
