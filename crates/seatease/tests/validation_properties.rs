//! Property-based tests for facade validation and acquisitions.

mod common;

use proptest::prelude::*;
use seatease::{Error, Spectrometer};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the facade accepts exactly the values inside the limits.
    #[test]
    fn prop_integration_time_accepted_iff_in_range(micros in any::<u64>()) {
        let registry = common::instant_registry(1);
        let spec = Spectrometer::from_first_available(&registry).unwrap();

        let in_range = (3_000..=20_000_000).contains(&micros);
        match spec.integration_time_micros(micros) {
            Ok(()) => prop_assert!(in_range),
            Err(Error::IntegrationTimeOutOfRange { .. }) => prop_assert!(!in_range),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Property: any accepted integration time yields a full, in-range spectrum.
    #[test]
    fn prop_spectrum_within_detector_range(micros in 3_000u64..=20_000_000) {
        let registry = common::instant_registry(1);
        let spec = Spectrometer::from_first_available(&registry).unwrap();

        spec.integration_time_micros(micros).unwrap();
        let spectrum = spec.spectrum().unwrap();

        prop_assert_eq!(spectrum.len(), 4096);
        prop_assert!(spectrum.intensities.iter().all(|&v| (0.0..=4000.0).contains(&v)));
    }
}
