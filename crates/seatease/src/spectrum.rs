//! Acquired spectra and acquisition options.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Post-processing corrections a caller may request for an acquisition.
///
/// The simulated device supports none of them; requesting either one makes
/// the acquisition fail with `Error::Unsupported`.
///
/// # Examples
///
/// ```
/// use seatease::Corrections;
///
/// let raw = Corrections::default();
/// assert!(!raw.any());
///
/// let dark = Corrections { dark_counts: true, ..Corrections::default() };
/// assert!(dark.any());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Corrections {
    /// Subtract the electric dark level measured on masked pixels.
    pub dark_counts: bool,

    /// Apply the detector nonlinearity polynomial.
    pub nonlinearity: bool,
}

impl Corrections {
    /// No corrections.
    pub const NONE: Corrections = Corrections {
        dark_counts: false,
        nonlinearity: false,
    };

    /// Whether any correction is requested.
    pub fn any(&self) -> bool {
        self.dark_counts || self.nonlinearity
    }
}

/// One acquisition: the wavelength axis stacked with measured intensities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Wavelength of every pixel (nm).
    pub wavelengths: Arc<[f64]>,

    /// Counts of every pixel, same order as `wavelengths`.
    pub intensities: Vec<f64>,
}

impl Spectrum {
    /// Pair a wavelength axis with intensities.
    pub fn new(wavelengths: Arc<[f64]>, intensities: Vec<f64>) -> Self {
        Self {
            wavelengths,
            intensities,
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// Whether the spectrum has no pixels.
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// `(wavelength, intensity)` pairs in pixel order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }

    /// The pixel with the highest count, as `(wavelength, intensity)`.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points().max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Spectrum {
        Spectrum::new(Arc::from(vec![400.0, 500.0, 600.0]), vec![101.0, 900.0, 104.0])
    }

    #[test]
    fn test_corrections_any() {
        assert!(!Corrections::NONE.any());
        assert_eq!(Corrections::default(), Corrections::NONE);
        assert!(
            Corrections {
                nonlinearity: true,
                ..Corrections::NONE
            }
            .any()
        );
    }

    #[test]
    fn test_points_pair_axis_with_counts() {
        let points: Vec<(f64, f64)> = sample().points().collect();
        assert_eq!(points, vec![(400.0, 101.0), (500.0, 900.0), (600.0, 104.0)]);
    }

    #[test]
    fn test_peak() {
        assert_eq!(sample().peak(), Some((500.0, 900.0)));

        let empty = Spectrum::new(Arc::from(Vec::<f64>::new()), Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.peak(), None);
    }

    #[test]
    fn test_spectrum_serializes_as_two_rows() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["wavelengths"][1], 500.0);
        assert_eq!(json["intensities"][1], 900.0);
    }
}
