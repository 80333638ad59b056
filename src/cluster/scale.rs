//! Min-max scaling of samples into `[0, 1]`.

/// The `[min, max]` range a sample set was scaled from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scale {
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
}

impl Scale {
    /// Fit the range of `samples`. Returns `None` for an empty slice.
    pub fn fit(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map a value into `[0, 1]`. Every value maps to `0` when the range is
    /// empty (all samples equal).
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span
        }
    }

    /// Map a normalized value back into original units.
    pub fn denormalize(&self, value: f64) -> f64 {
        value * self.span() + self.min
    }
}

/// Scale `samples` into `[0, 1]`, returning the normalized values and the
/// range needed to undo the mapping.
pub fn normalize(samples: &[f64]) -> (Vec<f64>, Scale) {
    let scale = Scale::fit(samples).unwrap_or_default();
    let normalized = samples.iter().map(|&v| scale.normalize(v)).collect();
    (normalized, scale)
}

/// Undo [`normalize`] using the range of the `original` samples.
pub fn denormalize(normalized: &[f64], original: &[f64]) -> Vec<f64> {
    let scale = Scale::fit(original).unwrap_or_default();
    normalized.iter().map(|&v| scale.denormalize(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_maps_to_unit_interval() {
        let (normalized, scale) = normalize(&[2.0, 4.0, 6.0]);
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
        assert_eq!(scale, Scale { min: 2.0, max: 6.0 });
    }

    #[test]
    fn test_normalize_identical_values_is_zero() {
        let (normalized, scale) = normalize(&[3.5, 3.5, 3.5]);
        assert_eq!(normalized, vec![0.0, 0.0, 0.0]);
        assert_eq!(scale.span(), 0.0);
        assert_eq!(denormalize(&normalized, &[3.5, 3.5, 3.5]), vec![3.5; 3]);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let samples = [0.013, 0.0121, 0.04, 0.0125, 0.0119, 0.2];
        let (normalized, _) = normalize(&samples);
        let restored = denormalize(&normalized, &samples);
        for (a, b) in samples.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-12, "{a} != {b}");
        }
    }

    #[test]
    fn test_empty_input() {
        let (normalized, scale) = normalize(&[]);
        assert!(normalized.is_empty());
        assert!(Scale::fit(&[]).is_none());
        assert_eq!(scale, Scale::default());
    }
}
