//! Cost distribution bands
//!
//! A band spec is a list of ascending inclusive upper bounds plus an
//! implicit overflow band. Every value lands in exactly one band, so the
//! band counts always sum to the value count.

use serde::{Deserialize, Serialize};

/// A labelled band with its count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Display label, e.g. `"£101-250"` or `"£501+"`
    pub label: String,
    /// Values that fell in this band
    pub count: u64,
}

/// Ascending band boundaries with derived labels
#[derive(Debug, Clone, PartialEq)]
pub struct BandSpec {
    boundaries: Vec<f64>,
    labels: Vec<String>,
}

impl BandSpec {
    /// Build a spec from ascending inclusive upper bounds
    ///
    /// Labels follow the dashboard convention: `£0-100`, `£101-250`,
    /// `£251-500`, then an overflow `£501+`.
    pub fn new(boundaries: &[f64]) -> Self {
        let mut labels = Vec::with_capacity(boundaries.len() + 1);
        let mut lower = 0i64;
        for b in boundaries {
            labels.push(format!("£{}-{}", lower, *b as i64));
            lower = *b as i64 + 1;
        }
        labels.push(format!("£{}+", lower));
        Self {
            boundaries: boundaries.to_vec(),
            labels,
        }
    }

    /// Number of bands, overflow included
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the spec has no boundaries (a single overflow band)
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Index of the band a value falls in
    fn band_index(&self, value: f64) -> usize {
        self.boundaries
            .iter()
            .position(|b| value <= *b)
            .unwrap_or(self.boundaries.len())
    }
}

/// Count values per band
///
/// Each value goes to the first boundary whose inclusive upper bound is at
/// least the value; values above the last boundary go to the overflow band.
/// `sum(counts) == values.len()` for any boundary set and any values.
pub fn band_counts(values: &[f64], spec: &BandSpec) -> Vec<Band> {
    let mut counts = vec![0u64; spec.len()];
    for v in values {
        counts[spec.band_index(*v)] += 1;
    }
    spec.labels
        .iter()
        .zip(counts)
        .map(|(label, count)| Band {
            label: label.clone(),
            count,
        })
        .collect()
}
