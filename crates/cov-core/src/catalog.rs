use crate::error::{SampleError, SampleResult};
use crate::softmax::softmax;

/// Absolute slack allowed on the `sum ≤ 1.0` invariant. Decimal weights such
/// as `0.6 + 0.3 + 0.1` do not add up to exactly `1.0` in binary floating
/// point.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// An ordered table of category labels and their selection weights.
///
/// Each weight lies in `[0, 1]` and labels are unique. Entry order is the
/// insertion order and acts as the tie-break when two weights are equal.
///
/// The `sum ≤ 1.0` invariant is not enforced at construction so that a
/// misconfigured table can be reported by the operation that uses it; call
/// [`WeightedCatalog::validate`] to check it eagerly.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCatalog {
    entries: Vec<(String, f64)>,
}

impl WeightedCatalog {
    /// Build a catalog from `(label, weight)` pairs, keeping their order.
    pub fn new<I, S>(entries: I) -> SampleResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut catalog = Self {
            entries: Vec::new(),
        };
        for (label, weight) in entries {
            let label = label.into();
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(SampleError::InvalidDistribution(format!(
                    "weight of {label:?} must be within [0, 1], got {weight}"
                )));
            }
            if catalog.weight(&label).is_some() {
                return Err(SampleError::InvalidDistribution(format!(
                    "duplicate category {label:?}"
                )));
            }
            catalog.entries.push((label, weight));
        }
        Ok(catalog)
    }

    /// Build a catalog whose weights are the softmax of raw `scores`.
    pub fn from_scores<S: Into<String>>(labels: Vec<S>, scores: &[f64]) -> SampleResult<Self> {
        if labels.len() != scores.len() {
            return Err(SampleError::InvalidDistribution(format!(
                "{} labels but {} scores",
                labels.len(),
                scores.len()
            )));
        }
        let weights = softmax(scores)?;
        Self::new(labels.into_iter().zip(weights))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, w)| (l.as_str(), *w))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn weight(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, w)| *w)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.weight(label).is_some()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Check the `sum ≤ 1.0` invariant.
    pub fn validate(&self) -> SampleResult<()> {
        let total = self.total_weight();
        if total > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(SampleError::InvalidDistribution(format!(
                "weights sum to {total}, which exceeds 1.0"
            )));
        }
        Ok(())
    }

    /// Entries sorted ascending by weight. The sort is stable, so equal
    /// weights keep their insertion order.
    pub(crate) fn ascending(&self) -> Vec<(&str, f64)> {
        let mut ordered: Vec<(&str, f64)> = self.iter().collect();
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));
        ordered
    }

    /// Remove `label`, returning its weight.
    pub(crate) fn remove(&mut self, label: &str) -> Option<f64> {
        let pos = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(pos).1)
    }
}
