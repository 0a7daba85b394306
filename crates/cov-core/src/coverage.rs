use crate::error::SampleResult;
use crate::softmax::softmax;

/// An arbitrary payload paired with a selection probability.
///
/// Probabilities are not required to add up to any fixed total; see
/// [`crate::sampler::pick_categorical`] for how they are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageInfo<T> {
    pub item: T,
    pub probability: f64,
}

impl<T> CoverageInfo<T> {
    pub fn new(item: T, probability: f64) -> Self {
        Self { item, probability }
    }

    /// Pair every item with the softmax of its raw weight.
    pub fn normalized(raw: Vec<(T, f64)>) -> SampleResult<Vec<Self>> {
        let scores: Vec<f64> = raw.iter().map(|(_, w)| *w).collect();
        let probabilities = softmax(&scores)?;
        Ok(raw
            .into_iter()
            .zip(probabilities)
            .map(|((item, _), probability)| Self { item, probability })
            .collect())
    }
}
