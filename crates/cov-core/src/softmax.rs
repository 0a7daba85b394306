use crate::error::{SampleError, SampleResult};

/// Turn arbitrary real scores into a probability distribution.
///
/// The maximum score is subtracted before exponentiating. In exact
/// arithmetic this leaves the result unchanged, and it keeps `exp` from
/// overflowing for large inputs.
pub fn softmax(scores: &[f64]) -> SampleResult<Vec<f64>> {
    if scores.is_empty() {
        return Err(SampleError::EmptyInput("softmax of an empty score array".into()));
    }
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(SampleError::InvalidDistribution(format!(
            "softmax input must be finite, got {bad}"
        )));
    }

    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}
