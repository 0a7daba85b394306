use cov_core::TrafficCoefficients;
use serde::Deserialize;

/// `[traffic]` coefficient tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrafficConfig {
    /// Seven weekday multipliers, Sunday first.
    pub weekday: Vec<f64>,
    /// Raw daypart scores; normalized with softmax by the traffic model.
    pub daypart: Vec<f64>,
}

impl TrafficConfig {
    pub fn coefficients(&self) -> anyhow::Result<TrafficCoefficients> {
        let weekday: [f64; 7] = self.weekday.as_slice().try_into().map_err(|_| {
            anyhow::anyhow!(
                "traffic.weekday must list exactly 7 coefficients (Sunday first), got {}",
                self.weekday.len()
            )
        })?;
        Ok(TrafficCoefficients::new(weekday, self.daypart.clone())?)
    }
}
