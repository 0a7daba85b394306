use cov_config::{ReportTypesConfig, WeightNormalization};
use cov_core::{CoverageInfo, SampleResult};

use super::record::ReportType;

/// Report types paired with their selection probabilities.
pub fn report_coverage(config: &ReportTypesConfig) -> SampleResult<Vec<CoverageInfo<ReportType>>> {
    let raw: Vec<(ReportType, f64)> = config
        .entries
        .iter()
        .map(|e| {
            let report = ReportType {
                id: e.id.clone(),
                title: e.title.clone(),
            };
            (report, e.weight)
        })
        .collect();
    match config.normalize {
        WeightNormalization::Softmax => CoverageInfo::normalized(raw),
        WeightNormalization::None => Ok(raw
            .into_iter()
            .map(|(item, weight)| CoverageInfo::new(item, weight))
            .collect()),
    }
}
