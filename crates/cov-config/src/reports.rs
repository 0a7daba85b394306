use serde::Deserialize;

/// How raw report-type weights become selection probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightNormalization {
    /// Run the weights through softmax.
    #[default]
    Softmax,
    /// Use the weights as probabilities directly.
    None,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportTypeEntry {
    pub id: String,
    pub title: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// `[report_types]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportTypesConfig {
    pub normalize: WeightNormalization,
    pub entries: Vec<ReportTypeEntry>,
}

fn default_weight() -> f64 {
    1.0
}
