use serde::{Deserialize, Serialize};

use super::ProviderError;

#[derive(Serialize, Deserialize, Debug)]
pub struct EsgChartResponse {
    #[serde(rename = "esgChart")]
    pub esg_chart: EsgChartEnvelope,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EsgChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<EsgChartResult>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

/// Company scores are reported with whatever precision the rating carries
/// (often integral); peer aggregates are always fractional.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EsgChartResult {
    pub symbol: Option<String>,
    pub peer_group: Option<String>,
    pub symbol_series: Option<EsgSeries<serde_json::Number>>,
    pub peer_series: Option<EsgSeries<f64>>,
}

/// Monthly score columns, positionally aligned with `timestamp`.
///
/// Absent columns decode as empty, so `T` itself needs no `Default`.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct EsgSeries<T> {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub esg_score: Vec<Option<T>>,
    #[serde(default)]
    pub governance_score: Vec<Option<T>>,
    #[serde(default)]
    pub environment_score: Vec<Option<T>>,
    #[serde(default)]
    pub social_score: Vec<Option<T>>,
}
