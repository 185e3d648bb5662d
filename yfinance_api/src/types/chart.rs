use serde::{Deserialize, Serialize};

use super::ProviderError;

#[derive(Serialize, Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

/// One symbol's bars. Every indicator array is positionally aligned with
/// `timestamp`; any slot may be `null`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub instrument_type: Option<String>,
    pub gmtoffset: Option<i64>,
    pub exchange_timezone_name: Option<String>,
    pub regular_market_price: Option<f64>,
    pub data_granularity: Option<String>,
    pub range: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
    #[serde(default)]
    pub adjclose: Vec<AdjCloseIndicator>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AdjCloseIndicator {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
