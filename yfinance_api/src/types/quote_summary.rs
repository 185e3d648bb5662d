use serde::{Deserialize, Serialize};

use super::ProviderError;

#[derive(Serialize, Deserialize, Debug)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryEnvelope,
}

/// Each result is an object keyed by module name; its contents are left
/// untyped on purpose.
#[derive(Serialize, Deserialize, Debug)]
pub struct QuoteSummaryEnvelope {
    #[serde(default)]
    pub result: Option<Vec<serde_json::Map<String, serde_json::Value>>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}
