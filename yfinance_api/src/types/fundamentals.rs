use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ProviderError;

#[derive(Serialize, Deserialize, Debug)]
pub struct TimeseriesResponse {
    pub timeseries: TimeseriesEnvelope,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TimeseriesEnvelope {
    #[serde(default)]
    pub result: Option<Vec<TimeseriesResult>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

/// One requested type. The data array sits under a key equal to the type
/// name (e.g. `quarterlyInterestExpense`) and is absent when the provider
/// has nothing for it.
#[derive(Serialize, Deserialize, Debug)]
pub struct TimeseriesResult {
    #[serde(default)]
    pub meta: TimeseriesMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(flatten)]
    pub series: BTreeMap<String, Vec<Option<TimeseriesDataPoint>>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TimeseriesMeta {
    #[serde(default)]
    pub symbol: Vec<String>,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesDataPoint {
    pub data_id: Option<i64>,
    pub as_of_date: Option<String>,
    pub period_type: Option<String>,
    pub currency_code: Option<String>,
    pub reported_value: Option<ReportedValue>,
}

/// The provider reports values either as `{raw, fmt}` pairs, as a bare
/// formatted string object, or occasionally as a plain number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ReportedValue {
    Raw {
        raw: f64,
        #[serde(default)]
        fmt: Option<String>,
    },
    Formatted {
        fmt: String,
    },
    Number(f64),
}
