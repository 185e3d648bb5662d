use serde::{Deserialize, Serialize};

use super::ProviderError;

#[derive(Serialize, Deserialize, Debug)]
pub struct OptionChainResponse {
    #[serde(rename = "optionChain")]
    pub option_chain: OptionChainEnvelope,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OptionChainEnvelope {
    #[serde(default)]
    pub result: Option<Vec<OptionChainResult>>,
    #[serde(default)]
    pub error: Option<ProviderError>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainResult {
    pub underlying_symbol: Option<String>,
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    #[serde(default)]
    pub strikes: Vec<f64>,
    #[serde(default)]
    pub has_mini_options: bool,
    pub quote: Option<serde_json::Value>,
    /// One batch per call; the provider never returns more than one expiration.
    #[serde(default)]
    pub options: Vec<OptionBatch>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OptionBatch {
    pub expiration_date: Option<i64>,
    #[serde(default)]
    pub has_mini_options: bool,
    #[serde(default)]
    pub calls: Vec<ContractQuote>,
    #[serde(default)]
    pub puts: Vec<ContractQuote>,
}

/// A contract as listed. Fields are dropped by the provider when there is
/// nothing to report, e.g. `lastPrice` before the first trade.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContractQuote {
    pub contract_symbol: Option<String>,
    pub strike: Option<f64>,
    pub currency: Option<String>,
    pub last_price: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
    pub volume: Option<u64>,
    pub open_interest: Option<u64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub contract_size: Option<String>,
    pub expiration: Option<i64>,
    pub last_trade_date: Option<i64>,
    pub implied_volatility: Option<f64>,
    pub in_the_money: Option<bool>,
}
