//! ESG score normalization.
//!
//! Company scores keep the provider's numeric form (integral in older
//! months, fractional in newer ones). Peer-group aggregates are always
//! floating point. The two tables are never coerced into one type.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Number, Value};
use yfinance_api::types::{EsgChartResponse, EsgSeries};

use crate::error::YFinanceError;
use crate::window::epoch_to_datetime;

/// One monthly row. `None` is a listed month without a score.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgRecord<T> {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub esg_score: Option<T>,
    pub environment_score: Option<T>,
    pub social_score: Option<T>,
    pub governance_score: Option<T>,
}

/// Company and peer-group score tables for one symbol.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgScores {
    pub symbol: String,
    pub peer_group: Option<String>,
    pub scores: Vec<EsgRecord<Number>>,
    pub peer_scores: Vec<EsgRecord<f64>>,
}

fn to_records<T: Clone>(symbol: &str, series: &EsgSeries<T>) -> Vec<EsgRecord<T>> {
    let at = |values: &[Option<T>], i: usize| values.get(i).cloned().flatten();
    series
        .timestamp
        .iter()
        .enumerate()
        .map(|(i, ts)| EsgRecord {
            symbol: symbol.to_string(),
            timestamp: epoch_to_datetime(*ts),
            esg_score: at(&series.esg_score, i),
            environment_score: at(&series.environment_score, i),
            social_score: at(&series.social_score, i),
            governance_score: at(&series.governance_score, i),
        })
        .collect()
}

pub fn normalize_esg(raw: Value, symbol: &str) -> Result<EsgScores, YFinanceError> {
    let response: EsgChartResponse = serde_json::from_value(raw)?;
    from_esg_chart(response, symbol)
}

/// Normalize an already-decoded ESG response.
///
/// Fails with [`YFinanceError::NoEsgData`] when the symbol is not scored. A
/// missing peer series yields an empty peer table.
pub fn from_esg_chart(response: EsgChartResponse, symbol: &str) -> Result<EsgScores, YFinanceError> {
    if let Some(error) = &response.esg_chart.error {
        tracing::debug!("ESG error for {}: {}", symbol, error);
    }
    let no_data = || YFinanceError::NoEsgData(symbol.to_string());
    let result = response
        .esg_chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(no_data)?;
    let company = match &result.symbol_series {
        Some(series) if !series.timestamp.is_empty() => series,
        _ => return Err(no_data()),
    };

    let symbol = result.symbol.clone().unwrap_or_else(|| symbol.to_string());
    let peer_scores = match &result.peer_series {
        Some(series) => to_records(&symbol, series),
        None => {
            tracing::debug!("No peer series for {}", symbol);
            Vec::new()
        }
    };

    Ok(EsgScores {
        scores: to_records(&symbol, company),
        peer_scores,
        peer_group: result.peer_group.clone(),
        symbol,
    })
}
