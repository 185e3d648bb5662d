//! Pass-through of quote-summary modules.

use serde_json::{Map, Value};
use yfinance_api::types::QuoteSummaryResponse;

use crate::error::YFinanceError;

/// Pick modules from a raw quote-summary document.
///
/// With no keys the whole first result is returned unchanged. A single key
/// returns that module's object itself, and fails with `NoData` when the
/// module is absent. Several keys give an object holding exactly the
/// requested keys that exist, in request order. Absent keys are skipped
/// there, since not every module applies to every security type.
pub fn select_modules(raw: Value, symbol: &str, keys: &[String]) -> Result<Value, YFinanceError> {
    let response: QuoteSummaryResponse = serde_json::from_value(raw)?;
    if let Some(error) = &response.quote_summary.error {
        tracing::debug!("Quote summary error for {}: {}", symbol, error);
    }
    let mut result = response
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| YFinanceError::NoData {
            symbol: symbol.to_string(),
            window: "quote summary".to_string(),
        })?;

    match keys {
        [] => return Ok(Value::Object(result)),
        [key] => {
            return result.remove(key).ok_or_else(|| YFinanceError::NoData {
                symbol: symbol.to_string(),
                window: format!("quote summary module {}", key),
            })
        }
        _ => {}
    }

    let mut selected = Map::new();
    for key in keys {
        match result.remove(key) {
            Some(value) => {
                selected.insert(key.clone(), value);
            }
            None => tracing::debug!("Module {} not present for {}", key, symbol),
        }
    }
    Ok(Value::Object(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Value {
        let path = format!(
            "{}/../yfinance_api/tests/fixtures/quote_summary_aapl.json",
            env!("CARGO_MANIFEST_DIR")
        );
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_no_keys_returns_everything() {
        let raw = fixture();
        let expected = raw["quoteSummary"]["result"][0].clone();
        let out = select_modules(raw, "AAPL", &[]).unwrap();
        assert_eq!(out, expected);
        let names: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["assetProfile", "quoteType", "price", "summaryDetail"]);
    }

    #[test]
    fn test_selection_follows_request_order() {
        let out = select_modules(fixture(), "AAPL", &keys(&["price", "assetProfile"])).unwrap();
        let names: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["price", "assetProfile"]);
        assert_eq!(out["assetProfile"]["city"], "Cupertino");
    }

    #[test]
    fn test_absent_keys_are_omitted() {
        let out = select_modules(fixture(), "AAPL", &keys(&["fundProfile", "quoteType"])).unwrap();
        assert_eq!(out.as_object().unwrap().len(), 1);
        assert_eq!(out["quoteType"]["shortName"], "Apple Inc.");

        let out = select_modules(fixture(), "AAPL", &keys(&["fundProfile", "calendarEvents"]))
            .unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_single_key_returns_module_itself() {
        let raw = fixture();
        let expected = raw["quoteSummary"]["result"][0]["quoteType"].clone();
        let out = select_modules(raw, "AAPL", &keys(&["quoteType"])).unwrap();
        assert_eq!(out, expected);
        assert_eq!(out["exchange"], "NMS");
        assert_eq!(out["quoteType"], "EQUITY");
        assert_eq!(out["symbol"], "AAPL");
    }

    #[test]
    fn test_single_absent_key_is_no_data() {
        let err = select_modules(fixture(), "AAPL", &keys(&["fundProfile"])).unwrap_err();
        assert!(err.is_no_data());
        assert!(err.to_string().contains("fundProfile"));
    }

    #[test]
    fn test_missing_result_is_no_data() {
        let raw = json!({"quoteSummary": {"result": null, "error": {"code": "Not Found", "description": "Quote not found"}}});
        let err = select_modules(raw, "ZZZZ", &[]).unwrap_err();
        assert!(err.is_no_data());
    }
}
