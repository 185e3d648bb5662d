use yfinance_api::types::{
    ChartResponse, EsgChartResponse, OptionChainResponse, QuoteSummaryResponse, ReportedValue,
    TimeseriesResponse,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_chart_intraday() {
    let json = load_fixture("chart_aapl_90m.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.chart.result.unwrap()[0];
    assert_eq!(result.meta.symbol.as_deref(), Some("AAPL"));
    assert_eq!(result.meta.data_granularity.as_deref(), Some("90m"));
    assert_eq!(result.timestamp.as_ref().unwrap().len(), 2);
    let quote = &result.indicators.quote[0];
    assert_eq!(quote.volume, vec![Some(10452686), Some(0)]);
    assert!(result.indicators.adjclose.is_empty());
}

#[test]
fn deserialize_chart_daily_with_gaps() {
    let json = load_fixture("chart_aapl_daily.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.chart.result.unwrap()[0];
    let quote = &result.indicators.quote[0];
    assert_eq!(quote.open[3], None);
    assert_eq!(quote.close[4], Some(142.65));
    assert_eq!(result.indicators.adjclose[0].adjclose[0], Some(145.84));
}

#[test]
fn deserialize_chart_not_found() {
    let json = load_fixture("chart_not_found.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.chart.result.is_none());
    let error = resp.chart.error.unwrap();
    assert_eq!(error.code.as_deref(), Some("Not Found"));
    assert!(error.to_string().contains("delisted"));
}

#[test]
fn deserialize_timeseries_series_by_type_name() {
    let json = load_fixture("fundamentals_interest_expense.json");
    let resp: TimeseriesResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.timeseries.result.unwrap()[0];
    assert_eq!(result.meta.types, vec!["quarterlyInterestExpense"]);
    let series = &result.series["quarterlyInterestExpense"];
    assert_eq!(series.len(), 5);
    let first = series[0].as_ref().unwrap();
    assert_eq!(first.as_of_date.as_deref(), Some("2021-09-30"));
    assert_eq!(
        first.reported_value,
        Some(ReportedValue::Raw {
            raw: 672000000.0,
            fmt: Some("672M".to_string())
        })
    );
}

#[test]
fn deserialize_timeseries_mixed_value_encodings() {
    let json = load_fixture("fundamentals_income_statement.json");
    let resp: TimeseriesResponse = serde_json::from_str(&json).unwrap();
    let results = resp.timeseries.result.unwrap();
    assert_eq!(results.len(), 4);

    let net_interest = &results[1].series["quarterlyNetInterestIncome"];
    assert!(net_interest[1].is_none());
    assert_eq!(
        net_interest[2].as_ref().unwrap().reported_value,
        Some(ReportedValue::Formatted {
            fmt: "8.07M".to_string()
        })
    );

    // Types without data carry only their meta block.
    assert!(results[2].series.is_empty());
    assert!(results[2].timestamp.is_empty());
}

#[test]
fn deserialize_option_chain() {
    let json = load_fixture("options_aapl.json");
    let resp: OptionChainResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.option_chain.result.unwrap()[0];
    assert_eq!(result.underlying_symbol.as_deref(), Some("AAPL"));
    assert_eq!(result.expiration_dates, vec![1670544000, 1671148800]);
    let batch = &result.options[0];
    assert_eq!(batch.calls.len(), 2);
    assert_eq!(batch.puts.len(), 1);
    assert_eq!(batch.calls[1].volume, None);
    assert_eq!(batch.calls[0].in_the_money, Some(true));
}

#[test]
fn deserialize_option_chain_without_contracts() {
    let json = load_fixture("options_no_contracts.json");
    let resp: OptionChainResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.option_chain.result.unwrap()[0];
    assert!(result.options.is_empty());
    assert!(result.expiration_dates.is_empty());
}

#[test]
fn deserialize_esg_keeps_company_precision() {
    let json = load_fixture("esg_aapl.json");
    let resp: EsgChartResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.esg_chart.result.unwrap()[0];
    let company = result.symbol_series.as_ref().unwrap();
    assert!(company.esg_score[0].as_ref().unwrap().is_i64());
    assert!(company.esg_score[3].as_ref().unwrap().is_f64());
    assert!(company.esg_score[2].is_none());

    let peers = result.peer_series.as_ref().unwrap();
    assert_eq!(peers.governance_score[0], Some(63.2545));
    assert_eq!(result.peer_group.as_deref(), Some("Technology Hardware"));
}

#[test]
fn deserialize_esg_with_missing_score_columns() {
    let json = r#"{"esgChart": {"result": [{
        "symbol": "AAPL",
        "symbolSeries": {"timestamp": [1409529600], "esgScore": [61]},
        "peerSeries": {"timestamp": [1409529600]}
    }], "error": null}}"#;
    let resp: EsgChartResponse = serde_json::from_str(json).unwrap();
    let result = &resp.esg_chart.result.unwrap()[0];
    let company = result.symbol_series.as_ref().unwrap();
    assert_eq!(company.esg_score[0].as_ref().unwrap().as_i64(), Some(61));
    assert!(company.social_score.is_empty());
    assert!(company.governance_score.is_empty());
    let peers = result.peer_series.as_ref().unwrap();
    assert_eq!(peers.timestamp, vec![1409529600]);
    assert!(peers.esg_score.is_empty());
}

#[test]
fn deserialize_esg_without_coverage() {
    let json = load_fixture("esg_not_covered.json");
    let resp: EsgChartResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.esg_chart.result.unwrap().is_empty());
}

#[test]
fn deserialize_quote_summary_preserves_modules() {
    let json = load_fixture("quote_summary_aapl.json");
    let resp: QuoteSummaryResponse = serde_json::from_str(&json).unwrap();
    let result = &resp.quote_summary.result.unwrap()[0];
    assert!(result.contains_key("assetProfile"));
    assert_eq!(result["quoteType"]["symbol"], "AAPL");
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"chart": not valid json}"#;
    let result = serde_json::from_str::<ChartResponse>(bad_json);
    assert!(result.is_err());
}

#[test]
fn deserialize_missing_envelope_returns_error() {
    let json = r#"{"finance": {"result": null}}"#;
    let result = serde_json::from_str::<ChartResponse>(json);
    assert!(result.is_err());
}
